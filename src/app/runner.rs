use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::thread_rng;
use tracing::{info, warn};

use crate::args::TesterArgs;
use crate::error::{AppResult, SinkError};
use crate::http::{ReqwestTransport, Transport, build_client, build_headers};
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;
use crate::sinks::{ArtifactPaths, format_summary, resolve_output_dir, write_run_artifacts};
use crate::stress::{CancellationSignal, RunPlan, RunReport, run_stress};
use crate::targets::{TargetSet, load_domains};

use super::progress;

/// Runs one stress test from parsed arguments and writes its artifacts.
///
/// The summary is printed before any artifact is written. Every artifact is
/// attempted and the first sink error is returned afterwards.
pub(crate) async fn run_local(args: TesterArgs) -> AppResult<()> {
    let plan = build_plan(&args)?;
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(build_client(&args)?));

    let (shutdown_tx, interrupt_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let signal = CancellationSignal::new();
    let progress_handle = (!args.no_progress && !args.verbose).then(|| {
        progress::setup_progress_indicator(plan.timeout, args.no_color, signal.clone())
    });

    let report = run_stress(plan, transport, signal, interrupt_rx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }
    if let Some(handle) = progress_handle
        && let Err(err) = handle.await
    {
        warn!("Progress indicator task failed: {}", err);
    }

    let rendered = format_summary(&report.summary, report.elapsed)?;
    println!("{}", rendered);
    write_artifacts(&args, &report, &rendered).await?;
    Ok(())
}

fn build_plan(args: &TesterArgs) -> AppResult<RunPlan> {
    let domains = load_domains(Path::new(&args.domains_file))?;
    let targets = TargetSet::from_domains(
        &args.url_base,
        &domains,
        args.domain_count.get(),
        &mut thread_rng(),
    )?;
    info!(
        "Sampled {} of {} domains from {}",
        targets.len(),
        domains.len(),
        args.domains_file
    );

    Ok(RunPlan {
        workers: args.workers.get(),
        timeout: Duration::from_secs(args.target_duration.get()),
        targets,
        headers: build_headers(args)?,
        error_field: args.error_field.clone(),
    })
}

async fn write_artifacts(
    args: &TesterArgs,
    report: &RunReport,
    rendered: &str,
) -> Result<(), SinkError> {
    let dir = resolve_output_dir(&args.output_dir);
    let paths = ArtifactPaths::stamped_now(&dir);

    let responses: Vec<_> = report.responses().collect();
    write_run_artifacts(
        &paths,
        &responses,
        rendered,
        &report.summary,
        report.elapsed,
        args.export_json.as_deref().map(Path::new),
    )
    .await
}
