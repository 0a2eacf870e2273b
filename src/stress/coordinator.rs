use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::http::Transport;
use crate::metrics::{StressSummary, summarize};
use crate::shutdown::ShutdownReceiver;
use crate::targets::TargetSet;

use super::recorder::{WorkerId, WorkerResult};
use super::signal::{CancellationSignal, StopReason};
use super::worker::{WorkerContext, run_worker};

/// Validated inputs of one run.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub workers: usize,
    pub timeout: Duration,
    pub targets: TargetSet,
    pub headers: HeaderMap,
    pub error_field: String,
}

/// Terminal artifact of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: StressSummary,
    /// Results keyed by worker id. Workers that never reported are absent.
    pub results: BTreeMap<WorkerId, WorkerResult>,
    pub elapsed: Duration,
    pub workers_spawned: usize,
}

impl RunReport {
    /// Response log across all workers, in worker-id order.
    pub fn responses(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.results
            .values()
            .flat_map(|result| result.responses.iter())
    }

    #[must_use]
    pub fn workers_reported(&self) -> usize {
        self.results.len()
    }
}

/// Spawns `plan.workers` workers, stops them on timeout or interrupt, and
/// merges their results.
///
/// The stop is cooperative: once the signal is set the coordinator waits
/// for every worker to finish its in-flight request and exit. Interrupts
/// arriving after that point are ignored so the join always completes.
/// A signal that is already set (or set by someone else while running)
/// stops the run with that signal's reason.
pub async fn run_stress(
    plan: RunPlan,
    transport: Arc<dyn Transport>,
    signal: CancellationSignal,
    mut interrupt: ShutdownReceiver,
) -> RunReport {
    let started = Instant::now();
    let headers = Arc::new(plan.headers);
    let error_field: Arc<str> = Arc::from(plan.error_field);

    let mut handles = Vec::with_capacity(plan.workers);
    for worker_id in 0..plan.workers {
        let ctx = WorkerContext {
            worker_id,
            targets: plan.targets.clone(),
            headers: Arc::clone(&headers),
            transport: Arc::clone(&transport),
            signal: signal.clone(),
            timeout: plan.timeout,
            error_field: Arc::clone(&error_field),
        };
        let handle = tokio::spawn(run_worker(ctx, StdRng::from_entropy()));
        handles.push((worker_id, handle));
    }
    info!(
        "Started {} workers against {} urls for {:?}",
        plan.workers,
        plan.targets.len(),
        plan.timeout
    );

    let reason = tokio::select! {
        () = tokio::time::sleep(plan.timeout) => StopReason::Timeout,
        () = wait_for_interrupt(&mut interrupt) => StopReason::Interrupted,
        reason = signal.cancelled() => reason,
    };
    drop(interrupt);
    if signal.cancel(reason) {
        info!("Stopping workers: {}", reason);
    }

    let results = join_workers(handles).await;
    let summary = summarize(results.values());

    RunReport {
        summary,
        results,
        elapsed: started.elapsed(),
        workers_spawned: plan.workers,
    }
}

async fn wait_for_interrupt(interrupt: &mut ShutdownReceiver) {
    match interrupt.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        // No sender left means no interrupt can arrive.
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}

async fn join_workers(
    handles: Vec<(WorkerId, JoinHandle<WorkerResult>)>,
) -> BTreeMap<WorkerId, WorkerResult> {
    let mut results = BTreeMap::new();
    for (worker_id, handle) in handles {
        match handle.await {
            Ok(result) => {
                results.insert(worker_id, result);
            }
            Err(err) => {
                warn!("Worker {} produced no result: {}", worker_id, err);
            }
        }
    }
    debug!("Joined {} workers", results.len());
    results
}
