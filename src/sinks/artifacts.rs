use std::path::Path;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{error, info};

use crate::error::SinkError;
use crate::metrics::StressSummary;

use super::files::ArtifactPaths;
use super::responses::write_responses_csv;
use super::summary::{write_summary_json, write_summary_text};

/// Writes every run artifact, each independently of the others.
///
/// A failed artifact is logged and does not stop the remaining ones from
/// being written. The first failure is returned once all were attempted.
///
/// # Errors
///
/// Returns the first sink error encountered.
pub async fn write_run_artifacts(
    paths: &ArtifactPaths,
    responses: &[&Map<String, Value>],
    rendered: &str,
    summary: &StressSummary,
    elapsed: Duration,
    export_json: Option<&Path>,
) -> Result<(), SinkError> {
    let mut first_error = None;

    if let Err(err) = write_responses_csv(&paths.responses, responses) {
        keep_first(&mut first_error, err);
    }

    match write_summary_text(&paths.summary, rendered).await {
        Ok(()) => info!("Wrote summary to {}", paths.summary.display()),
        Err(err) => keep_first(&mut first_error, err),
    }

    if let Some(path) = export_json {
        match write_summary_json(path, summary, elapsed).await {
            Ok(()) => info!("Wrote JSON summary to {}", path.display()),
            Err(err) => keep_first(&mut first_error, err),
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn keep_first(first_error: &mut Option<SinkError>, err: SinkError) {
    error!("Failed to write run artifact: {}", err);
    if first_error.is_none() {
        *first_error = Some(err);
    }
}
