use std::path::Path;
use std::time::Duration;

use crate::args::SUMMARY_LATENCY_UNIT;
use crate::error::SinkError;
use crate::metrics::StressSummary;

use super::format::write_line;

/// Printed in place of latency statistics when nothing was recorded.
const NO_LATENCY: f64 = -1.0;

/// Renders the human-readable summary, one field per line.
///
/// # Errors
///
/// Returns an error when formatting fails.
pub fn format_summary(summary: &StressSummary, elapsed: Duration) -> Result<String, SinkError> {
    let (p90, avg, max, min) = summary.latency.map_or(
        (NO_LATENCY, NO_LATENCY, NO_LATENCY, NO_LATENCY),
        |stats| (stats.p90, stats.avg, stats.max, stats.min),
    );

    let mut output = String::new();
    write_line(&mut output, "Test is over!")?;
    write_line(&mut output, &format!("Reason: {}", summary.stop_reason))?;
    write_line(
        &mut output,
        &format!("Time in total: {} seconds", elapsed.as_secs()),
    )?;
    write_line(
        &mut output,
        &format!("Requests in total: {}", summary.total_requests),
    )?;
    write_line(
        &mut output,
        &format!(
            "Error rate: {:.2}%({}/{})",
            summary.failure_ratio, summary.failure_count, summary.total_requests
        ),
    )?;
    write_line(
        &mut output,
        &format!("P90: {:.2} {}", p90, SUMMARY_LATENCY_UNIT),
    )?;
    write_line(
        &mut output,
        &format!(
            "Average time for one request: {:.1} {}",
            avg, SUMMARY_LATENCY_UNIT
        ),
    )?;
    write_line(
        &mut output,
        &format!("Max time for one request: {:.1} {}", max, SUMMARY_LATENCY_UNIT),
    )?;
    write_line(
        &mut output,
        &format!("Min time for one request: {:.1} {}", min, SUMMARY_LATENCY_UNIT),
    )?;
    Ok(output)
}

/// Writes the rendered summary to `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub async fn write_summary_text(path: &Path, rendered: &str) -> Result<(), SinkError> {
    tokio::fs::write(path, rendered.as_bytes())
        .await
        .map_err(|err| SinkError::WriteSummary {
            path: path.to_path_buf(),
            source: err,
        })
}

/// Writes the summary and elapsed time as pretty JSON to `path`.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub async fn write_summary_json(
    path: &Path,
    summary: &StressSummary,
    elapsed: Duration,
) -> Result<(), SinkError> {
    let payload = serde_json::json!({
        "elapsed_secs": elapsed.as_secs_f64(),
        "summary": summary,
    });
    let json =
        serde_json::to_vec_pretty(&payload).map_err(|err| SinkError::SerializeJson { source: err })?;
    tokio::fs::write(path, json)
        .await
        .map_err(|err| SinkError::WriteSummary {
            path: path.to_path_buf(),
            source: err,
        })
}
