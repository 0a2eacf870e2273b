use serde::Serialize;

use crate::stress::{StopReason, WorkerResult};

use super::percentiles::percentile_linear;

const P90: f64 = 90.0;

/// Latency statistics in seconds over all recorded requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub p90: f64,
}

/// Result of merging every worker's outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressSummary {
    pub stop_reason: StopReason,
    pub total_requests: u64,
    pub failure_count: u64,
    /// Percentage of failed requests, `0` when nothing was sent.
    pub failure_ratio: f64,
    /// `None` when no request was recorded.
    pub latency: Option<LatencyStats>,
    /// All latencies in seconds, ascending.
    #[serde(skip)]
    pub latencies: Vec<f64>,
}

impl StressSummary {
    /// Whether no request was sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_requests == 0
    }
}

/// Merges worker results into one summary.
///
/// Deterministic in its input and independent of worker order: latencies
/// are sorted before any statistic is computed. The run counts as
/// interrupted when any worker stopped on an interrupt.
pub fn summarize<'result, I>(results: I) -> StressSummary
where
    I: IntoIterator<Item = &'result WorkerResult>,
{
    let mut latencies = Vec::new();
    let mut failure_count: u64 = 0;
    let mut stop_reason = StopReason::Timeout;

    for result in results {
        latencies.extend(
            result
                .outcomes
                .iter()
                .map(|outcome| outcome.elapsed_seconds()),
        );
        failure_count = failure_count.saturating_add(result.failure_count);
        if result.stop_reason == StopReason::Interrupted {
            stop_reason = StopReason::Interrupted;
        }
    }
    latencies.sort_by(f64::total_cmp);

    let total_requests = u64::try_from(latencies.len()).unwrap_or(u64::MAX);
    let failure_ratio = if total_requests == 0 {
        0.0
    } else {
        failure_count as f64 * 100.0 / total_requests as f64
    };

    StressSummary {
        stop_reason,
        total_requests,
        failure_count,
        failure_ratio,
        latency: latency_stats(&latencies),
        latencies,
    }
}

fn latency_stats(sorted: &[f64]) -> Option<LatencyStats> {
    let min = *sorted.first()?;
    let max = *sorted.last()?;
    let sum: f64 = sorted.iter().sum();
    let avg = sum / sorted.len() as f64;
    let p90 = percentile_linear(sorted, P90)?;
    Some(LatencyStats { min, max, avg, p90 })
}
