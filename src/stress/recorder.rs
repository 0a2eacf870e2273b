use std::time::Duration;

use serde_json::{Map, Value};

use super::signal::StopReason;

/// Process-unique identifier of one worker within a run.
pub type WorkerId = usize;

/// Tenths of a second, the resolution latencies are recorded at.
const LATENCY_RESOLUTION_MS: u128 = 100;

/// One completed request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub elapsed: Duration,
    pub succeeded: bool,
}

impl RequestOutcome {
    /// Builds an outcome with `elapsed` rounded to the nearest tenth of a second.
    #[must_use]
    pub fn new(elapsed: Duration, succeeded: bool) -> Self {
        Self {
            elapsed: round_to_tenths(elapsed),
            succeeded,
        }
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

fn round_to_tenths(elapsed: Duration) -> Duration {
    let tenths = elapsed
        .as_millis()
        .saturating_add(LATENCY_RESOLUTION_MS / 2)
        .checked_div(LATENCY_RESOLUTION_MS)
        .unwrap_or(0);
    let millis = tenths.saturating_mul(LATENCY_RESOLUTION_MS);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Per-worker accumulator. Owned by exactly one worker, so no locking.
#[derive(Debug, Default)]
pub struct RequestRecorder {
    outcomes: Vec<RequestOutcome>,
    responses: Vec<Map<String, Value>>,
    failure_count: u64,
}

impl RequestRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: RequestOutcome, response: Option<Map<String, Value>>) {
        if !outcome.succeeded {
            self.failure_count = self.failure_count.saturating_add(1);
        }
        self.outcomes.push(outcome);
        if let Some(response) = response {
            self.responses.push(response);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    #[must_use]
    pub fn finish(self, worker_id: WorkerId, stop_reason: StopReason) -> WorkerResult {
        WorkerResult {
            worker_id,
            stop_reason,
            outcomes: self.outcomes,
            failure_count: self.failure_count,
            responses: self.responses,
        }
    }
}

/// Terminal output of one worker.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerResult {
    pub worker_id: WorkerId,
    pub stop_reason: StopReason,
    pub outcomes: Vec<RequestOutcome>,
    pub failure_count: u64,
    /// Parsed JSON object bodies, successful or not.
    pub responses: Vec<Map<String, Value>>,
}
