//! Concurrent stress-execution engine: workers, cancellation, and the
//! coordinator that joins and merges their results.
mod coordinator;
mod recorder;
mod signal;
mod worker;

#[cfg(test)]
mod tests;

pub use coordinator::{RunPlan, RunReport, run_stress};
pub use recorder::{RequestOutcome, RequestRecorder, WorkerId, WorkerResult};
pub use signal::{CancellationSignal, StopReason};
pub use worker::{WorkerContext, classify_response, run_worker};
