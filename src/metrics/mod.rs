//! Aggregation of per-worker results into the run summary.
mod percentiles;
mod summary;

#[cfg(test)]
mod tests;

pub use percentiles::percentile_linear;
pub use summary::{LatencyStats, StressSummary, summarize};
