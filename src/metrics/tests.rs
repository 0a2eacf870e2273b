use std::time::Duration;

use super::*;
use crate::error::{AppError, AppResult};
use crate::stress::{RequestOutcome, StopReason, WorkerResult};

const TOLERANCE: f64 = 1e-9;

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < TOLERANCE
}

fn worker_result(
    worker_id: usize,
    stop_reason: StopReason,
    samples: &[(u64, bool)],
) -> WorkerResult {
    let outcomes: Vec<RequestOutcome> = samples
        .iter()
        .map(|(millis, succeeded)| RequestOutcome::new(Duration::from_millis(*millis), *succeeded))
        .collect();
    let failures = outcomes.iter().filter(|outcome| !outcome.succeeded).count();
    WorkerResult {
        worker_id,
        stop_reason,
        outcomes,
        failure_count: u64::try_from(failures).unwrap_or(u64::MAX),
        responses: Vec::new(),
    }
}

#[test]
fn percentile_interpolates_between_ranks() -> AppResult<()> {
    let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
    let p90 = percentile_linear(&sorted, 90.0)
        .ok_or_else(|| AppError::validation("Expected a percentile"))?;
    if !close(p90, 9.1) {
        return Err(AppError::validation(format!("Unexpected p90: {}", p90)));
    }
    let p50 = percentile_linear(&sorted, 50.0)
        .ok_or_else(|| AppError::validation("Expected a percentile"))?;
    if !close(p50, 5.5) {
        return Err(AppError::validation(format!("Unexpected p50: {}", p50)));
    }
    Ok(())
}

#[test]
fn percentile_of_single_sample_is_that_sample() -> AppResult<()> {
    let p90 = percentile_linear(&[0.3], 90.0)
        .ok_or_else(|| AppError::validation("Expected a percentile"))?;
    if !close(p90, 0.3) {
        return Err(AppError::validation(format!("Unexpected p90: {}", p90)));
    }
    if percentile_linear(&[], 90.0).is_some() {
        return Err(AppError::validation("Expected no percentile for no samples"));
    }
    Ok(())
}

#[test]
fn summarize_computes_stats_across_workers() -> AppResult<()> {
    let first = worker_result(
        0,
        StopReason::Timeout,
        &[(1000, true), (3000, false), (5000, true), (7000, true), (9000, true)],
    );
    let second = worker_result(
        1,
        StopReason::Timeout,
        &[(2000, true), (4000, true), (6000, false), (8000, true), (10_000, true)],
    );
    let summary = summarize([&first, &second]);

    if summary.total_requests != 10 || summary.failure_count != 2 {
        return Err(AppError::validation(format!(
            "Unexpected counts: {}/{}",
            summary.failure_count, summary.total_requests
        )));
    }
    if !close(summary.failure_ratio, 20.0) {
        return Err(AppError::validation(format!(
            "Unexpected failure ratio: {}",
            summary.failure_ratio
        )));
    }
    let stats = summary
        .latency
        .ok_or_else(|| AppError::validation("Expected latency stats"))?;
    if !close(stats.min, 1.0) || !close(stats.max, 10.0) {
        return Err(AppError::validation(format!(
            "Unexpected min/max: {}/{}",
            stats.min, stats.max
        )));
    }
    if !close(stats.avg, 5.5) || !close(stats.p90, 9.1) {
        return Err(AppError::validation(format!(
            "Unexpected avg/p90: {}/{}",
            stats.avg, stats.p90
        )));
    }
    if summary.stop_reason != StopReason::Timeout {
        return Err(AppError::validation("Expected timeout stop reason"));
    }
    Ok(())
}

#[test]
fn summarize_without_requests_has_no_latency() -> AppResult<()> {
    let idle = worker_result(0, StopReason::Interrupted, &[]);
    let summary = summarize([&idle]);
    if summary.total_requests != 0 || summary.failure_count != 0 {
        return Err(AppError::validation("Expected zero requests"));
    }
    if summary.latency.is_some() || !summary.latencies.is_empty() {
        return Err(AppError::validation("Expected no latency stats"));
    }
    if !close(summary.failure_ratio, 0.0) {
        return Err(AppError::validation("Expected zero failure ratio"));
    }
    if summary.stop_reason != StopReason::Interrupted {
        return Err(AppError::validation("Expected interrupted stop reason"));
    }

    let nothing = summarize(std::iter::empty::<&WorkerResult>());
    if !nothing.is_empty() || nothing.latency.is_some() {
        return Err(AppError::validation("Expected an empty summary"));
    }
    Ok(())
}

#[test]
fn summarize_is_order_independent_and_repeatable() -> AppResult<()> {
    let first = worker_result(0, StopReason::Timeout, &[(300, true), (100, false)]);
    let second = worker_result(1, StopReason::Interrupted, &[(200, true)]);
    let third = worker_result(2, StopReason::Timeout, &[(500, true), (400, true)]);

    let forward = summarize([&first, &second, &third]);
    let reversed = summarize([&third, &second, &first]);
    let again = summarize([&first, &second, &third]);

    if forward != reversed || forward != again {
        return Err(AppError::validation("Summaries differ by worker order"));
    }
    let forward_json = serde_json::to_string(&forward)?;
    let reversed_json = serde_json::to_string(&reversed)?;
    if forward_json != reversed_json {
        return Err(AppError::validation("Serialized summaries differ"));
    }
    if forward.stop_reason != StopReason::Interrupted {
        return Err(AppError::validation(
            "Expected any interrupted worker to mark the run interrupted",
        ));
    }
    Ok(())
}

#[test]
fn summarize_failure_ratio_stays_in_bounds() -> AppResult<()> {
    let all_failed = worker_result(0, StopReason::Timeout, &[(100, false), (200, false)]);
    let summary = summarize([&all_failed]);
    if !close(summary.failure_ratio, 100.0) {
        return Err(AppError::validation(format!(
            "Unexpected failure ratio: {}",
            summary.failure_ratio
        )));
    }
    if summary.failure_count > summary.total_requests {
        return Err(AppError::validation("Failures exceed requests"));
    }
    Ok(())
}

#[test]
fn summary_serializes_stop_reason_in_snake_case() -> AppResult<()> {
    let result = worker_result(0, StopReason::Interrupted, &[(100, true)]);
    let value = serde_json::to_value(summarize([&result]))?;
    if value.get("stop_reason").and_then(serde_json::Value::as_str) != Some("interrupted") {
        return Err(AppError::validation(format!(
            "Unexpected stop_reason: {}",
            value
        )));
    }
    if value.get("latencies").is_some() {
        return Err(AppError::validation("Raw latencies should not be serialized"));
    }
    Ok(())
}
