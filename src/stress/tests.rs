use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::header::HeaderMap;

use super::*;
use crate::error::{AppError, AppResult, HttpError};
use crate::http::{Transport, TransportResponse};
use crate::shutdown::shutdown_channel;
use crate::targets::TargetSet;

const RUN_DEADLINE: Duration = Duration::from_secs(5);
const SHORT_RUN: Duration = Duration::from_millis(100);
const ERROR_FIELD: &str = "domain_error";

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

struct StaticTransport {
    status: u16,
    body: &'static [u8],
    delay: Duration,
}

#[async_trait]
impl Transport for StaticTransport {
    async fn get(&self, _url: &str, _headers: &HeaderMap) -> Result<TransportResponse, HttpError> {
        tokio::time::sleep(self.delay).await;
        Ok(TransportResponse {
            status: self.status,
            body: self.body.to_vec(),
        })
    }
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn get(&self, _url: &str, _headers: &HeaderMap) -> Result<TransportResponse, HttpError> {
        Err(HttpError::TestFailure {
            message: "connection refused",
        })
    }
}

fn ok_transport() -> Arc<dyn Transport> {
    Arc::new(StaticTransport {
        status: 200,
        body: br#"{"domain": "a.com", "rank": 7}"#,
        delay: Duration::from_millis(5),
    })
}

fn plan(workers: usize, timeout: Duration) -> AppResult<RunPlan> {
    Ok(RunPlan {
        workers,
        timeout,
        targets: TargetSet::new(vec![
            "http://test.invalid/a.com".to_owned(),
            "http://test.invalid/b.com".to_owned(),
        ])?,
        headers: HeaderMap::new(),
        error_field: ERROR_FIELD.to_owned(),
    })
}

fn response(status: u16, body: &'static [u8]) -> Result<TransportResponse, HttpError> {
    Ok(TransportResponse {
        status,
        body: body.to_vec(),
    })
}

#[test]
fn coordinator_stops_all_workers_on_timeout() -> AppResult<()> {
    run_async_test(async {
        let (_shutdown_tx, shutdown_rx) = shutdown_channel();
        let report = tokio::time::timeout(
            RUN_DEADLINE,
            run_stress(
                plan(3, SHORT_RUN)?,
                ok_transport(),
                CancellationSignal::new(),
                shutdown_rx,
            ),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not finish: {}", err)))?;

        if report.workers_reported() != 3 || report.workers_spawned != 3 {
            return Err(AppError::validation(format!(
                "Unexpected worker count: {}",
                report.workers_reported()
            )));
        }
        if report
            .results
            .values()
            .any(|result| result.stop_reason != StopReason::Timeout)
        {
            return Err(AppError::validation("Expected every worker to time out"));
        }
        let summary = &report.summary;
        if summary.stop_reason != StopReason::Timeout || summary.total_requests == 0 {
            return Err(AppError::validation(format!(
                "Unexpected summary: {:?}",
                summary.stop_reason
            )));
        }
        if summary.failure_count != 0 {
            return Err(AppError::validation("Expected no failures"));
        }
        let logged = u64::try_from(report.responses().count()).unwrap_or(u64::MAX);
        if logged != summary.total_requests {
            return Err(AppError::validation(format!(
                "Expected one logged response per request, got {}/{}",
                logged, summary.total_requests
            )));
        }
        Ok(())
    })
}

#[test]
fn preset_signal_stops_run_before_any_request() -> AppResult<()> {
    run_async_test(async {
        let (_shutdown_tx, shutdown_rx) = shutdown_channel();
        let signal = CancellationSignal::new();
        signal.cancel(StopReason::Interrupted);

        let report = tokio::time::timeout(
            RUN_DEADLINE,
            run_stress(
                plan(4, Duration::from_secs(60))?,
                ok_transport(),
                signal,
                shutdown_rx,
            ),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not finish: {}", err)))?;

        if report
            .results
            .values()
            .any(|result| {
                result.stop_reason != StopReason::Interrupted || !result.outcomes.is_empty()
            })
        {
            return Err(AppError::validation("Expected idle interrupted workers"));
        }
        if report.summary.total_requests != 0 || report.summary.latency.is_some() {
            return Err(AppError::validation("Expected an empty summary"));
        }
        if report.summary.stop_reason != StopReason::Interrupted {
            return Err(AppError::validation("Expected interrupted run"));
        }
        Ok(())
    })
}

#[test]
fn failing_transport_counts_every_attempt_as_failure() -> AppResult<()> {
    run_async_test(async {
        let (_shutdown_tx, shutdown_rx) = shutdown_channel();
        let report = tokio::time::timeout(
            RUN_DEADLINE,
            run_stress(
                plan(2, Duration::from_millis(50))?,
                Arc::new(FailingTransport),
                CancellationSignal::new(),
                shutdown_rx,
            ),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not finish: {}", err)))?;

        if report.workers_reported() != 2 {
            return Err(AppError::validation(format!(
                "Expected both workers to report, got {}",
                report.workers_reported()
            )));
        }
        for result in report.results.values() {
            let attempts = u64::try_from(result.outcomes.len()).unwrap_or(u64::MAX);
            if attempts == 0 || result.failure_count != attempts {
                return Err(AppError::validation(format!(
                    "Worker {} recorded {} failures for {} attempts",
                    result.worker_id, result.failure_count, attempts
                )));
            }
            if result.stop_reason != StopReason::Timeout {
                return Err(AppError::validation(format!(
                    "Worker {} stopped with {}",
                    result.worker_id, result.stop_reason
                )));
            }
        }
        let summary = &report.summary;
        if summary.total_requests == 0 || summary.failure_count != summary.total_requests {
            return Err(AppError::validation(format!(
                "Expected every attempt to fail, got {}/{}",
                summary.failure_count, summary.total_requests
            )));
        }
        if report.responses().next().is_some() {
            return Err(AppError::validation("Failed requests should not be logged"));
        }
        if report.summary.stop_reason != StopReason::Timeout {
            return Err(AppError::validation("Expected timeout stop reason"));
        }
        Ok(())
    })
}

#[test]
fn interrupt_stops_run_as_interrupted() -> AppResult<()> {
    run_async_test(async {
        let (shutdown_tx, shutdown_rx) = shutdown_channel();
        let sender = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(shutdown_tx.send(()));
            shutdown_tx
        });

        let report = tokio::time::timeout(
            RUN_DEADLINE,
            run_stress(
                plan(2, Duration::from_secs(60))?,
                ok_transport(),
                CancellationSignal::new(),
                shutdown_rx,
            ),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not stop on interrupt: {}", err)))?;
        drop(sender.await?);

        if report.summary.stop_reason != StopReason::Interrupted {
            return Err(AppError::validation("Expected interrupted run"));
        }
        if report.workers_reported() != 2 {
            return Err(AppError::validation("Expected both workers to report"));
        }
        Ok(())
    })
}

#[test]
fn closed_interrupt_channel_is_not_an_interrupt() -> AppResult<()> {
    run_async_test(async {
        let (shutdown_tx, shutdown_rx) = shutdown_channel();
        drop(shutdown_tx);

        let report = tokio::time::timeout(
            RUN_DEADLINE,
            run_stress(
                plan(1, SHORT_RUN)?,
                ok_transport(),
                CancellationSignal::new(),
                shutdown_rx,
            ),
        )
        .await
        .map_err(|err| AppError::validation(format!("Run did not finish: {}", err)))?;

        if report.summary.stop_reason != StopReason::Timeout {
            return Err(AppError::validation(
                "Closed channel should not interrupt the run",
            ));
        }
        Ok(())
    })
}

#[test]
fn worker_with_elapsed_timeout_sends_nothing() -> AppResult<()> {
    run_async_test(async {
        let ctx = WorkerContext {
            worker_id: 7,
            targets: TargetSet::new(vec!["http://test.invalid/a.com".to_owned()])?,
            headers: Arc::new(HeaderMap::new()),
            transport: ok_transport(),
            signal: CancellationSignal::new(),
            timeout: Duration::ZERO,
            error_field: Arc::from(ERROR_FIELD),
        };
        let result = run_worker(ctx, StdRng::seed_from_u64(7)).await;
        if result.worker_id != 7 || !result.outcomes.is_empty() {
            return Err(AppError::validation("Expected an idle worker 7"));
        }
        if result.stop_reason != StopReason::Timeout {
            return Err(AppError::validation("Expected timeout stop reason"));
        }
        Ok(())
    })
}

#[test]
fn classify_accepts_ok_json_object() -> AppResult<()> {
    let (succeeded, body) = classify_response(response(200, br#"{"rank": 1}"#), ERROR_FIELD);
    if !succeeded || body.is_none() {
        return Err(AppError::validation("Expected logged success"));
    }
    Ok(())
}

#[test]
fn classify_logs_failed_json_objects() -> AppResult<()> {
    let (succeeded, body) = classify_response(
        response(200, br#"{"domain_error": "unknown domain"}"#),
        ERROR_FIELD,
    );
    if succeeded || body.is_none() {
        return Err(AppError::validation(
            "Error field should fail but still be logged",
        ));
    }

    let (succeeded, body) = classify_response(response(503, br#"{"rank": 1}"#), ERROR_FIELD);
    if succeeded || body.is_none() {
        return Err(AppError::validation(
            "Non-200 status should fail but still be logged",
        ));
    }
    Ok(())
}

#[test]
fn classify_rejects_non_object_bodies() -> AppResult<()> {
    let bodies: [&'static [u8]; 4] = [b"not json", b"[1, 2]", b"\"text\"", b""];
    for body in bodies {
        let (succeeded, logged) = classify_response(response(200, body), ERROR_FIELD);
        if succeeded || logged.is_some() {
            return Err(AppError::validation(format!(
                "Unexpected classification for {:?}",
                String::from_utf8_lossy(body)
            )));
        }
    }
    let (succeeded, logged) = classify_response(
        Err(HttpError::TestFailure { message: "reset" }),
        ERROR_FIELD,
    );
    if succeeded || logged.is_some() {
        return Err(AppError::validation("Transport errors must fail"));
    }
    Ok(())
}

#[test]
fn signal_keeps_first_reason() -> AppResult<()> {
    let signal = CancellationSignal::new();
    if signal.is_cancelled() || signal.reason().is_some() {
        return Err(AppError::validation("New signal should be running"));
    }
    if !signal.cancel(StopReason::Timeout) {
        return Err(AppError::validation("First cancel should win"));
    }
    if signal.cancel(StopReason::Interrupted) {
        return Err(AppError::validation("Second cancel should be a no-op"));
    }
    if signal.clone().reason() != Some(StopReason::Timeout) {
        return Err(AppError::validation("Clones should share the first reason"));
    }
    Ok(())
}

#[test]
fn signal_wakes_waiters() -> AppResult<()> {
    run_async_test(async {
        let signal = CancellationSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.cancelled().await })
        };
        tokio::task::yield_now().await;
        signal.cancel(StopReason::Interrupted);

        let reason = tokio::time::timeout(RUN_DEADLINE, waiter)
            .await
            .map_err(|err| AppError::validation(format!("Waiter never woke: {}", err)))??;
        if reason != StopReason::Interrupted {
            return Err(AppError::validation("Unexpected reason"));
        }
        Ok(())
    })
}

#[test]
fn outcomes_round_to_tenths() -> AppResult<()> {
    let cases = [(0, 0), (49, 0), (149, 100), (150, 200), (1234, 1200)];
    for (raw, rounded) in cases {
        let outcome = RequestOutcome::new(Duration::from_millis(raw), true);
        if outcome.elapsed != Duration::from_millis(rounded) {
            return Err(AppError::validation(format!(
                "{}ms rounded to {:?}",
                raw, outcome.elapsed
            )));
        }
    }
    Ok(())
}

#[test]
fn recorder_counts_failures_and_keeps_bodies() -> AppResult<()> {
    let mut recorder = RequestRecorder::new();
    recorder.record(RequestOutcome::new(Duration::from_millis(100), true), None);
    recorder.record(
        RequestOutcome::new(Duration::from_millis(200), false),
        Some(serde_json::Map::new()),
    );
    if recorder.len() != 2 || recorder.is_empty() {
        return Err(AppError::validation("Expected two outcomes"));
    }
    let result = recorder.finish(3, StopReason::Timeout);
    if result.failure_count != 1 || result.responses.len() != 1 {
        return Err(AppError::validation("Unexpected recorder result"));
    }
    Ok(())
}
