use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use tokio::time::Instant;
use tracing::debug;

use crate::error::HttpError;
use crate::http::{Transport, TransportResponse};
use crate::targets::TargetSet;

use super::recorder::{RequestOutcome, RequestRecorder, WorkerId, WorkerResult};
use super::signal::{CancellationSignal, StopReason};

const HTTP_OK: u16 = 200;

/// Everything one worker needs; all shared parts are read-only.
#[derive(Clone)]
pub struct WorkerContext {
    pub worker_id: WorkerId,
    pub targets: TargetSet,
    pub headers: Arc<HeaderMap>,
    pub transport: Arc<dyn Transport>,
    pub signal: CancellationSignal,
    pub timeout: Duration,
    pub error_field: Arc<str>,
}

/// Runs the request loop until the signal is set or `timeout` elapses.
///
/// The signal is checked before every request, which also makes it the
/// check that follows the previous request. A set signal reports the
/// reason it was set with; otherwise an elapsed timeout reports
/// [`StopReason::Timeout`].
pub async fn run_worker<R>(ctx: WorkerContext, mut rng: R) -> WorkerResult
where
    R: Rng + Send,
{
    let started = Instant::now();
    let mut recorder = RequestRecorder::new();
    debug!("Worker {} started", ctx.worker_id);

    let stop_reason = loop {
        if let Some(reason) = ctx.signal.reason() {
            break reason;
        }
        if started.elapsed() >= ctx.timeout {
            break StopReason::Timeout;
        }

        let url = ctx.targets.pick(&mut rng);
        let request_start = Instant::now();
        let result = ctx.transport.get(url, &ctx.headers).await;
        let elapsed = request_start.elapsed();

        let (succeeded, response) = classify_response(result, &ctx.error_field);
        recorder.record(RequestOutcome::new(elapsed, succeeded), response);

        // A transport that fails without awaiting would otherwise never
        // hand the thread back to the coordinator's timer.
        tokio::task::yield_now().await;
    };

    debug!(
        "Worker {} stopped ({}) after {} requests",
        ctx.worker_id,
        stop_reason,
        recorder.len()
    );
    recorder.finish(ctx.worker_id, stop_reason)
}

/// Decides whether a request succeeded and which body, if any, to log.
///
/// A request fails on a transport error, a non-200 status, a body that is
/// not a JSON object, or a JSON object containing `error_field`. JSON
/// object bodies are returned for the response log even when the request
/// failed.
pub fn classify_response(
    result: Result<TransportResponse, HttpError>,
    error_field: &str,
) -> (bool, Option<Map<String, Value>>) {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            debug!("Request failed: {}", err);
            return (false, None);
        }
    };

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(body)) => {
            let succeeded = response.status == HTTP_OK && !body.contains_key(error_field);
            (succeeded, Some(body))
        }
        Ok(
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_),
        ) => {
            debug!(
                "Response with status {} was not a JSON object",
                response.status
            );
            (false, None)
        }
        Err(err) => {
            debug!(
                "Response with status {} was not valid JSON: {}",
                response.status, err
            );
            (false, None)
        }
    }
}
