use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::Serialize;
use tokio::sync::Notify;

const RUNNING: u8 = 0;
const STOPPED_TIMEOUT: u8 = 1;
const STOPPED_INTERRUPTED: u8 = 2;

/// Why a worker (or the whole run) stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Timeout,
    Interrupted,
}

impl StopReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StopReason::Timeout => "timeout",
            StopReason::Interrupted => "keyboard interrupt",
        }
    }

    const fn as_state(self) -> u8 {
        match self {
            StopReason::Timeout => STOPPED_TIMEOUT,
            StopReason::Interrupted => STOPPED_INTERRUPTED,
        }
    }

    const fn from_state(state: u8) -> Option<Self> {
        match state {
            STOPPED_TIMEOUT => Some(StopReason::Timeout),
            STOPPED_INTERRUPTED => Some(StopReason::Interrupted),
            _ => None,
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared, monotonic stop flag.
///
/// The flag moves from running to stopped exactly once; the first
/// `cancel` wins and later calls are no-ops. Workers poll it between
/// requests, so a stop takes effect after at most one in-flight request.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    inner: Arc<SignalState>,
}

#[derive(Debug, Default)]
struct SignalState {
    state: AtomicU8,
    notify: Notify,
}

impl CancellationSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag with `reason` unless it is already set.
    ///
    /// Returns `true` when this call was the one that set it.
    pub fn cancel(&self, reason: StopReason) -> bool {
        let won = self
            .inner
            .state
            .compare_exchange(
                RUNNING,
                reason.as_state(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if won {
            self.inner.notify.notify_waiters();
        }
        won
    }

    /// The reason the flag was set with, if it has been set.
    #[must_use]
    pub fn reason(&self) -> Option<StopReason> {
        StopReason::from_state(self.inner.state.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    /// Resolves once the flag is set.
    pub async fn cancelled(&self) -> StopReason {
        loop {
            let notified = self.inner.notify.notified();
            if let Some(reason) = self.reason() {
                return reason;
            }
            notified.await;
        }
    }
}
