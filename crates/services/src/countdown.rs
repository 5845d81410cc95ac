use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time;

use crate::error::CountdownError;

/// Receives countdown events.
///
/// `on_tick` fires at start and then once per period while time remains;
/// `on_expire` fires once when the full duration has elapsed.
pub trait CountdownHandler: Send + 'static {
    fn on_tick(&self, remaining: Duration);
    fn on_expire(&self);
}

/// A running countdown backed by a tokio task.
///
/// Cancelling (or dropping) the countdown aborts the task: no tick or expiry
/// is delivered afterwards, except one that was already executing on another
/// worker thread.
#[derive(Debug)]
pub struct Countdown {
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Start counting down `total`, ticking every `period`.
    ///
    /// # Errors
    ///
    /// Returns `CountdownError::NoRuntime` outside a tokio runtime and
    /// `CountdownError::ZeroPeriod` for a zero period.
    pub fn start(
        total: Duration,
        period: Duration,
        handler: impl CountdownHandler,
    ) -> Result<Self, CountdownError> {
        if period.is_zero() {
            return Err(CountdownError::ZeroPeriod);
        }
        let runtime = Handle::try_current().map_err(|_| CountdownError::NoRuntime)?;
        let task = runtime.spawn(run(total, period, handler));
        Ok(Self { task: Some(task) })
    }

    /// Stop the countdown. Safe to call any number of times.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// True until the countdown expires or is cancelled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(total: Duration, period: Duration, handler: impl CountdownHandler) {
    // The first interval tick completes immediately, so the full duration is
    // reported at start.
    let mut interval = time::interval(period);
    let mut remaining = total;
    while !remaining.is_zero() {
        interval.tick().await;
        handler.on_tick(remaining);
        remaining = remaining.saturating_sub(period);
    }
    interval.tick().await;
    handler.on_expire();
}
