//! Periodic signed URL refresh.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Owns the refresh task. Dropping the timer stops it.
#[derive(Debug)]
pub struct RefreshTimer {
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    /// Call `on_tick` every `period`, first one `period` from now. The task
    /// ends on its own once `on_tick` returns `false`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(period: Duration, on_tick: F) -> Self
    where
        F: Fn() -> bool + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::debug!(period_secs = period.as_secs(), "Refreshing signed URL");
                if !on_tick() {
                    break;
                }
            }
        });
        tracing::info!(period_secs = period.as_secs(), "Signed URL refresh started");
        Self { handle }
    }

    /// Whether the task is still alive.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Signed URL refresh stopped");
    }
}
