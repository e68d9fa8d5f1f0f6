//! One-second progress ticker.
//!
//! Wraps a `tokio::time::Interval` that only exists while playback runs.
//! Disarming drops the interval, so no tick can fire while paused; arming
//! always starts a fresh period.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Default tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Cancellable periodic tick source
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    /// Create a disarmed ticker
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Start (or restart) ticking; the first tick fires one period from now
    pub fn arm(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        // A stalled loop delays later ticks instead of bursting to catch up
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Stop ticking
    pub fn disarm(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick
    ///
    /// Never completes while disarmed. Cancel-safe, so it can sit in a
    /// `tokio::select!` next to the command channel.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
