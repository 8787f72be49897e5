//! Ticking clock display.
//!
//! A background task samples a time source on a fixed period and publishes the
//! reading through a watch channel. The editor and the header display share it.

use std::time::Duration;

use chrono::NaiveTime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default tick period.
pub const TICK: Duration = Duration::from_secs(1);

/// 12-hour display format, e.g. `07:04:03 PM`.
pub const DISPLAY_FORMAT: &str = "%I:%M:%S %p";

/// Current local wall-clock time of day.
pub fn local_now() -> NaiveTime {
    chrono::Local::now().time()
}

/// Render a time for the clock display.
pub fn format_display(time: NaiveTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}

/// A running clock. The ticker stops when the clock is dropped.
pub struct Clock {
    rx: watch::Receiver<NaiveTime>,
    handle: JoinHandle<()>,
}

impl Clock {
    /// Start a clock on local time with the given period.
    pub fn spawn(period: Duration) -> Self {
        Self::spawn_with(period, local_now)
    }

    /// Start a clock reading from a custom time source.
    pub fn spawn_with<F>(period: Duration, source: F) -> Self
    where
        F: Fn() -> NaiveTime + Send + 'static,
    {
        let (tx, rx) = watch::channel(source());

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the initial reading is already published.
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(source()).is_err() {
                    tracing::debug!("Clock has no receivers, stopping");
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// Latest reading.
    pub fn now(&self) -> NaiveTime {
        *self.rx.borrow()
    }

    /// Latest reading formatted for display.
    pub fn display(&self) -> String {
        format_display(self.now())
    }

    /// A receiver that wakes on every tick.
    pub fn subscribe(&self) -> watch::Receiver<NaiveTime> {
        self.rx.clone()
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
