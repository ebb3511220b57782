//! Clock and uptime tracking
//!
//! Wall-clock time is used for response timestamps, monotonic time for uptime.
//! Both come from an injectable [`Clock`] so handlers can be tested without sleeping.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Source of wall-clock and monotonic time
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    /// Current monotonic instant
    fn instant(&self) -> Instant;
}

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Process start time, captured once at boot
#[derive(Debug, Clone, Copy)]
pub struct UptimeTracker {
    started: Instant,
}

impl UptimeTracker {
    /// Record the start instant from the given clock
    pub fn start(clock: &dyn Clock) -> Self {
        Self {
            started: clock.instant(),
        }
    }

    /// Elapsed time since start, never negative
    pub fn uptime(&self, clock: &dyn Clock) -> Duration {
        clock.instant().saturating_duration_since(self.started)
    }
}

/// Round to the nearest second and render as `1h2m3s`
///
/// Leading zero units are dropped (`2m5s`, `5s`); zero renders as `0s`.
/// Halves round up.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs() + u64::from(uptime.subsec_nanos() >= 500_000_000);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
