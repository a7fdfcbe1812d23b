use chrono::{Local, NaiveDateTime};
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current time in milliseconds since UNIX epoch
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// Wall-clock source for the good-for-day pruning deadline.
///
/// The engine only ever asks for broken-down local time; injecting a fixed
/// clock makes the daily-close computation testable without waiting for the
/// actual close.
pub trait Clock: Send + Sync {
    /// Current instant as broken-down local time.
    fn local_now(&self) -> NaiveDateTime;
}

/// The real system clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
