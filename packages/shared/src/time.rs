//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Utc};

/// Offset used when rendering timestamps for humans (JST, UTC+9).
const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Current Unix timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a Unix timestamp (milliseconds) as RFC 3339 in the display offset.
///
/// Returns `None` when the timestamp is out of chrono's representable range.
pub fn millis_to_rfc3339(timestamp_millis: i64) -> Option<String> {
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS)?;
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_millis)?;
    Some(utc.with_timezone(&offset).to_rfc3339())
}

/// Render the time-of-day part (`HH:MM:SS`) of a timestamp in the display offset.
pub fn millis_to_clock_time(timestamp_millis: i64) -> Option<String> {
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS)?;
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_millis)?;
    Some(utc.with_timezone(&offset).format("%H:%M:%S").to_string())
}
