//! Time-related utilities with clock abstraction for testability.
//!
//! User-facing timestamps are rendered in IST (UTC+5:30), the timezone the
//! application's deployment targets.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in milliseconds
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_ist_timestamp()
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

/// Get current Unix timestamp (milliseconds)
pub fn get_ist_timestamp() -> i64 {
    let ist_offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap(); // IST is UTC+5:30
    let now_utc = Utc::now();
    let now_ist: DateTime<FixedOffset> = now_utc.with_timezone(&ist_offset);
    now_ist.timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to IST RFC 3339 format
pub fn timestamp_to_ist_rfc3339(timestamp_millis: i64) -> String {
    let ist_offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap(); // IST is UTC+5:30
    let seconds = timestamp_millis / 1000;
    let nanos = ((timestamp_millis % 1000) * 1_000_000) as u32;
    let dt = ist_offset.timestamp_opt(seconds, nanos).unwrap();
    dt.to_rfc3339()
}
