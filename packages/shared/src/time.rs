//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Utc};

/// Offset used when none is configured (JST, UTC+9).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current time in the clock's fixed zone
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses actual system time in a fixed zone)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Create a system clock reporting times at `hours` east of UTC.
    ///
    /// Returns `None` when the offset is out of range (more than 23 hours).
    pub fn with_utc_offset_hours(hours: i32) -> Option<Self> {
        utc_offset(hours).map(|offset| Self { offset })
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            offset: jst_offset(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Build a fixed offset `hours` east of UTC
pub fn utc_offset(hours: i32) -> Option<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
}

/// JST (UTC+9)
pub fn jst_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600).unwrap() // JST is UTC+9
}

/// Render a time as the chat line timestamp, `[YYYY-MM-DD HH:MM]`
pub fn format_chat_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format("[%Y-%m-%d %H:%M]").to_string()
}
