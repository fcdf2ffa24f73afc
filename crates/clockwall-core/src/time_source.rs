//! Sources of the current instant.
//!
//! Clocks never read the system time directly. They go through a
//! [`TimeSource`] so that tests and replays can pin the instant and the
//! host's local offset.

use std::cell::Cell;
use std::fmt;

use chrono::{DateTime, Local, TimeDelta, Utc};

/// Provider of the current UTC instant and the host's local offset.
pub trait TimeSource: fmt::Debug {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// The host's current displacement from UTC in minutes. Used as the
    /// offset for clocks created without an explicit time zone.
    fn local_offset_minutes(&self) -> i32;
}

/// Time source backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    /// Create a new system time source.
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset_minutes(&self) -> i32 {
        Local::now()
            .offset()
            .local_minus_utc()
            .checked_div(60)
            .unwrap_or(0)
    }
}

/// Time source whose instant only moves when told to.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use clockwall_core::time_source::{ManualTimeSource, TimeSource};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
/// let source = ManualTimeSource::new(start, 60);
/// source.advance(TimeDelta::seconds(5));
/// assert_eq!(source.now(), start + TimeDelta::seconds(5));
/// assert_eq!(source.local_offset_minutes(), 60);
/// ```
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    now: Cell<DateTime<Utc>>,
    local_offset_minutes: i32,
}

impl ManualTimeSource {
    /// Create a source pinned at `start` with the given host offset.
    pub const fn new(start: DateTime<Utc>, local_offset_minutes: i32) -> Self {
        Self {
            now: Cell::new(start),
            local_offset_minutes,
        }
    }

    /// Move the instant to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.set(instant);
    }

    /// Move the instant forward by `delta`. Saturates at chrono's range.
    pub fn advance(&self, delta: TimeDelta) {
        let current = self.now.get();
        self.now
            .set(current.checked_add_signed(delta).unwrap_or(current));
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn local_offset_minutes(&self) -> i32 {
        self.local_offset_minutes
    }
}
