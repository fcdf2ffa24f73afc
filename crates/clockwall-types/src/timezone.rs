//! The fixed table of selectable time zones.
//!
//! Offsets span `GMT-12:00` to `GMT+14:00`, including the half-hour and
//! quarter-hour zones. Table order is display order.

use serde::Serialize;

/// One selectable time zone: a display label and its offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeZone {
    label: &'static str,
    offset_minutes: i32,
}

impl TimeZone {
    const fn new(label: &'static str, offset_minutes: i32) -> Self {
        Self {
            label,
            offset_minutes,
        }
    }

    /// Display label, e.g. `GMT+05:30`.
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Signed displacement from UTC in minutes.
    pub const fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

/// Number of entries in [`TIME_ZONES`].
pub const TIME_ZONE_COUNT: usize = 39;

/// Every selectable zone, west to east.
pub const TIME_ZONES: [TimeZone; TIME_ZONE_COUNT] = [
    TimeZone::new("GMT-12:00", -720),
    TimeZone::new("GMT-11:00", -660),
    TimeZone::new("GMT-10:00", -600),
    TimeZone::new("GMT-09:30", -570),
    TimeZone::new("GMT-09:00", -540),
    TimeZone::new("GMT-08:00", -480),
    TimeZone::new("GMT-07:00", -420),
    TimeZone::new("GMT-06:00", -360),
    TimeZone::new("GMT-05:00", -300),
    TimeZone::new("GMT-04:00", -240),
    TimeZone::new("GMT-03:30", -210),
    TimeZone::new("GMT-03:00", -180),
    TimeZone::new("GMT-02:00", -120),
    TimeZone::new("GMT-01:00", -60),
    TimeZone::new("GMT+00:00", 0),
    TimeZone::new("GMT+01:00", 60),
    TimeZone::new("GMT+02:00", 120),
    TimeZone::new("GMT+03:00", 180),
    TimeZone::new("GMT+03:30", 210),
    TimeZone::new("GMT+04:00", 240),
    TimeZone::new("GMT+04:30", 270),
    TimeZone::new("GMT+05:00", 300),
    TimeZone::new("GMT+05:30", 330),
    TimeZone::new("GMT+05:45", 345),
    TimeZone::new("GMT+06:00", 360),
    TimeZone::new("GMT+06:30", 390),
    TimeZone::new("GMT+07:00", 420),
    TimeZone::new("GMT+08:00", 480),
    TimeZone::new("GMT+08:45", 525),
    TimeZone::new("GMT+09:00", 540),
    TimeZone::new("GMT+09:30", 570),
    TimeZone::new("GMT+10:00", 600),
    TimeZone::new("GMT+10:30", 630),
    TimeZone::new("GMT+11:00", 660),
    TimeZone::new("GMT+12:00", 720),
    TimeZone::new("GMT+12:45", 765),
    TimeZone::new("GMT+13:00", 780),
    TimeZone::new("GMT+13:45", 825),
    TimeZone::new("GMT+14:00", 840),
];

/// The whole table in display order, for populating a selection control.
pub const fn time_zones() -> &'static [TimeZone] {
    &TIME_ZONES
}

/// Offset for a display label, if the label is in the table.
pub fn offset_for_label(label: &str) -> Option<i32> {
    TIME_ZONES
        .iter()
        .find(|zone| zone.label == label)
        .map(TimeZone::offset_minutes)
}

/// Display label for an offset, if the offset is in the table.
pub fn label_for_offset(offset_minutes: i32) -> Option<&'static str> {
    TIME_ZONES
        .iter()
        .find(|zone| zone.offset_minutes == offset_minutes)
        .map(TimeZone::label)
}
