//! Core value structs: the wall-clock time triple and the renderer-facing
//! clock snapshot.

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ClockKind, EditMode, TimeFormat};
use crate::ids::ClockId;

/// Modulus of the hours unit.
pub const HOURS_PER_DAY: u8 = 24;

/// Modulus of the minutes unit.
pub const MINUTES_PER_HOUR: u8 = 60;

/// Modulus of the seconds unit.
pub const SECONDS_PER_MINUTE: u8 = 60;

/// A time of day with every unit kept inside its modulus.
///
/// All mutation goes through wrapping steps, so the invariant
/// `hours < 24 && minutes < 60 && seconds < 60` holds for every value
/// that can be constructed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct WallTime {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl WallTime {
    /// `00:00:00`.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Build a time from its units, or `None` if any unit is out of range.
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours >= HOURS_PER_DAY || minutes >= MINUTES_PER_HOUR || seconds >= SECONDS_PER_MINUTE
        {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Read the time of day off `instant` shifted by `offset_minutes`.
    ///
    /// The shift is applied to the UTC instant itself, so the result never
    /// depends on the host's own time zone. An offset that would push the
    /// instant outside chrono's range leaves it unshifted.
    pub fn at_offset(instant: DateTime<Utc>, offset_minutes: i32) -> Self {
        let shifted = instant
            .checked_add_signed(TimeDelta::minutes(i64::from(offset_minutes)))
            .unwrap_or(instant);
        Self {
            hours: u8::try_from(shifted.hour()).unwrap_or(0),
            minutes: u8::try_from(shifted.minute()).unwrap_or(0),
            seconds: u8::try_from(shifted.second()).unwrap_or(0),
        }
    }

    /// Hours in `[0, 24)`.
    pub const fn hours(self) -> u8 {
        self.hours
    }

    /// Minutes in `[0, 60)`.
    pub const fn minutes(self) -> u8 {
        self.minutes
    }

    /// Seconds in `[0, 60)`.
    pub const fn seconds(self) -> u8 {
        self.seconds
    }

    /// One second later, carrying into minutes and hours and wrapping at
    /// midnight.
    #[must_use]
    pub const fn advance_one_second(self) -> Self {
        let (seconds, carry_minute) = step(self.seconds, SECONDS_PER_MINUTE);
        if !carry_minute {
            return Self { seconds, ..self };
        }
        let (minutes, carry_hour) = step(self.minutes, MINUTES_PER_HOUR);
        if !carry_hour {
            return Self {
                minutes,
                seconds,
                ..self
            };
        }
        let (hours, _) = step(self.hours, HOURS_PER_DAY);
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Hours incremented by one (mod 24), without carry.
    #[must_use]
    pub const fn with_next_hour(self) -> Self {
        let (hours, _) = step(self.hours, HOURS_PER_DAY);
        Self { hours, ..self }
    }

    /// Minutes incremented by one (mod 60), without carry into hours.
    #[must_use]
    pub const fn with_next_minute(self) -> Self {
        let (minutes, _) = step(self.minutes, MINUTES_PER_HOUR);
        Self { minutes, ..self }
    }
}

impl core::fmt::Display for WallTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Increment `value` by one inside `[0, modulus)`, reporting wraparound.
const fn step(value: u8, modulus: u8) -> (u8, bool) {
    let next = value.saturating_add(1);
    if next >= modulus { (0, true) } else { (next, false) }
}

/// Read-only view of one clock, handed to renderers and serialized for the
/// browser side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClockSnapshot {
    /// Stable identity of the clock.
    pub id: ClockId,
    /// Rendering variant.
    pub kind: ClockKind,
    /// Hours in `[0, 24)`.
    pub hours: u8,
    /// Minutes in `[0, 60)`.
    pub minutes: u8,
    /// Seconds in `[0, 60)`.
    pub seconds: u8,
    /// Unit currently selected for editing.
    pub edit_mode: EditMode,
    /// Whether the backlight is on.
    pub light_on: bool,
    /// 24-hour or AM/PM readout.
    pub time_format: TimeFormat,
    /// Signed displacement from UTC, in minutes.
    pub time_zone_offset_minutes: i32,
}
