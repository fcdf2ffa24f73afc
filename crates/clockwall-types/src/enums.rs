//! Enumeration types shared between the clock core and its renderers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Clock variants
// ---------------------------------------------------------------------------

/// The rendering variant of a clock.
///
/// The variant decides two behaviors of the state machine: analog clocks
/// stop advancing while an edit mode is active, and only digital clocks
/// take part in the collection-wide bulk actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ClockKind {
    /// Seven-segment style readout with light and format controls.
    Digital,
    /// Clock face with rotating hands.
    Analog,
}

impl ClockKind {
    /// Whether the heartbeat is ignored while an edit mode is active.
    pub const fn suppresses_tick_while_editing(self) -> bool {
        matches!(self, Self::Analog)
    }

    /// Whether collection-wide reset and light actions apply to this kind.
    pub const fn supports_bulk_actions(self) -> bool {
        matches!(self, Self::Digital)
    }
}

impl core::fmt::Display for ClockKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Digital => f.write_str("digital"),
            Self::Analog => f.write_str("analog"),
        }
    }
}

// ---------------------------------------------------------------------------
// Edit mode
// ---------------------------------------------------------------------------

/// Which time unit is currently adjustable through the increase action.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EditMode {
    /// Nothing is being edited.
    #[default]
    Idle,
    /// The hours unit is being edited.
    Hours,
    /// The minutes unit is being edited.
    Minutes,
    /// The seconds unit is selected. Only reachable with
    /// [`EditCycle::HoursMinutesSeconds`].
    Seconds,
}

impl EditMode {
    /// Whether any unit is selected for editing.
    pub const fn is_editing(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// The fixed cycle that `toggle_edit_mode` walks through.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EditCycle {
    /// `idle -> hours -> minutes -> idle`.
    #[default]
    HoursMinutes,
    /// `idle -> hours -> minutes -> seconds -> idle`.
    HoursMinutesSeconds,
}

impl EditCycle {
    /// Number of states in the cycle, `idle` included.
    pub const fn state_count(self) -> usize {
        match self {
            Self::HoursMinutes => 3,
            Self::HoursMinutesSeconds => 4,
        }
    }

    /// The state that follows `mode` in this cycle.
    ///
    /// A mode that does not belong to the cycle falls back to
    /// [`EditMode::Idle`].
    pub const fn next(self, mode: EditMode) -> EditMode {
        match (self, mode) {
            (_, EditMode::Idle) => EditMode::Hours,
            (_, EditMode::Hours) => EditMode::Minutes,
            (Self::HoursMinutesSeconds, EditMode::Minutes) => EditMode::Seconds,
            (Self::HoursMinutes, EditMode::Minutes) | (_, EditMode::Seconds) => EditMode::Idle,
        }
    }
}

// ---------------------------------------------------------------------------
// Time format
// ---------------------------------------------------------------------------

/// How the hours unit is presented.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TimeFormat {
    /// 24-hour readout without an indicator.
    #[default]
    H24,
    /// 12-hour readout with an AM/PM indicator.
    AmPm,
}

impl TimeFormat {
    /// The other format.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::H24 => Self::AmPm,
            Self::AmPm => Self::H24,
        }
    }
}

/// Half of the day shown next to a 12-hour readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Meridiem {
    /// Before noon (hours 0 through 11).
    Am,
    /// Noon and after (hours 12 through 23).
    Pm,
}

impl Meridiem {
    /// Derive the indicator from a 24-hour value.
    pub const fn from_hours(hours: u8) -> Self {
        if hours < 12 { Self::Am } else { Self::Pm }
    }
}

impl core::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Am => f.write_str("AM"),
            Self::Pm => f.write_str("PM"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_state_cycle_returns_to_idle() {
        let cycle = EditCycle::HoursMinutes;
        let mut mode = EditMode::Idle;
        let mut visited = Vec::new();
        for _ in 0..cycle.state_count() {
            mode = cycle.next(mode);
            visited.push(mode);
        }
        assert_eq!(
            visited,
            vec![EditMode::Hours, EditMode::Minutes, EditMode::Idle]
        );
    }

    #[test]
    fn four_state_cycle_visits_seconds() {
        let cycle = EditCycle::HoursMinutesSeconds;
        let mut mode = EditMode::Idle;
        let mut visited = Vec::new();
        for _ in 0..cycle.state_count() {
            mode = cycle.next(mode);
            visited.push(mode);
        }
        assert_eq!(
            visited,
            vec![
                EditMode::Hours,
                EditMode::Minutes,
                EditMode::Seconds,
                EditMode::Idle
            ]
        );
    }

    #[test]
    fn foreign_mode_falls_back_to_idle() {
        assert_eq!(
            EditCycle::HoursMinutes.next(EditMode::Seconds),
            EditMode::Idle
        );
    }

    #[test]
    fn kind_capabilities() {
        assert!(ClockKind::Analog.suppresses_tick_while_editing());
        assert!(!ClockKind::Digital.suppresses_tick_while_editing());
        assert!(ClockKind::Digital.supports_bulk_actions());
        assert!(!ClockKind::Analog.supports_bulk_actions());
    }

    #[test]
    fn meridiem_boundaries() {
        assert_eq!(Meridiem::from_hours(0), Meridiem::Am);
        assert_eq!(Meridiem::from_hours(11), Meridiem::Am);
        assert_eq!(Meridiem::from_hours(12), Meridiem::Pm);
        assert_eq!(Meridiem::from_hours(23), Meridiem::Pm);
    }

    #[test]
    fn enums_serialize_snake_case() {
        let json = serde_json::to_string(&EditCycle::HoursMinutesSeconds).ok();
        assert_eq!(json.as_deref(), Some("\"hours_minutes_seconds\""));
        let json = serde_json::to_string(&TimeFormat::AmPm).ok();
        assert_eq!(json.as_deref(), Some("\"am_pm\""));
    }
}
