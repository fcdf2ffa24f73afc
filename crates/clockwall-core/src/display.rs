//! Text readout for digital faces.

use std::fmt;

use serde::Serialize;

use clockwall_types::{EditMode, Meridiem, TimeFormat, WallTime};

use crate::clock::Clock;

/// The readout of one clock, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTime {
    /// Two-digit hours, already converted for the readout format.
    pub hours: String,
    /// Two-digit minutes.
    pub minutes: String,
    /// Two-digit seconds.
    pub seconds: String,
    /// `AM`/`PM` indicator; `None` in 24-hour format.
    pub meridiem: Option<Meridiem>,
    /// The unit currently being edited, which a renderer blinks.
    pub editing: Option<EditMode>,
}

impl DisplayTime {
    /// Format `time` for `format`.
    ///
    /// In 12-hour format, hours past 12 are shown modulo 12. Midnight
    /// therefore reads `00` and noon reads `12`.
    pub fn new(time: WallTime, format: TimeFormat, edit_mode: EditMode) -> Self {
        let (hours, meridiem) = match format {
            TimeFormat::H24 => (time.hours(), None),
            TimeFormat::AmPm => {
                let hours = if time.hours() > 12 {
                    time.hours() % 12
                } else {
                    time.hours()
                };
                (hours, Some(Meridiem::from_hours(time.hours())))
            }
        };
        Self {
            hours: pad_unit(hours),
            minutes: pad_unit(time.minutes()),
            seconds: pad_unit(time.seconds()),
            meridiem,
            editing: edit_mode.is_editing().then_some(edit_mode),
        }
    }

    /// Readout for a clock's current state.
    pub fn of(clock: &Clock) -> Self {
        Self::new(clock.time(), clock.time_format(), clock.edit_mode())
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)?;
        if let Some(meridiem) = self.meridiem {
            write!(f, " {meridiem}")?;
        }
        Ok(())
    }
}

fn pad_unit(value: u8) -> String {
    format!("{value:02}")
}
