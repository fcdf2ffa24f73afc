//! Analog dial geometry: hand angles, hand transforms, tick marks and
//! hour labels.
//!
//! Hands are drawn pointing at 12 o'clock, so their rotation starts at 0.
//! Marks and labels are placed by polar angle, whose 0 points at
//! 3 o'clock, so those angles carry a quarter-turn back.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use clockwall_types::WallTime;

use crate::clock::Clock;
use crate::transform::{AffineCoefficients, Matrix3, Point, TransformError, unit_angle};

/// Hour positions on the dial.
pub const HOURS_ON_DIAL: u8 = 12;

/// Hour-hand rotation in radians. The hand moves continuously through
/// the hour: `(hours mod 12 + minutes / 60) × 30°`.
pub fn hour_hand_angle(hours: u8, minutes: u8) -> f64 {
    let position = f64::from(hours % HOURS_ON_DIAL) + f64::from(minutes) / 60.0;
    position * (TAU / f64::from(HOURS_ON_DIAL))
}

/// Minute-hand rotation in radians: `(minutes + seconds / 60) × 6°`.
pub fn minute_hand_angle(minutes: u8, seconds: u8) -> f64 {
    let position = f64::from(minutes) + f64::from(seconds) / 60.0;
    position * (TAU / 60.0)
}

/// Second-hand rotation in radians: `seconds × 6°`.
pub fn second_hand_angle(seconds: u8) -> f64 {
    f64::from(seconds) * (TAU / 60.0)
}

/// The three hand transforms for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandTransforms {
    /// Hour hand.
    pub hour: AffineCoefficients,
    /// Minute hand.
    pub minute: AffineCoefficients,
    /// Second hand.
    pub second: AffineCoefficients,
}

impl HandTransforms {
    /// Transforms showing `time` on a face centered at `pivot`.
    pub fn for_time(time: WallTime, pivot: Point) -> Self {
        let hand = |angle| Matrix3::rotation_about(angle, pivot).affine_coefficients();
        Self {
            hour: hand(hour_hand_angle(time.hours(), time.minutes())),
            minute: hand(minute_hand_angle(time.minutes(), time.seconds())),
            second: hand(second_hand_angle(time.seconds())),
        }
    }

    /// Transforms for the clock's current time.
    pub fn for_clock(clock: &Clock, pivot: Point) -> Self {
        Self::for_time(clock.time(), pivot)
    }
}

/// Where a mark at `index` of `count` sits on a circle of `radius`
/// around `pivot`, with index 0 at 12 o'clock.
///
/// # Errors
///
/// Returns [`TransformError::InvalidModulus`] when `count` is zero.
pub fn dial_position(
    index: u16,
    count: u16,
    radius: f64,
    pivot: Point,
) -> Result<Point, TransformError> {
    let angle = unit_angle(f64::from(index), f64::from(count))? - FRAC_PI_2;
    let placement = Matrix3::translation(pivot.x, pivot.y) * Matrix3::rotation(angle);
    Ok(placement.apply(Point::new(radius, 0.0)))
}

/// Evenly spaced tick marks, the first at 12 o'clock and proceeding
/// clockwise.
///
/// # Errors
///
/// Returns [`TransformError::InvalidModulus`] when `count` is zero.
pub fn dial_marks(count: u16, radius: f64, pivot: Point) -> Result<Vec<Point>, TransformError> {
    (0..count)
        .map(|index| dial_position(index, count, radius, pivot))
        .collect()
}

/// A numeral on the dial and its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourLabel {
    /// The numeral, 1 through 12.
    pub hour: u8,
    /// Anchor position for the text.
    pub position: Point,
}

/// The twelve hour labels, starting with 12 at the top.
pub fn hour_labels(radius: f64, pivot: Point) -> Vec<HourLabel> {
    (0..HOURS_ON_DIAL)
        .map(|index| {
            let angle = f64::from(index) * (TAU / f64::from(HOURS_ON_DIAL)) - FRAC_PI_2;
            let placement = Matrix3::translation(pivot.x, pivot.y) * Matrix3::rotation(angle);
            HourLabel {
                hour: if index == 0 { HOURS_ON_DIAL } else { index },
                position: placement.apply(Point::new(radius, 0.0)),
            }
        })
        .collect()
}
