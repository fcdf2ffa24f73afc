//! Renderer that writes clock frames to the log.
//!
//! Stands in for a display surface: each clock change produces one debug
//! record carrying the snapshot, the text readout and, for analog faces,
//! the three hand transforms.

use std::rc::Rc;

use clockwall_core::dial::HandTransforms;
use clockwall_core::display::DisplayTime;
use clockwall_core::transform::Point;
use clockwall_core::{Clock, ClockCollection, Observer};
use clockwall_types::ClockKind;
use tracing::{debug, info, warn};

/// Center of the analog face in renderer coordinates.
pub const DIAL_CENTER: Point = Point::new(100.0, 100.0);

/// Observer that logs every frame it is asked to draw.
#[derive(Debug, Clone, Copy)]
pub struct TraceRenderer {
    pivot: Point,
}

impl TraceRenderer {
    /// Create a renderer whose analog faces pivot on `pivot`.
    pub const fn new(pivot: Point) -> Self {
        Self { pivot }
    }

    /// Share the renderer as a clock observer.
    pub fn as_clock_observer(self: &Rc<Self>) -> Rc<dyn Observer<Clock>> {
        Rc::clone(self) as Rc<dyn Observer<Clock>>
    }

    /// Share the renderer as a collection observer.
    pub fn as_collection_observer(self: &Rc<Self>) -> Rc<dyn Observer<ClockCollection>> {
        Rc::clone(self) as Rc<dyn Observer<ClockCollection>>
    }

    /// One frame for `clock`: the readout, plus hand transforms for
    /// analog faces.
    pub fn frame(&self, clock: &Clock) -> Frame {
        let hands = match clock.kind() {
            ClockKind::Analog => Some(HandTransforms::for_clock(clock, self.pivot)),
            ClockKind::Digital => None,
        };
        Frame {
            readout: DisplayTime::of(clock),
            hands,
        }
    }
}

/// What a renderer draws for one clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Text readout.
    pub readout: DisplayTime,
    /// Hand transforms; `None` for digital faces.
    pub hands: Option<HandTransforms>,
}

impl Observer<Clock> for TraceRenderer {
    fn update(&self, clock: &Clock) {
        let snapshot = match serde_json::to_string(&clock.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                warn!(clock_id = %clock.id(), error = %e, "failed to serialize clock snapshot");
                return;
            }
        };
        let frame = self.frame(clock);
        match frame.hands {
            Some(hands) => debug!(
                clock_id = %clock.id(),
                readout = %frame.readout,
                light_on = clock.light_on(),
                hour = %hands.hour.to_svg_transform(),
                minute = %hands.minute.to_svg_transform(),
                second = %hands.second.to_svg_transform(),
                snapshot = %snapshot,
                "Analog frame"
            ),
            None => debug!(
                clock_id = %clock.id(),
                readout = %frame.readout,
                light_on = clock.light_on(),
                snapshot = %snapshot,
                "Digital frame"
            ),
        }
    }
}

impl Observer<ClockCollection> for TraceRenderer {
    fn update(&self, collection: &ClockCollection) {
        let order: Vec<String> = collection.ids().iter().map(ToString::to_string).collect();
        info!(clocks = collection.len(), order = ?order, "Clock layout changed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use clockwall_core::config::ClocksConfig;
    use clockwall_core::{ManualTimeSource, TimeSource};
    use clockwall_types::TimeFormat;

    use super::*;

    fn clock(kind: ClockKind) -> Clock {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 15, 0, 0).unwrap();
        let source: Rc<dyn TimeSource> = Rc::new(ManualTimeSource::new(start, 0));
        Clock::new(kind, 0, &ClocksConfig::default(), source)
    }

    #[test]
    fn digital_frame_has_no_hands() {
        let renderer = TraceRenderer::new(DIAL_CENTER);
        let frame = renderer.frame(&clock(ClockKind::Digital));
        assert_eq!(frame.readout.to_string(), "15:00:00");
        assert!(frame.hands.is_none());
    }

    #[test]
    fn analog_frame_points_hour_hand_at_three() {
        let renderer = TraceRenderer::new(DIAL_CENTER);
        let mut analog = clock(ClockKind::Analog);
        analog.toggle_time_format();
        assert_eq!(analog.time_format(), TimeFormat::AmPm);

        let frame = renderer.frame(&analog);
        assert_eq!(frame.readout.to_string(), "03:00:00 PM");
        let hour = frame.hands.unwrap().hour;
        // Quarter turn: sin = 1 sits in the b coefficient.
        assert!((hour.b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn renderer_subscribes_to_clocks() {
        let renderer = Rc::new(TraceRenderer::new(DIAL_CENTER));
        let mut digital = clock(ClockKind::Digital);
        digital.subscribe(renderer.as_clock_observer());
        assert_eq!(digital.observer_count(), 1);
        digital.tick();
    }
}
