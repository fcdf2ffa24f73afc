//! Per-clock state machine.
//!
//! A [`Clock`] holds one wall-clock time together with its edit mode, light
//! state, readout format and time-zone offset. Every mutation that changes
//! observable state is followed by a synchronous notification of the
//! clock's observers, which receive a `&Clock` and read whatever getters
//! they need.
//!
//! # Design Principles
//!
//! - The time triple is a [`WallTime`], so every unit stays inside its
//!   modulus after any mutation.
//! - Time is always derived from the UTC instant shifted by the clock's own
//!   offset, never from the host's local time.
//! - Variant behavior (analog tick suppression, edit-cycle length) is
//!   dispatched on [`ClockKind`] and the configured [`EditCycle`], not on a
//!   type hierarchy.

use std::cell::RefCell;
use std::rc::Rc;

use clockwall_types::{
    ClockId, ClockKind, ClockSnapshot, EditCycle, EditMode, TimeFormat, WallTime,
};
use tracing::{debug, warn};

use crate::config::ClocksConfig;
use crate::heartbeat::TickSubscriber;
use crate::observable::{Observable, Observer};
use crate::time_source::TimeSource;

/// A clock shared between its collection, the heartbeat and renderers.
pub type SharedClock = Rc<RefCell<Clock>>;

/// One clock on the page.
#[derive(Debug)]
pub struct Clock {
    id: ClockId,
    kind: ClockKind,
    time: WallTime,
    edit_mode: EditMode,
    edit_cycle: EditCycle,
    time_zone_offset_minutes: i32,
    light_on: bool,
    time_format: TimeFormat,
    time_source: Rc<dyn TimeSource>,
    observers: Observable<Self>,
}

impl Clock {
    /// Create a clock showing the current instant shifted by
    /// `time_zone_offset_minutes`.
    ///
    /// The clock starts idle with its light off, using the edit cycle and
    /// readout format configured for its kind.
    pub fn new(
        kind: ClockKind,
        time_zone_offset_minutes: i32,
        config: &ClocksConfig,
        time_source: Rc<dyn TimeSource>,
    ) -> Self {
        let time = WallTime::at_offset(time_source.now(), time_zone_offset_minutes);
        Self {
            id: ClockId::new(),
            kind,
            time,
            edit_mode: EditMode::Idle,
            edit_cycle: config.edit_cycle_for(kind),
            time_zone_offset_minutes,
            light_on: false,
            time_format: config.default_time_format,
            time_source,
            observers: Observable::new(),
        }
    }

    /// Wrap the clock for sharing with the heartbeat and renderers.
    pub fn into_shared(self) -> SharedClock {
        Rc::new(RefCell::new(self))
    }

    // -----------------------------------------------------------------------
    // Getters
    // -----------------------------------------------------------------------

    /// Stable identity, generated at creation.
    pub const fn id(&self) -> ClockId {
        self.id
    }

    /// Rendering variant.
    pub const fn kind(&self) -> ClockKind {
        self.kind
    }

    /// The current time triple.
    pub const fn time(&self) -> WallTime {
        self.time
    }

    /// Hours in `[0, 24)`.
    pub const fn hours(&self) -> u8 {
        self.time.hours()
    }

    /// Minutes in `[0, 60)`.
    pub const fn minutes(&self) -> u8 {
        self.time.minutes()
    }

    /// Seconds in `[0, 60)`.
    pub const fn seconds(&self) -> u8 {
        self.time.seconds()
    }

    /// Unit currently selected for editing.
    pub const fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Cycle walked by [`toggle_edit_mode`](Self::toggle_edit_mode).
    pub const fn edit_cycle(&self) -> EditCycle {
        self.edit_cycle
    }

    /// Signed displacement from UTC in minutes.
    pub const fn time_zone_offset_minutes(&self) -> i32 {
        self.time_zone_offset_minutes
    }

    /// Whether the backlight is on.
    pub const fn light_on(&self) -> bool {
        self.light_on
    }

    /// 24-hour or AM/PM readout.
    pub const fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// Serializable copy of every attribute.
    pub const fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            id: self.id,
            kind: self.kind,
            hours: self.time.hours(),
            minutes: self.time.minutes(),
            seconds: self.time.seconds(),
            edit_mode: self.edit_mode,
            light_on: self.light_on,
            time_format: self.time_format,
            time_zone_offset_minutes: self.time_zone_offset_minutes,
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register an observer notified after every change.
    pub fn subscribe(&mut self, observer: Rc<dyn Observer<Self>>) {
        self.observers.subscribe(observer);
    }

    /// Remove an observer. Silent if it was never subscribed.
    pub fn unsubscribe(&mut self, observer: &Rc<dyn Observer<Self>>) {
        self.observers.unsubscribe(observer);
    }

    /// Number of subscribed observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self) {
        self.observers.notify(self);
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Advance by one second, carrying into minutes and hours.
    ///
    /// Analog clocks do not advance while an edit mode is active, so the
    /// heartbeat does not fight the user. Returns whether the time moved.
    pub fn tick(&mut self) -> bool {
        if self.kind.suppresses_tick_while_editing() && self.edit_mode.is_editing() {
            return false;
        }
        self.time = self.time.advance_one_second();
        self.notify();
        true
    }

    /// Move to the next state of the edit cycle.
    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = self.edit_cycle.next(self.edit_mode);
        debug!(clock_id = %self.id, edit_mode = ?self.edit_mode, "Edit mode toggled");
        self.notify();
    }

    /// Increment the unit being edited.
    ///
    /// Hours wrap at 24 and minutes at 60, without carry. Does nothing and
    /// does not notify when idle. The seconds mode selects but never
    /// changes the seconds unit.
    pub fn increase_value(&mut self) {
        match self.edit_mode {
            EditMode::Idle => return,
            EditMode::Hours => self.time = self.time.with_next_hour(),
            EditMode::Minutes => self.time = self.time.with_next_minute(),
            EditMode::Seconds => {}
        }
        self.notify();
    }

    /// Recompute the time from the current instant and the clock's offset.
    pub fn reset(&mut self) {
        self.resync();
        self.notify();
    }

    /// Flip the backlight.
    pub fn toggle_light_state(&mut self) {
        self.light_on = !self.light_on;
        self.notify();
    }

    /// Turn the backlight off. No notification if it is already off.
    pub fn reset_light_state(&mut self) {
        if !self.light_on {
            return;
        }
        self.light_on = false;
        self.notify();
    }

    /// Switch between 24-hour and AM/PM readouts.
    pub fn toggle_time_format(&mut self) {
        self.time_format = self.time_format.toggled();
        self.notify();
    }

    /// Move the clock to another time zone and resynchronize its time.
    ///
    /// Setting the current offset again is a no-op without notification.
    pub fn set_time_zone_offset(&mut self, offset_minutes: i32) {
        if offset_minutes == self.time_zone_offset_minutes {
            return;
        }
        self.time_zone_offset_minutes = offset_minutes;
        self.resync();
        debug!(clock_id = %self.id, offset_minutes, time = %self.time, "Time zone changed");
        self.notify();
    }

    fn resync(&mut self) {
        self.time = WallTime::at_offset(self.time_source.now(), self.time_zone_offset_minutes);
    }
}

impl TickSubscriber for RefCell<Clock> {
    fn on_tick(&self) {
        // Ticks arrive on the same thread as user actions; a held borrow
        // means a re-entrant tick, which is skipped.
        match self.try_borrow_mut() {
            Ok(mut clock) => {
                clock.tick();
            }
            Err(_) => warn!("Clock busy during heartbeat tick, tick skipped"),
        }
    }
}
