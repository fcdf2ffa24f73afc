//! The ordered set of live clocks.
//!
//! [`ClockCollection`] creates clocks, subscribes them to the heartbeat,
//! disposes them on removal and runs the bulk actions. Insertion order is
//! display order; [`ClockCollection::reorder_clocks`] swaps two entries for
//! drag-and-drop.
//!
//! The collection is itself observable: adding, removing or reordering
//! clocks notifies collection observers. Changes inside a clock notify
//! that clock's own observers instead.

use std::rc::Rc;

use clockwall_types::{ClockId, ClockKind};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SharedClock};
use crate::config::ClocksConfig;
use crate::heartbeat::{Heartbeat, TickSubscriber};
use crate::observable::{Observable, Observer};
use crate::reorder::SwapPlan;
use crate::time_source::TimeSource;

/// A live clock with the attributes that never change after creation.
///
/// Lookups read `id` and `kind` from here, so they work while the clock
/// itself is mutably borrowed by a tick or a bulk action.
#[derive(Debug, Clone)]
struct Entry {
    id: ClockId,
    kind: ClockKind,
    clock: SharedClock,
}

/// Owner of every live clock on the page.
#[derive(Debug)]
pub struct ClockCollection {
    entries: Vec<Entry>,
    heartbeat: Rc<Heartbeat>,
    time_source: Rc<dyn TimeSource>,
    config: ClocksConfig,
    observers: Observable<Self>,
}

impl ClockCollection {
    /// Create an empty collection whose clocks tick on `heartbeat`.
    pub fn new(
        heartbeat: Rc<Heartbeat>,
        time_source: Rc<dyn TimeSource>,
        config: ClocksConfig,
    ) -> Self {
        Self {
            entries: Vec::new(),
            heartbeat,
            time_source,
            config,
            observers: Observable::new(),
        }
    }

    /// Create a clock, append it and subscribe it to the heartbeat.
    ///
    /// Without an explicit offset the clock uses the host's local offset.
    pub fn add_clock(&mut self, kind: ClockKind, time_zone_offset_minutes: Option<i32>) -> SharedClock {
        let offset = time_zone_offset_minutes
            .unwrap_or_else(|| self.time_source.local_offset_minutes());
        let clock = Clock::new(kind, offset, &self.config, Rc::clone(&self.time_source)).into_shared();
        let id = clock.borrow().id();

        self.heartbeat.subscribe(Rc::clone(&clock) as Rc<dyn TickSubscriber>);
        self.entries.push(Entry {
            id,
            kind,
            clock: Rc::clone(&clock),
        });

        info!(clock_id = %id, %kind, offset_minutes = offset, total = self.entries.len(), "Clock added");
        self.notify();
        clock
    }

    /// Remove the clock with `id` and dispose of it.
    ///
    /// The clock is unsubscribed from the heartbeat before this returns.
    /// Returns the removed clock, or `None` if no clock has that id.
    pub fn remove_clock(&mut self, id: ClockId) -> Option<SharedClock> {
        let index = self.position(id)?;
        let Entry { clock, .. } = self.entries.remove(index);
        self.dispose(&clock);

        info!(clock_id = %id, total = self.entries.len(), "Clock removed");
        self.notify();
        Some(clock)
    }

    /// The live clocks in display order.
    pub fn clocks(&self) -> impl Iterator<Item = &SharedClock> {
        self.entries.iter().map(|entry| &entry.clock)
    }

    /// Identities of the live clocks in display order.
    pub fn ids(&self) -> Vec<ClockId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// The clock with `id`, if present.
    pub fn get(&self, id: ClockId) -> Option<SharedClock> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| Rc::clone(&entry.clock))
    }

    /// Number of live clocks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no clocks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The heartbeat the clocks tick on.
    pub const fn heartbeat(&self) -> &Rc<Heartbeat> {
        &self.heartbeat
    }

    // -----------------------------------------------------------------------
    // Bulk actions
    // -----------------------------------------------------------------------

    /// Resynchronize every digital clock with the current instant.
    pub fn reset_all_clocks(&self) {
        let affected = self.for_each_bulk_target(Clock::reset);
        debug!(affected, "All clocks reset");
    }

    /// Flip the light of every digital clock.
    pub fn toggle_all_lights(&self) {
        let affected = self.for_each_bulk_target(Clock::toggle_light_state);
        debug!(affected, "All lights toggled");
    }

    /// Turn off the light of every digital clock. Clocks already off are
    /// not notified.
    pub fn reset_all_lights(&self) {
        let affected = self.for_each_bulk_target(Clock::reset_light_state);
        debug!(affected, "All lights reset");
    }

    /// Apply `action` to every clock whose kind supports bulk actions,
    /// skipping the others. Returns how many clocks were visited.
    ///
    /// A clock that is already borrowed, because the action was started
    /// from inside one of its own observers, is skipped with a warning.
    fn for_each_bulk_target(&self, action: fn(&mut Clock)) -> usize {
        // Snapshot so an observer reacting to the action cannot invalidate
        // the iteration.
        let entries: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.kind.supports_bulk_actions())
            .cloned()
            .collect();
        let mut affected: usize = 0;
        for entry in &entries {
            let Ok(mut clock) = entry.clock.try_borrow_mut() else {
                warn!(clock_id = %entry.id, "Clock busy during bulk action, skipped");
                continue;
            };
            action(&mut *clock);
            affected = affected.saturating_add(1);
        }
        affected
    }

    // -----------------------------------------------------------------------
    // Reorder
    // -----------------------------------------------------------------------

    /// Swap the positions of the dragged and dropped clocks.
    ///
    /// Returns `false` without notifying when either id is unknown or both
    /// ids are the same clock.
    pub fn reorder_clocks(&mut self, dragged: ClockId, dropped: ClockId) -> bool {
        let (Some(dragged_index), Some(dropped_index)) = (self.position(dragged), self.position(dropped))
        else {
            return false;
        };
        let Some(plan) = SwapPlan::new(dragged_index, dropped_index) else {
            return false;
        };
        if !plan.apply(&mut self.entries) {
            return false;
        }

        debug!(%dragged, %dropped, dragged_index, dropped_index, "Clocks reordered");
        self.notify();
        true
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register an observer notified when clocks are added, removed or
    /// reordered.
    pub fn subscribe(&mut self, observer: Rc<dyn Observer<Self>>) {
        self.observers.subscribe(observer);
    }

    /// Remove a collection observer. Silent if absent.
    pub fn unsubscribe(&mut self, observer: &Rc<dyn Observer<Self>>) {
        self.observers.unsubscribe(observer);
    }

    fn notify(&self) {
        self.observers.notify(self);
    }

    fn position(&self, id: ClockId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn dispose(&self, clock: &SharedClock) {
        let subscriber: Rc<dyn TickSubscriber> = Rc::clone(clock) as Rc<dyn TickSubscriber>;
        self.heartbeat.unsubscribe(&subscriber);
    }
}

impl Drop for ClockCollection {
    fn drop(&mut self) {
        for entry in &self.entries {
            self.dispose(&entry.clock);
        }
    }
}
