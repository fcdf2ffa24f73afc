//! End-to-end behavior of the clock collection without a running timer.
//!
//! Ticks are driven with [`Heartbeat::fire`] so every step is
//! deterministic.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::{TimeDelta, TimeZone, Utc};
use clockwall_core::config::{ClocksConfig, HeartbeatConfig};
use clockwall_core::{
    Clock, ClockCollection, Heartbeat, ManualTimeSource, Observer, TimeSource,
};
use clockwall_types::{ClockId, ClockKind, EditCycle, EditMode, TimeFormat, WallTime};

struct Fixture {
    time_source: Rc<ManualTimeSource>,
    heartbeat: Rc<Heartbeat>,
    collection: ClockCollection,
}

fn fixture(config: ClocksConfig) -> Fixture {
    let start = Utc.with_ymd_and_hms(2026, 6, 15, 23, 59, 58).unwrap();
    let time_source = Rc::new(ManualTimeSource::new(start, 120));
    let heartbeat = Rc::new(Heartbeat::new(&HeartbeatConfig::default()));
    let collection = ClockCollection::new(
        Rc::clone(&heartbeat),
        Rc::clone(&time_source) as Rc<dyn TimeSource>,
        config,
    );
    Fixture {
        time_source,
        heartbeat,
        collection,
    }
}

#[test]
fn default_offset_comes_from_host() {
    let mut fx = fixture(ClocksConfig::default());
    let local = fx.collection.add_clock(ClockKind::Digital, None);
    let utc = fx.collection.add_clock(ClockKind::Digital, Some(0));

    assert_eq!(local.borrow().time_zone_offset_minutes(), 120);
    assert_eq!(local.borrow().time(), WallTime::new(1, 59, 58).unwrap());
    assert_eq!(utc.borrow().time(), WallTime::new(23, 59, 58).unwrap());
}

#[test]
fn ticks_carry_across_midnight() {
    let mut fx = fixture(ClocksConfig::default());
    let clock = fx.collection.add_clock(ClockKind::Digital, Some(0));

    fx.heartbeat.fire();
    fx.heartbeat.fire();
    assert_eq!(clock.borrow().time(), WallTime::MIDNIGHT);
}

#[test]
fn bulk_actions_skip_analog_clocks() {
    let mut fx = fixture(ClocksConfig::default());
    let digital = fx.collection.add_clock(ClockKind::Digital, Some(0));
    let analog = fx.collection.add_clock(ClockKind::Analog, Some(0));

    fx.collection.toggle_all_lights();
    assert!(digital.borrow().light_on());
    assert!(!analog.borrow().light_on());

    analog.borrow_mut().toggle_light_state();
    fx.collection.reset_all_lights();
    assert!(!digital.borrow().light_on());
    assert!(analog.borrow().light_on());
}

#[test]
fn reset_all_resyncs_digital_clocks() {
    let mut fx = fixture(ClocksConfig::default());
    let clock = fx.collection.add_clock(ClockKind::Digital, Some(0));
    {
        let mut clock = clock.borrow_mut();
        clock.toggle_edit_mode();
        clock.increase_value();
    }
    assert_eq!(clock.borrow().hours(), 0);

    fx.time_source.advance(TimeDelta::seconds(10));
    fx.collection.reset_all_clocks();
    assert_eq!(clock.borrow().time(), WallTime::new(0, 0, 8).unwrap());
}

#[test]
fn four_state_cycle_from_config() {
    let config = ClocksConfig {
        digital_edit_cycle: EditCycle::HoursMinutesSeconds,
        ..ClocksConfig::default()
    };
    let mut fx = fixture(config);
    let digital = fx.collection.add_clock(ClockKind::Digital, Some(0));
    let analog = fx.collection.add_clock(ClockKind::Analog, Some(0));

    let mut digital = digital.borrow_mut();
    let mut analog = analog.borrow_mut();
    for _ in 0..3 {
        digital.toggle_edit_mode();
        analog.toggle_edit_mode();
    }
    assert_eq!(digital.edit_mode(), EditMode::Seconds);
    assert_eq!(analog.edit_mode(), EditMode::Idle);
}

#[test]
fn default_time_format_from_config() {
    let config = ClocksConfig {
        default_time_format: TimeFormat::AmPm,
        ..ClocksConfig::default()
    };
    let mut fx = fixture(config);
    let clock = fx.collection.add_clock(ClockKind::Digital, None);
    assert_eq!(clock.borrow().time_format(), TimeFormat::AmPm);
}

#[test]
fn collection_observers_see_structural_changes() {
    let mut fx = fixture(ClocksConfig::default());
    let seen: Rc<RefCell<Vec<Vec<ClockId>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let observer: Rc<dyn Observer<ClockCollection>> =
        Rc::new(move |collection: &ClockCollection| sink.borrow_mut().push(collection.ids()));
    fx.collection.subscribe(Rc::clone(&observer));

    let a = fx.collection.add_clock(ClockKind::Digital, None).borrow().id();
    let b = fx.collection.add_clock(ClockKind::Analog, None).borrow().id();
    assert!(fx.collection.reorder_clocks(a, b));
    assert!(!fx.collection.reorder_clocks(a, a));
    fx.collection.remove_clock(a);

    // Bulk actions change clocks, not the collection.
    fx.collection.toggle_all_lights();

    assert_eq!(
        *seen.borrow(),
        vec![vec![a], vec![a, b], vec![b, a], vec![b]]
    );

    fx.collection.unsubscribe(&observer);
    fx.collection.add_clock(ClockKind::Digital, None);
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn clock_observers_follow_ticks() {
    let mut fx = fixture(ClocksConfig::default());
    let clock = fx.collection.add_clock(ClockKind::Digital, Some(0));
    let ticks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ticks);
    clock
        .borrow_mut()
        .subscribe(Rc::new(move |clock: &Clock| sink.borrow_mut().push(clock.seconds())));

    fx.heartbeat.fire();
    fx.heartbeat.fire();
    fx.heartbeat.fire();
    assert_eq!(*ticks.borrow(), vec![59, 0, 1]);
}

#[test]
fn dropping_collection_releases_heartbeat() {
    let mut fx = fixture(ClocksConfig::default());
    let clock = fx.collection.add_clock(ClockKind::Digital, Some(0));
    fx.collection.add_clock(ClockKind::Analog, Some(0));
    assert_eq!(fx.heartbeat.subscriber_count(), 2);

    let Fixture {
        heartbeat,
        collection,
        ..
    } = fx;
    drop(collection);
    assert_eq!(heartbeat.subscriber_count(), 0);

    heartbeat.fire();
    assert_eq!(clock.borrow().time(), WallTime::new(23, 59, 58).unwrap());
}

/// Subscribe an observer to `clock` that looks the clock up in
/// `collection` on every change and records whether it was found and
/// the layout it saw.
fn observe_lookups(
    clock: &clockwall_core::SharedClock,
    collection: &Rc<RefCell<ClockCollection>>,
) -> Rc<RefCell<Vec<(bool, Vec<ClockId>)>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let collection: Weak<RefCell<ClockCollection>> = Rc::downgrade(collection);
    clock.borrow_mut().subscribe(Rc::new(move |clock: &Clock| {
        if let Some(collection) = collection.upgrade() {
            let collection = collection.borrow();
            let found = collection.get(clock.id()).is_some();
            sink.borrow_mut().push((found, collection.ids()));
        }
    }));
    seen
}

#[test]
fn clock_observers_can_query_collection_during_tick() {
    let Fixture {
        heartbeat,
        collection,
        ..
    } = fixture(ClocksConfig::default());
    let collection = Rc::new(RefCell::new(collection));
    let clock = collection.borrow_mut().add_clock(ClockKind::Digital, Some(0));
    let other = collection.borrow_mut().add_clock(ClockKind::Analog, Some(0));
    let ids = vec![clock.borrow().id(), other.borrow().id()];
    let seen = observe_lookups(&clock, &collection);

    heartbeat.fire();
    heartbeat.fire();

    assert_eq!(*seen.borrow(), vec![(true, ids.clone()), (true, ids)]);
}

#[test]
fn clock_observers_can_query_collection_during_bulk_action() {
    let Fixture { collection, .. } = fixture(ClocksConfig::default());
    let collection = Rc::new(RefCell::new(collection));
    let first = collection.borrow_mut().add_clock(ClockKind::Digital, Some(0));
    let second = collection.borrow_mut().add_clock(ClockKind::Digital, Some(0));
    let first_seen = observe_lookups(&first, &collection);
    let second_seen = observe_lookups(&second, &collection);

    collection.borrow().toggle_all_lights();

    assert_eq!(first_seen.borrow().len(), 1);
    assert_eq!(second_seen.borrow().len(), 1);
    assert!(first_seen.borrow().iter().all(|(found, ids)| *found && ids.len() == 2));
    assert!(first.borrow().light_on());
    assert!(second.borrow().light_on());
}

#[test]
fn bulk_action_from_inside_an_observer_skips_the_busy_clock() {
    let Fixture { collection, .. } = fixture(ClocksConfig::default());
    let collection = Rc::new(RefCell::new(collection));
    let trigger = collection.borrow_mut().add_clock(ClockKind::Digital, Some(0));
    let other = collection.borrow_mut().add_clock(ClockKind::Digital, Some(0));

    // Turning the trigger's light on turns every other light on too.
    let weak = Rc::downgrade(&collection);
    trigger.borrow_mut().subscribe(Rc::new(move |clock: &Clock| {
        if !clock.light_on() {
            return;
        }
        if let Some(collection) = weak.upgrade() {
            collection.borrow().toggle_all_lights();
        }
    }));

    trigger.borrow_mut().toggle_light_state();
    assert!(trigger.borrow().light_on());
    assert!(other.borrow().light_on());
}

#[test]
fn clock_can_be_removed_from_its_own_tick() {
    let Fixture {
        heartbeat,
        collection,
        ..
    } = fixture(ClocksConfig::default());
    let collection = Rc::new(RefCell::new(collection));
    let clock = collection.borrow_mut().add_clock(ClockKind::Digital, Some(0));
    let id = clock.borrow().id();

    let weak = Rc::downgrade(&collection);
    clock.borrow_mut().subscribe(Rc::new(move |clock: &Clock| {
        if let Some(collection) = weak.upgrade() {
            collection.borrow_mut().remove_clock(clock.id());
        }
    }));

    heartbeat.fire();
    assert!(collection.borrow().get(id).is_none());
    assert_eq!(heartbeat.subscriber_count(), 0);
    assert_eq!(clock.borrow().time(), WallTime::new(23, 59, 59).unwrap());
}
