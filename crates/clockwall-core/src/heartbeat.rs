//! The shared one-second heartbeat.
//!
//! A [`Heartbeat`] is constructed once by the composition root and passed
//! to whoever needs to subscribe; there is no global accessor. On each
//! firing it invokes every [`TickSubscriber`] synchronously, in
//! subscription order.
//!
//! # Scheduling
//!
//! [`Heartbeat::run`] delays its first firing until the next wall-clock
//! second boundary (when alignment is enabled) and then repeats at the
//! configured period. Later firings are plain fixed-period repetition and
//! may drift over long runs.
//!
//! The heartbeat is single-threaded: it is shared as `Rc<Heartbeat>` and
//! driven from a `tokio::task::LocalSet`, on the same thread as user
//! actions.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::HeartbeatConfig;
use crate::observable::same_allocation;
use crate::time_source::TimeSource;

/// Receiver of heartbeat ticks.
pub trait TickSubscriber {
    /// Called once per heartbeat firing.
    fn on_tick(&self);
}

/// Process-wide ticking source, explicitly constructed and injected.
pub struct Heartbeat {
    subscribers: RefCell<Vec<Rc<dyn TickSubscriber>>>,
    period: Duration,
    align_to_second: bool,
    stopped: Cell<bool>,
    stop_signal: Notify,
    fired: Cell<u64>,
}

impl Heartbeat {
    /// Create a heartbeat from configuration. Nothing fires until
    /// [`run`](Self::run) or [`spawn_local`](Self::spawn_local) is called.
    pub fn new(config: &HeartbeatConfig) -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            period: Duration::from_millis(config.period_ms.max(1)),
            align_to_second: config.align_to_second,
            stopped: Cell::new(false),
            stop_signal: Notify::new(),
            fired: Cell::new(0),
        }
    }

    /// Time between firings.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Register a subscriber. No duplicate check.
    pub fn subscribe(&self, subscriber: Rc<dyn TickSubscriber>) {
        self.subscribers.borrow_mut().push(subscriber);
    }

    /// Remove every entry that is the same allocation as `subscriber`.
    ///
    /// Unlike [`Observable::unsubscribe`](crate::observable::Observable::unsubscribe),
    /// which drops only the first match, this clears duplicates too: a
    /// clock subscribed twice stops ticking after one call.
    /// Returns `true` if anything was removed.
    pub fn unsubscribe(&self, subscriber: &Rc<dyn TickSubscriber>) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|candidate| !same_allocation(candidate, subscriber));
        subscribers.len() != before
    }

    /// Number of subscriber entries.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Whether `subscriber` is currently registered.
    pub fn is_subscribed<T: ?Sized>(&self, subscriber: &Rc<T>) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|candidate| same_allocation(candidate, subscriber))
    }

    /// Number of firings so far.
    pub fn fired(&self) -> u64 {
        self.fired.get()
    }

    /// Invoke every subscriber once, in subscription order.
    ///
    /// Works on a snapshot of the list, so a subscriber may subscribe or
    /// unsubscribe during the tick; the change applies from the next
    /// firing.
    pub fn fire(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in &subscribers {
            subscriber.on_tick();
        }
        self.fired.set(self.fired.get().saturating_add(1));
    }

    /// Delay before the first firing when started at `now`.
    ///
    /// With alignment on, this is the time left until the next whole
    /// second, or zero when `now` is already on a boundary.
    pub fn first_delay(&self, now: DateTime<Utc>) -> Duration {
        if !self.align_to_second {
            return self.period;
        }
        let into_second = u64::from(now.timestamp_subsec_millis()).min(999);
        if into_second == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(1000_u64.saturating_sub(into_second))
    }

    /// Fire at the configured period until [`stop`](Self::stop) is called.
    ///
    /// `now` is the wall-clock instant used to align the first firing.
    pub async fn run(&self, now: DateTime<Utc>) {
        if self.stopped.get() {
            return;
        }
        let first_delay = self.first_delay(now);
        let start = Instant::now()
            .checked_add(first_delay)
            .unwrap_or_else(Instant::now);
        let mut interval = tokio::time::interval_at(start, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            period_ms = u64::try_from(self.period.as_millis()).unwrap_or(u64::MAX),
            first_delay_ms = u64::try_from(first_delay.as_millis()).unwrap_or(u64::MAX),
            subscribers = self.subscriber_count(),
            "Heartbeat started"
        );

        loop {
            tokio::select! {
                () = self.stop_signal.notified() => break,
                _ = interval.tick() => {
                    if self.stopped.get() {
                        break;
                    }
                    self.fire();
                    debug!(fired = self.fired(), "Heartbeat fired");
                }
            }
        }

        info!(fired = self.fired(), "Heartbeat stopped");
    }

    /// Spawn [`run`](Self::run) on the current `LocalSet`, aligned to the
    /// instant reported by `time_source`.
    ///
    /// Must be called from within a `tokio::task::LocalSet`.
    pub fn spawn_local(self: &Rc<Self>, time_source: &dyn TimeSource) -> JoinHandle<()> {
        let heartbeat = Rc::clone(self);
        let now = time_source.now();
        tokio::task::spawn_local(async move { heartbeat.run(now).await })
    }

    /// Cancel the repeating firing. Safe to call any number of times.
    pub fn stop(&self) {
        if self.stopped.replace(true) {
            return;
        }
        self.stop_signal.notify_one();
    }

    /// Whether [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

impl fmt::Debug for Heartbeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heartbeat")
            .field("subscribers", &self.subscriber_count())
            .field("period", &self.period)
            .field("align_to_second", &self.align_to_second)
            .field("stopped", &self.stopped.get())
            .field("fired", &self.fired.get())
            .finish_non_exhaustive()
    }
}
