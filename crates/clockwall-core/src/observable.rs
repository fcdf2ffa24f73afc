//! Change notification between a model and the renderers watching it.
//!
//! Anything that implements [`Observer`] can subscribe to an
//! [`Observable`]. Observers are held as `Rc<dyn Observer<S>>` and compared
//! by allocation, so the same observer value may watch several sources and
//! tell them apart through the `source` argument of [`Observer::update`].
//!
//! # Invariants
//!
//! 1. Observers are notified synchronously, in subscription order.
//! 2. Subscribing the same observer twice is allowed; each entry is
//!    notified once per [`Observable::notify`] call.
//! 3. Unsubscribing an absent observer is a silent no-op.

use std::fmt;
use std::rc::Rc;

/// Receiver of change notifications from a source of type `S`.
pub trait Observer<S: ?Sized> {
    /// Called after `source` changed.
    fn update(&self, source: &S);
}

impl<S: ?Sized, F: Fn(&S)> Observer<S> for F {
    fn update(&self, source: &S) {
        self(source);
    }
}

/// Ordered list of observers owned by the entity that notifies them.
pub struct Observable<S: ?Sized> {
    observers: Vec<Rc<dyn Observer<S>>>,
}

impl<S: ?Sized> Observable<S> {
    /// Create an observable with no subscribers.
    pub const fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Append `observer` to the subscriber list. No duplicate check.
    pub fn subscribe(&mut self, observer: Rc<dyn Observer<S>>) {
        self.observers.push(observer);
    }

    /// Remove the first entry that is the same allocation as `observer`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn unsubscribe(&mut self, observer: &Rc<dyn Observer<S>>) -> bool {
        let position = self
            .observers
            .iter()
            .position(|candidate| same_allocation(candidate, observer));
        match position {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every subscriber with a reference to `source`.
    ///
    /// Iterates over a snapshot of the list so an observer may not
    /// invalidate the iteration.
    pub fn notify(&self, source: &S) {
        let observers = self.observers.clone();
        for observer in observers {
            observer.update(source);
        }
    }

    /// Number of subscriber entries, duplicates included.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<S: ?Sized> Default for Observable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for Observable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Whether two reference-counted pointers share one allocation, ignoring
/// trait-object metadata.
pub fn same_allocation<T: ?Sized, U: ?Sized>(a: &Rc<T>, b: &Rc<U>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
