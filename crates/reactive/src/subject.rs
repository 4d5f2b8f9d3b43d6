//! Multicast subject without replay.

use crate::stream::Stream;
use crate::subscription::{deliver, ObserverList, Subscription};
use alloc::rc::Rc;
use core::cell::RefCell;

/// A hot stream source. Observers only see values pushed after they subscribe.
pub struct Subject<T> {
    observers: Rc<RefCell<ObserverList<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
        }
    }
}

impl<T: Clone + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Subject<T> {
    /// Creates a subject with no observers.
    pub fn new() -> Self {
        Self {
            observers: Rc::new(RefCell::new(ObserverList::default())),
        }
    }

    /// Pushes `value` to every current observer.
    pub fn next(&self, value: T) {
        let targets = self.observers.borrow().snapshot();
        deliver(targets, &value);
    }

    /// Subscribes `observer`.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(T) + 'static,
    {
        ObserverList::attach(&self.observers, Rc::new(observer))
    }

    /// Returns a stream of values pushed after subscription.
    pub fn stream(&self) -> Stream<T> {
        let observers = self.observers.clone();
        Stream::new(move |observer| ObserverList::attach(&observers, observer))
    }

    /// Returns the number of observers attached.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}
