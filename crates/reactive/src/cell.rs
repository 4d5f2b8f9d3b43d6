//! Reactive cell implementation.
//!
//! A `ReactiveCell` holds a current value and pushes every write to its
//! observers. Observers joining late receive the value that is current at the
//! time they subscribe, then every later write.

use crate::stream::Stream;
use crate::subscription::{deliver, Observer, ObserverList, Subscription};
use alloc::rc::Rc;
use core::cell::RefCell;

struct CellInner<T> {
    value: RefCell<T>,
    observers: Rc<RefCell<ObserverList<T>>>,
}

/// A current-value holder that broadcasts writes.
///
/// Writes are not deduplicated: setting the same value twice notifies twice.
/// Clones share the same value and observers.
///
/// # Example
///
/// ```rust
/// use wisp_reactive::ReactiveCell;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let cell = ReactiveCell::new(1);
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let seen_clone = seen.clone();
///
/// let sub = cell.subscribe(move |v| seen_clone.borrow_mut().push(v));
/// cell.set(2);
/// cell.set(2);
/// sub.unsubscribe();
/// cell.set(3);
///
/// assert_eq!(*seen.borrow(), vec![1, 2, 2]);
/// ```
pub struct ReactiveCell<T> {
    inner: Rc<CellInner<T>>,
}

impl<T> Clone for ReactiveCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> ReactiveCell<T> {
    /// Creates a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(CellInner {
                value: RefCell::new(value),
                observers: Rc::new(RefCell::new(ObserverList::default())),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Reads the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Stores `value` and notifies every observer, even if it is unchanged.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();
        let targets = self.inner.observers.borrow().snapshot();
        deliver(targets, &value);
    }

    /// Replaces the value with `f(current)` and notifies.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = self.with(f);
        self.set(next);
    }

    /// Subscribes `observer`, replaying the current value first.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(T) + 'static,
    {
        self.subscribe_observer(Rc::new(observer))
    }

    fn subscribe_observer(&self, observer: Observer<T>) -> Subscription {
        let sub = ObserverList::attach(&self.inner.observers, observer.clone());
        let current = self.get();
        observer(current);
        sub
    }

    /// Returns a stream of the current value followed by every write.
    pub fn stream(&self) -> Stream<T> {
        let cell = self.clone();
        Stream::new(move |observer| cell.subscribe_observer(observer))
    }

    /// Returns the number of observers attached.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Returns true if both handles point to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
