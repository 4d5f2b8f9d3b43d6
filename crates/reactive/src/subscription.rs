//! Subscription management for reactive streams.
//!
//! This module provides subscription handles, the ordered `SubscriptionSet`
//! used to scope subscriptions to a connected period, and the observer list
//! shared by cells and subjects.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::mem;

/// Unique identifier for an observer registration.
pub type SubscriptionId = u64;

/// Callback type for value notifications.
pub type Observer<T> = Rc<dyn Fn(T)>;

type Teardown = Box<dyn FnOnce()>;

struct SubscriptionInner {
    closed: Cell<bool>,
    teardowns: RefCell<Vec<Teardown>>,
}

/// A handle to an active subscription.
///
/// Clones share the same underlying subscription. Dropping a handle does not
/// unsubscribe; call [`Subscription::unsubscribe`] explicitly.
#[derive(Clone)]
pub struct Subscription {
    inner: Rc<SubscriptionInner>,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::empty()
    }
}

impl Subscription {
    /// Creates a subscription that runs `teardown` when unsubscribed.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let sub = Self::empty();
        sub.add(teardown);
        sub
    }

    /// Creates an open subscription with nothing to tear down.
    pub fn empty() -> Self {
        Self {
            inner: Rc::new(SubscriptionInner {
                closed: Cell::new(false),
                teardowns: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Adds a teardown. Runs it immediately if already closed.
    pub fn add<F>(&self, teardown: F)
    where
        F: FnOnce() + 'static,
    {
        if self.is_closed() {
            teardown();
        } else {
            self.inner.teardowns.borrow_mut().push(Box::new(teardown));
        }
    }

    /// Ties another subscription to this one.
    pub fn add_subscription(&self, child: Subscription) {
        self.add(move || child.unsubscribe());
    }

    /// Unsubscribes, running teardowns in the order they were added.
    ///
    /// Calling this more than once has no further effect.
    pub fn unsubscribe(&self) {
        if self.inner.closed.replace(true) {
            return;
        }
        let teardowns = mem::take(&mut *self.inner.teardowns.borrow_mut());
        for teardown in teardowns {
            teardown();
        }
    }

    /// Returns whether this subscription has been unsubscribed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }
}

/// An ordered collection of subscriptions that are torn down together.
#[derive(Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Creates an empty subscription set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a subscription.
    pub fn add(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Unsubscribes every member in insertion order and empties the set.
    pub fn clear(&mut self) {
        for sub in self.subscriptions.drain(..) {
            sub.unsubscribe();
        }
    }

    /// Returns the number of recorded subscriptions.
    #[inline]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns true if nothing is recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

struct ObserverEntry<T> {
    id: SubscriptionId,
    active: Rc<Cell<bool>>,
    callback: Observer<T>,
}

/// Observers registered on a cell or subject, kept in registration order.
pub(crate) struct ObserverList<T> {
    entries: Vec<ObserverEntry<T>>,
    next_id: SubscriptionId,
}

impl<T> Default for ObserverList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

/// Observers captured at notification time.
pub(crate) type ObserverSnapshot<T> = Vec<(Rc<Cell<bool>>, Observer<T>)>;

impl<T: Clone + 'static> ObserverList<T> {
    /// Registers an observer, returning its id and activity flag.
    pub(crate) fn insert(&mut self, callback: Observer<T>) -> (SubscriptionId, Rc<Cell<bool>>) {
        let id = self.next_id;
        self.next_id += 1;

        let active = Rc::new(Cell::new(true));
        self.entries.push(ObserverEntry {
            id,
            active: active.clone(),
            callback,
        });
        (id, active)
    }

    /// Removes an observer by id.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() < len_before
    }

    /// Copies the current observers so they can be called without a borrow held.
    pub(crate) fn snapshot(&self) -> ObserverSnapshot<T> {
        self.entries
            .iter()
            .map(|entry| (entry.active.clone(), entry.callback.clone()))
            .collect()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Registers `callback` on a shared list and returns the matching handle.
    pub(crate) fn attach(list: &Rc<RefCell<Self>>, callback: Observer<T>) -> Subscription {
        let (id, active) = list.borrow_mut().insert(callback);
        let weak = Rc::downgrade(list);
        Subscription::new(move || {
            active.set(false);
            if let Some(list) = weak.upgrade() {
                list.borrow_mut().remove(id);
            }
        })
    }
}

/// Delivers `value` to every observer in the snapshot that is still active.
pub(crate) fn deliver<T: Clone>(targets: ObserverSnapshot<T>, value: &T) {
    for (active, callback) in targets {
        if active.get() {
            callback(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_subscription_new() {
        let sub = Subscription::new(|| {});
        assert!(!sub.is_closed());
    }

    #[test]
    fn test_subscription_unsubscribe_runs_teardown_once() {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let sub = Subscription::new(move || count_clone.set(count_clone.get() + 1));
        sub.unsubscribe();
        sub.unsubscribe();

        assert!(sub.is_closed());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscription_add_after_close_runs_immediately() {
        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();

        let sub = Subscription::empty();
        sub.unsubscribe();
        sub.add(move || ran_clone.set(true));

        assert!(ran.get());
    }

    #[test]
    fn test_subscription_child() {
        let parent = Subscription::empty();
        let child = Subscription::empty();
        parent.add_subscription(child.clone());

        parent.unsubscribe();
        assert!(child.is_closed());
    }

    #[test]
    fn test_subscription_set_clear_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut set = SubscriptionSet::new();

        for i in 0..3 {
            let order = order.clone();
            set.add(Subscription::new(move || order.borrow_mut().push(i)));
        }
        assert_eq!(set.len(), 3);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_observer_list_insert_remove() {
        let mut list: ObserverList<i32> = ObserverList::default();

        let (id1, _) = list.insert(Rc::new(|_| {}));
        let (id2, _) = list.insert(Rc::new(|_| {}));
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
        assert_eq!(list.len(), 2);

        assert!(list.remove(id1));
        assert!(!list.remove(id1)); // Already removed
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_deliver_skips_inactive() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut list: ObserverList<i32> = ObserverList::default();

        let seen1 = seen.clone();
        let (_, active1) = list.insert(Rc::new(move |v| seen1.borrow_mut().push(v)));
        let seen2 = seen.clone();
        list.insert(Rc::new(move |v| seen2.borrow_mut().push(v * 10)));

        active1.set(false);
        deliver(list.snapshot(), &4);

        assert_eq!(*seen.borrow(), vec![40]);
    }

    #[test]
    fn test_attach_unsubscribe_removes_observer() {
        let list: Rc<RefCell<ObserverList<i32>>> = Rc::new(RefCell::new(ObserverList::default()));
        let sub = ObserverList::attach(&list, Rc::new(|_| {}));
        assert_eq!(list.borrow().len(), 1);

        sub.unsubscribe();
        assert_eq!(list.borrow().len(), 0);
    }
}
