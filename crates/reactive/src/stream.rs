//! Push-based streams.
//!
//! A `Stream` describes how to produce values for an observer. Nothing runs
//! until `subscribe` is called, and every subscription gets its own operator
//! state, so re-subscribing after an unsubscribe starts from scratch.
//!
//! All delivery is synchronous: a value pushed into a source reaches the
//! observer at the end of the chain before the push returns.

use crate::subscription::{Observer, Subscription};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

type Source<T> = dyn Fn(Observer<T>) -> Subscription;

/// A cold, synchronous stream of values.
pub struct Stream<T> {
    source: Rc<Source<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Creates a stream from a subscribe function.
    ///
    /// The function receives the downstream observer and returns the
    /// subscription that stops delivery.
    pub fn new<F>(subscribe: F) -> Self
    where
        F: Fn(Observer<T>) -> Subscription + 'static,
    {
        Self {
            source: Rc::new(subscribe),
        }
    }

    /// A stream that never emits.
    pub fn empty() -> Self {
        Self::new(|_| Subscription::empty())
    }

    /// Subscribes `observer` to this stream.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(T) + 'static,
    {
        self.subscribe_observer(Rc::new(observer))
    }

    /// Subscribes an already shared observer.
    pub fn subscribe_observer(&self, observer: Observer<T>) -> Subscription {
        (self.source)(observer)
    }

    /// Transforms each value.
    pub fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + 'static,
    {
        let upstream = self.clone();
        let f = Rc::new(f);
        Stream::new(move |observer: Observer<U>| {
            let f = f.clone();
            upstream.subscribe(move |value| observer(f(value)))
        })
    }

    /// Transforms each value, dropping those mapped to `None`.
    pub fn filter_map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Option<U> + 'static,
    {
        let upstream = self.clone();
        let f = Rc::new(f);
        Stream::new(move |observer: Observer<U>| {
            let f = f.clone();
            upstream.subscribe(move |value| {
                if let Some(mapped) = f(value) {
                    observer(mapped);
                }
            })
        })
    }

    /// Keeps only values matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Stream<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_map(move |value| if predicate(&value) { Some(value) } else { None })
    }

    /// Runs `f` on each value before passing it on unchanged.
    pub fn inspect<F>(&self, f: F) -> Stream<T>
    where
        F: Fn(&T) + 'static,
    {
        self.map(move |value| {
            f(&value);
            value
        })
    }

    /// Interleaves values from every stream in emission order.
    ///
    /// Sources are subscribed in iteration order, so values a source emits
    /// while being subscribed come out in that order too.
    pub fn merge<I>(streams: I) -> Stream<T>
    where
        I: IntoIterator<Item = Stream<T>>,
    {
        let sources: Rc<Vec<Stream<T>>> = Rc::new(streams.into_iter().collect());
        Stream::new(move |observer: Observer<T>| {
            let combined = Subscription::empty();
            for source in sources.iter() {
                let observer = observer.clone();
                combined.add_subscription(source.subscribe(move |value| observer(value)));
            }
            combined
        })
    }

    /// Interleaves this stream with `other`.
    pub fn merge_with(&self, other: &Stream<T>) -> Stream<T> {
        Stream::merge([self.clone(), other.clone()])
    }
}

impl<T: Clone + PartialEq + 'static> Stream<T> {
    /// Drops values equal to the one emitted just before them.
    pub fn distinct_until_changed(&self) -> Stream<T> {
        let upstream = self.clone();
        Stream::new(move |observer: Observer<T>| {
            let last: RefCell<Option<T>> = RefCell::new(None);
            upstream.subscribe(move |value| {
                let changed = {
                    let mut last = last.borrow_mut();
                    if last.as_ref() == Some(&value) {
                        false
                    } else {
                        *last = Some(value.clone());
                        true
                    }
                };
                if changed {
                    observer(value);
                }
            })
        })
    }
}
