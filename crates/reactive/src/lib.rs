//! Wisp Reactive - Reactive primitives for wisp elements.
//!
//! This crate implements the single-threaded, synchronous push model that
//! element properties are built on. Every write propagates to the end of its
//! pipeline before the write returns.
//!
//! # Core Concepts
//!
//! - `ReactiveCell`: Current value holder that replays its value to late subscribers
//! - `Subject`: Multicast source without replay
//! - `Stream`: Cold stream with `map`, `filter_map`, `distinct_until_changed`, `merge`
//! - `Subscription`: Handle that stops delivery when unsubscribed
//! - `SubscriptionSet`: Ordered group of subscriptions torn down together
//!
//! # Example
//!
//! ```rust
//! use wisp_reactive::{ReactiveCell, Stream};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let a = ReactiveCell::new(0);
//! let b = ReactiveCell::new(0);
//!
//! let events = Rc::new(RefCell::new(Vec::new()));
//! let events_clone = events.clone();
//! let sub = Stream::merge([
//!     a.stream().distinct_until_changed().map(|v| ("a", v)),
//!     b.stream().distinct_until_changed().map(|v| ("b", v)),
//! ])
//! .subscribe(move |e| events_clone.borrow_mut().push(e));
//!
//! a.set(1);
//! a.set(1);
//! b.set(2);
//! sub.unsubscribe();
//!
//! assert_eq!(*events.borrow(), vec![("a", 0), ("b", 0), ("a", 1), ("b", 2)]);
//! ```

#![no_std]

extern crate alloc;

pub mod cell;
pub mod stream;
pub mod subject;
pub mod subscription;

pub use cell::ReactiveCell;
pub use stream::Stream;
pub use subject::Subject;
pub use subscription::{Observer, Subscription, SubscriptionId, SubscriptionSet};
