//! # rxlite: a small single-threaded reactive core
//!
//! Push-based streams of values, an optional terminal error and a completion
//! signal, delivered to any number of observers.
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let subject = ReplaySubject::<i32, ()>::new(2);
//! subject.next(1);
//! subject.next(2);
//! subject.next(3);
//!
//! // late subscribers see the last two values
//! subject.subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Wraps a producer; every subscription runs it afresh |
//! | [`Observer`] | Consumes `start`, `next`, `error` and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Subject`] | Multicast observable that can be pushed into |
//! | [`ReplaySubject`] / [`BehaviorSubject`] | Subjects that remember |
//! | [`IdleSubject`] | Subject that coalesces values until the host is idle |
//!
//! Everything is `Rc` based: nothing here is `Send`, and every callback runs
//! on the thread that triggered it.
//!
//! ## Feature Flags
//!
//! - **`future`** (default): `Observable::to_future` and
//!   `Observable::from_future`, built on `futures`.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`ReplaySubject`]: subject::ReplaySubject
//! [`BehaviorSubject`]: subject::BehaviorSubject
//! [`IdleSubject`]: subject::IdleSubject

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;

pub use prelude::*;
