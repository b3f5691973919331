//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

#[cfg(feature = "future")]
pub use crate::ops::ObservableFuture;
pub use crate::{
  error::RxError,
  observable::{Observable, Subscribable},
  observer::{BoxedObserver, FnMutObserver, Notification, Observer, ObserverAll},
  of_sequence,
  scheduler::{IdleCallback, IdleHandle, IdleScheduler, ManualIdleScheduler},
  subject::{BehaviorSubject, IdleSubject, IdleSubjectOptions, ReplaySubject, Subject},
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionGuard, Teardown},
};
