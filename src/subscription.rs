use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;

use crate::rc::MutRc;

/// Cleanup action returned by a producer.
///
/// Runs at most once, when the owning [`Subscription`] is unsubscribed.
#[derive(Default)]
#[must_use]
pub struct Teardown(SmallVec<[Box<dyn FnOnce()>; 1]>);

impl Teardown {
  pub fn new(f: impl FnOnce() + 'static) -> Self {
    let mut actions: SmallVec<[Box<dyn FnOnce()>; 1]> = SmallVec::new();
    actions.push(Box::new(f));
    Teardown(actions)
  }

  /// A teardown with nothing to clean up.
  pub fn empty() -> Self { Teardown::default() }

  /// Teardown that unsubscribes `subscription`.
  pub fn unsubscribe(subscription: Subscription) -> Self {
    Teardown::new(move || subscription.unsubscribe())
  }

  /// Chain another cleanup action after the existing ones.
  pub fn and(mut self, other: Teardown) -> Self {
    self.0.extend(other.0);
    self
  }

  #[inline]
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  fn run(self) {
    for action in self.0 {
      action();
    }
  }
}

impl Debug for Teardown {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Teardown").field("actions", &self.0.len()).finish()
  }
}

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: Option<Teardown>,
}

/// Handle binding one observer to one producer.
///
/// Returned from `subscribe` to allow unsubscribing. Clones share the same
/// state; the first `unsubscribe` from any clone closes all of them.
#[derive(Clone, Default)]
pub struct Subscription(MutRc<Inner>);

impl Subscription {
  /// This allows deregistering an observer before the stream has finished
  /// delivering all events.
  ///
  /// Idempotent: the teardown runs at most once, later calls do nothing.
  pub fn unsubscribe(&self) {
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      inner.teardown.take()
    };
    log::debug!("subscription closed");
    if let Some(teardown) = teardown {
      teardown.run();
    }
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.rc_deref().closed }

  /// Attach the producer's cleanup action.
  ///
  /// If the subscription was closed while the producer was still running the
  /// teardown runs right away.
  pub(crate) fn set_teardown(&self, teardown: Teardown) {
    if teardown.is_empty() {
      return;
    }
    let late = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        Some(teardown)
      } else {
        inner.teardown = Some(match inner.teardown.take() {
          Some(prev) => prev.and(teardown),
          None => teardown,
        });
        None
      }
    };
    if let Some(teardown) = late {
      teardown.run();
    }
  }

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard::new(self) }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription").field("is_closed", &self.is_closed()).finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(Option<Subscription>);

impl SubscriptionGuard {
  pub fn new(subscription: Subscription) -> SubscriptionGuard {
    SubscriptionGuard(Some(subscription))
  }

  /// Gives the subscription back without unsubscribing it.
  pub fn into_inner(mut self) -> Subscription { self.0.take().unwrap_or_default() }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }
}
