use std::collections::VecDeque;

use crate::{
  observer::{BoxedObserver, Notification, Observer},
  rc::MutRc,
  subscription::Subscription,
};

/// The full observer handed to producers.
///
/// Every observer passed to `subscribe` is normalized once into a
/// `Subscriber`: all four callbacks are present (missing ones are the no-op
/// defaults of [`Observer`]), and delivery is tied to the lifetime of the
/// owning [`Subscription`]. Once the subscription is closed nothing more
/// reaches the observer.
///
/// A notification that arrives while the same observer is still running a
/// callback (for example an observer pushing into a subject it listens to)
/// is queued and delivered as soon as that callback returns.
pub struct Subscriber<Item, Err> {
  observer: MutRc<BoxedObserver<Item, Err>>,
  pending: MutRc<VecDeque<Notification<Item, Err>>>,
  subscription: Subscription,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self {
    Subscriber {
      observer: self.observer.clone(),
      pending: self.pending.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  pub(crate) fn new(observer: BoxedObserver<Item, Err>, subscription: Subscription) -> Self {
    Subscriber {
      observer: MutRc::own(observer),
      pending: MutRc::own(VecDeque::new()),
      subscription,
    }
  }

  pub(crate) fn start(&self) {
    if let Some(mut observer) = self.observer.try_rc_deref_mut() {
      observer.start(&self.subscription);
    }
  }

  #[inline]
  pub fn next(&self, value: Item) { self.deliver(Notification::Next(value)) }

  #[inline]
  pub fn error(&self, err: Err) { self.deliver(Notification::Error(err)) }

  #[inline]
  pub fn complete(&self) { self.deliver(Notification::Complete) }

  /// Whether the subscription owning this observer has been unsubscribed.
  #[inline]
  pub fn is_closed(&self) -> bool { self.subscription.is_closed() }

  #[inline]
  pub fn subscription(&self) -> &Subscription { &self.subscription }

  pub fn deliver(&self, notification: Notification<Item, Err>) {
    if self.is_closed() {
      log::trace!("dropped notification for a closed subscriber");
      return;
    }
    self.pending.rc_deref_mut().push_back(notification);

    // Already inside one of this observer's callbacks: the outer call drains.
    let Some(mut observer) = self.observer.try_rc_deref_mut() else {
      return;
    };
    loop {
      let notification = self.pending.rc_deref_mut().pop_front();
      let Some(notification) = notification else {
        break;
      };
      if self.is_closed() {
        self.pending.rc_deref_mut().clear();
        break;
      }
      notification.accept(&mut *observer);
    }
  }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subscriber::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subscriber::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subscriber::complete(self) }
}
