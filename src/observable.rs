use std::rc::Rc;

use crate::{
  observer::{FnMutObserver, Observer, ObserverAll},
  subscriber::Subscriber,
  subscription::{Subscription, Teardown},
};

#[cfg(feature = "future")]
mod from_future;
mod from_iter;
mod of;

type Producer<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> Teardown;

/// A representation of any set of values over any amount of time. This is the
/// most basic building block of rxlite.
///
/// An `Observable` wraps a producer. Every subscription invokes the producer
/// afresh with its own [`Subscriber`]; clones share the producer but nothing
/// else.
pub struct Observable<Item, Err> {
  producer: Rc<Producer<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Observable { producer: self.producer.clone() } }
}

impl<Item, Err> Observable<Item, Err> {
  /// param `producer`: the function that is called when the Observable is
  /// subscribed to. It is given a Subscriber, to which new values can be
  /// `next`ed, or an `error` method can be called to raise an error, or
  /// `complete` can be called to notify of a successful completion. It
  /// returns the teardown to run when the subscription is unsubscribed.
  pub fn new<F>(producer: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> Teardown + 'static,
  {
    Observable { producer: Rc::new(producer) }
  }

  /// Subscribe a full observer.
  ///
  /// `start` is called first; unless it closed the subscription the producer
  /// runs synchronously and its teardown is attached to the subscription.
  pub fn actual_subscribe<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + 'static,
  {
    let subscription = Subscription::default();
    let subscriber = Subscriber::new(Box::new(observer), subscription.clone());
    subscriber.start();
    if subscription.is_closed() {
      log::debug!("subscription closed from start, producer skipped");
      return subscription;
    }
    let teardown = (self.producer)(subscriber);
    subscription.set_teardown(teardown);
    subscription
  }
}

/// The consumption surface shared by [`Observable`] and every subject.
///
/// Implementors only provide [`Subscribable::observable`]; the subscribe
/// helpers fill every callback that is not given with a no-op.
pub trait Subscribable<Item, Err> {
  /// The observable view of this source.
  fn observable(&self) -> Observable<Item, Err>;

  /// Subscribe with any [`Observer`] implementation.
  fn subscribe_observer<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + 'static,
  {
    self.observable().actual_subscribe(observer)
  }

  /// Subscribe with a closure standing in for `next`.
  fn subscribe<N>(&self, next: N) -> Subscription
  where
    N: FnMut(Item) + 'static,
    Item: 'static,
    Err: 'static,
  {
    self.subscribe_observer(FnMutObserver::new(next))
  }

  fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription
  where
    N: FnMut(Item) + 'static,
    E: FnMut(Err) + 'static,
    Item: 'static,
    Err: 'static,
  {
    self.subscribe_observer(ObserverAll::new(next, error, || {}))
  }

  fn subscribe_complete<N, C>(&self, next: N, complete: C) -> Subscription
  where
    N: FnMut(Item) + 'static,
    C: FnMut() + 'static,
    Item: 'static,
    Err: 'static,
  {
    self.subscribe_observer(ObserverAll::new(next, |_: Err| {}, complete))
  }

  fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Item) + 'static,
    E: FnMut(Err) + 'static,
    C: FnMut() + 'static,
    Item: 'static,
    Err: 'static,
  {
    self.subscribe_observer(ObserverAll::new(next, error, complete))
  }
}

impl<Item, Err> Subscribable<Item, Err> for Observable<Item, Err> {
  #[inline]
  fn observable(&self) -> Observable<Item, Err> { self.clone() }

  #[inline]
  fn subscribe_observer<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + 'static,
  {
    self.actual_subscribe(observer)
  }
}
