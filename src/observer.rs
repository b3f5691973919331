//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides four callbacks: `start` (handed the subscription before any
//! value flows), `next` (for values), `error` (for errors), and `complete`
//! (for stream completion). Every callback has a no-op default, so an
//! observer only overrides the events it cares about.

use std::marker::PhantomData;

use crate::subscription::Subscription;

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
///
/// The default `error` swallows the error. An error nobody listens to is
/// dropped silently.
pub trait Observer<Item, Err> {
  /// Called synchronously when subscribing, before the producer runs.
  ///
  /// Unsubscribing `subscription` from here prevents the producer from ever
  /// being invoked.
  fn start(&mut self, _subscription: &Subscription) {}

  /// Receive the next value from the observable
  fn next(&mut self, _value: Item) {}

  /// Handle an error from the observable
  fn error(&mut self, _err: Err) {}

  /// Handle completion of the observable
  fn complete(&mut self) {}
}

/// A single event travelling from a producer to an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

impl<Item, Err> Notification<Item, Err> {
  /// Dispatch this event to the matching callback of `observer`.
  pub fn accept<O>(self, observer: &mut O)
  where
    O: Observer<Item, Err> + ?Sized,
  {
    match self {
      Notification::Next(v) => observer.next(v),
      Notification::Error(e) => observer.error(e),
      Notification::Complete => observer.complete(),
    }
  }
}

impl<Item, Err, O> Observer<Item, Err> for Box<O>
where
  O: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn start(&mut self, subscription: &Subscription) { (**self).start(subscription) }
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }
  #[inline]
  fn error(&mut self, err: Err) { (**self).error(err) }
  #[inline]
  fn complete(&mut self) { (**self).complete() }
}

/// Boxed observer, the normalized shape stored by subscribers.
pub type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err>>;

// ============================================================================
// Closure adapters
// ============================================================================

/// Closure adapter standing in for `next`.
///
/// This enables ergonomic subscription syntax: `observable.subscribe(|v|
/// println!("{}", v))`. The closure becomes the `next` handler, while `error`
/// and `complete` are ignored.
#[derive(Clone)]
pub struct FnMutObserver<F, Err> {
  next: F,
  _hint: PhantomData<fn(Err)>,
}

impl<F, Err> FnMutObserver<F, Err> {
  pub fn new(next: F) -> Self { Self { next, _hint: PhantomData } }
}

impl<F, Item, Err> Observer<Item, Err> for FnMutObserver<F, Err>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }
}

/// Observer assembled from `next`, `error` and `complete` closures.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let observer = ObserverAll::new(
///   |v: i32| println!("{}", v),
///   |e: &str| eprintln!("{}", e),
///   || println!("done"),
/// );
/// Observable::<_, &str>::of(vec![1, 2]).subscribe_observer(observer);
/// ```
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }
  #[inline]
  fn error(&mut self, err: Err) { (self.error)(err) }
  #[inline]
  fn complete(&mut self) { (self.complete)() }
}
