#[cfg(feature = "future")]
use std::future::Future;

#[cfg(feature = "future")]
use futures::{channel::oneshot, FutureExt};

use super::ReplaySubject;
#[cfg(feature = "future")]
use crate::subscription::Subscription;
use crate::{
  error::RxError,
  observable::{Observable, Subscribable},
  observer::Observer,
  rc::MutRc,
};

/// Always holds one value, which can be recalled at any time with
/// [`BehaviorSubject::get`]. Basically a variable with subscription.
///
/// Behaves as a [`ReplaySubject`] of capacity 1 that already received the
/// seed value, so every subscriber is handed the current value right away.
///
/// ```
/// use rxlite::prelude::*;
///
/// let subject = BehaviorSubject::<i32, ()>::new(12);
/// assert_eq!(subject.get(), Ok(12));
/// subject.next(42);
/// assert_eq!(subject.get(), Ok(42));
/// ```
pub struct BehaviorSubject<Item, Err> {
  subject: ReplaySubject<Item, Err>,
  value: MutRc<Item>,
}

impl<Item, Err> Clone for BehaviorSubject<Item, Err> {
  fn clone(&self) -> Self {
    BehaviorSubject { subject: self.subject.clone(), value: self.value.clone() }
  }
}

impl<Item: Clone, Err: Clone> BehaviorSubject<Item, Err> {
  pub fn new(value: Item) -> Self {
    let subject = ReplaySubject::new(1);
    subject.next(value.clone());
    BehaviorSubject { subject, value: MutRc::own(value) }
  }

  /// Retrieve the last pushed value.
  ///
  /// Fails with [`RxError::Errored`] carrying the recorded error once the
  /// subject has errored.
  pub fn get(&self) -> Result<Item, RxError<Err>> {
    if let Some(err) = self.subject.memory.rc_deref().err() {
      return Err(RxError::Errored(err.clone()));
    }
    Ok(self.value.rc_deref().clone())
  }

  pub fn next(&self, value: Item) {
    if self.subject.is_terminated() {
      log::debug!("behavior subject ignored a value pushed after termination");
      return;
    }
    *self.value.rc_deref_mut() = value.clone();
    self.subject.next(value);
  }

  #[inline]
  pub fn error(&self, err: Err) { self.subject.error(err) }

  #[inline]
  pub fn complete(&self) { self.subject.complete() }

  #[inline]
  pub fn is_terminated(&self) -> bool { self.subject.is_terminated() }

  #[inline]
  pub fn observer_count(&self) -> usize { self.subject.observer_count() }
}

impl<Item, Err> Subscribable<Item, Err> for BehaviorSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  #[inline]
  fn observable(&self) -> Observable<Item, Err> { self.subject.observable() }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for BehaviorSubject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { BehaviorSubject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { BehaviorSubject::error(self, err) }

  #[inline]
  fn complete(&mut self) { BehaviorSubject::complete(self) }
}

#[cfg(feature = "future")]
impl<Item, Err> BehaviorSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  /// Create a `BehaviorSubject` from any source, seeded with the first value
  /// the source delivers.
  ///
  /// The returned future resolves once that value arrives. From then on every
  /// `next`, `error` and `complete` of the source is forwarded to the new
  /// subject. If the source errors before producing a value the future
  /// resolves with [`RxError::Errored`]; if it completes first, or lets go of
  /// its observers, with [`RxError::Canceled`]. Dropping the future before it
  /// resolves stops listening to the source.
  ///
  /// ```
  /// use futures::executor::block_on;
  /// use rxlite::prelude::*;
  ///
  /// let source = Subject::<i32, ()>::new();
  /// let behavior = BehaviorSubject::from_subject(&source);
  /// source.next(1);
  /// let behavior = block_on(behavior).unwrap();
  /// source.next(2);
  /// assert_eq!(behavior.get(), Ok(2));
  /// ```
  pub fn from_subject<S>(source: &S) -> impl Future<Output = Result<Self, RxError<Err>>>
  where
    S: Subscribable<Item, Err> + ?Sized,
  {
    let (sender, receiver) = oneshot::channel();
    let source = source.observable();
    let seed = Seed { sender: Some(sender), source: source.clone(), subscription: None };
    let guard = source.actual_subscribe(seed).unsubscribe_when_dropped();
    receiver.map(move |outcome| {
      drop(guard);
      outcome.unwrap_or(Err(RxError::Canceled))
    })
  }
}

#[cfg(feature = "future")]
type Seeded<Item, Err> = Result<BehaviorSubject<Item, Err>, RxError<Err>>;

#[cfg(feature = "future")]
struct Seed<Item, Err> {
  sender: Option<oneshot::Sender<Seeded<Item, Err>>>,
  source: Observable<Item, Err>,
  subscription: Option<Subscription>,
}

#[cfg(feature = "future")]
impl<Item, Err> Seed<Item, Err> {
  fn resolve(&mut self, sender: oneshot::Sender<Seeded<Item, Err>>, outcome: Seeded<Item, Err>) {
    if sender.send(outcome).is_err() {
      log::trace!("from_subject future dropped before it resolved");
    }
    if let Some(subscription) = self.subscription.take() {
      subscription.unsubscribe();
    }
  }
}

#[cfg(feature = "future")]
impl<Item, Err> Observer<Item, Err> for Seed<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn start(&mut self, subscription: &Subscription) {
    self.subscription = Some(subscription.clone());
  }

  fn next(&mut self, value: Item) {
    let Some(sender) = self.sender.take() else {
      return;
    };
    let behavior = BehaviorSubject::new(value);
    self.source.actual_subscribe(behavior.clone());
    self.resolve(sender, Ok(behavior));
  }

  fn error(&mut self, err: Err) {
    if let Some(sender) = self.sender.take() {
      self.resolve(sender, Err(RxError::Errored(err)));
    }
  }

  fn complete(&mut self) {
    if let Some(sender) = self.sender.take() {
      self.resolve(sender, Err(RxError::Canceled));
    }
  }
}
