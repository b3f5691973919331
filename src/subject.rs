//! Subjects: observables that can also be pushed into.
//!
//! Every subject kind is a cheap, cloneable handle; clones share the same
//! observers and memory. All of them build on one broadcast routine
//! ([`Subscribers`]) and differ only in the state they keep around it:
//!
//! | Type | Keeps | New subscribers receive |
//! |------|-------|-------------------------|
//! | [`Subject`] | observers | live events only |
//! | [`ReplaySubject`] | + last N values, terminal signal | buffered values, then the terminal signal |
//! | [`BehaviorSubject`] | + current value | the current value |
//! | [`IdleSubject`] | + pending idle request | buffered values; live values are coalesced until idle |

use crate::{
  observable::{Observable, Subscribable},
  observer::Observer,
};

mod behavior_subject;
mod idle_subject;
mod replay_subject;
mod subscribers;

pub use behavior_subject::*;
pub use idle_subject::*;
pub use replay_subject::*;
pub(crate) use subscribers::Subscribers;

/// Subject: a hot observable that multicasts values to many observers.
///
/// `next`, `error` and `complete` are forwarded, in subscription order, to
/// the observers subscribed at the time of the call. Nothing is remembered:
/// a late subscriber only sees what is pushed after it subscribed.
///
/// Pushing into the subject from inside an observer callback starts a nested
/// broadcast right away, with one exception: the observer whose callback is
/// still running cannot be re-entered, so its copy of the nested event is
/// queued and delivered once that callback returns. With observers `a` and
/// `b`, where `a` pushes `2` on receiving `1`, the order is `a1, b2, a2, b1`
/// rather than `a1, a2, b2, b1`.
///
/// ```
/// use rxlite::prelude::*;
///
/// let subject = Subject::<i32, ()>::default();
/// subject.subscribe(|v| println!("a: {}", v));
/// subject.subscribe(|v| println!("b: {}", v));
/// subject.next(1);
/// ```
pub struct Subject<Item, Err> {
  pub(crate) subscribers: Subscribers<Item, Err>,
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject { subscribers: self.subscribers.clone() } }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self { Subject { subscribers: Subscribers::default() } }
}

impl<Item, Err> Subject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// Number of currently subscribed observers.
  #[inline]
  pub fn observer_count(&self) -> usize { self.subscribers.len() }
}

impl<Item: Clone, Err: Clone> Subject<Item, Err> {
  #[inline]
  pub fn next(&self, value: Item) { self.subscribers.next(value) }

  #[inline]
  pub fn error(&self, err: Err) { self.subscribers.error(err) }

  #[inline]
  pub fn complete(&self) { self.subscribers.complete() }
}

impl<Item, Err> Subscribable<Item, Err> for Subject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn observable(&self) -> Observable<Item, Err> {
    let subscribers = self.subscribers.clone();
    Observable::new(move |subscriber| subscribers.register(subscriber))
  }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for Subject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subject::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subject::complete(self) }
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use crate::prelude::*;

  fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    (log, move |v| c_log.borrow_mut().push(v))
  }

  #[test]
  fn multicast_in_subscription_order() {
    let order = Rc::new(RefCell::new(vec![]));
    let subject = Subject::<i32, ()>::new();
    for id in 0..3 {
      let order = order.clone();
      subject.subscribe(move |v| order.borrow_mut().push((id, v)));
    }
    subject.next(42);
    assert_eq!(*order.borrow(), vec![(0, 42), (1, 42), (2, 42)]);
  }

  #[test]
  fn unsubscribe_removes_only_that_observer() {
    let subject = Subject::<i32, ()>::new();
    let (first, next1) = recorder();
    let (second, next2) = recorder();
    subject.subscribe(next1);
    let subscription = subject.subscribe(next2);
    assert_eq!(subject.observer_count(), 2);

    subscription.unsubscribe();
    subject.next(42);

    assert_eq!(subject.observer_count(), 1);
    assert_eq!(*first.borrow(), vec![42]);
    assert!(second.borrow().is_empty());
  }

  #[test]
  fn late_subscriber_sees_only_later_values() {
    let subject = Subject::<i32, ()>::new();
    subject.next(1);
    let (seen, next) = recorder();
    subject.subscribe(next);
    subject.next(2);
    assert_eq!(*seen.borrow(), vec![2]);
  }

  #[test]
  fn error_reaches_error_callback_not_next() {
    let subject = Subject::<i32, &str>::new();
    let (values, next) = recorder();
    let (errors, error) = recorder();
    subject.subscribe_err(next, error);
    subject.error("boum!");
    assert!(values.borrow().is_empty());
    assert_eq!(*errors.borrow(), vec!["boum!"]);
  }

  #[test]
  fn complete_broadcast() {
    let subject = Subject::<i32, ()>::new();
    let count = Rc::new(Cell::new(0));
    for _ in 0..2 {
      let count = count.clone();
      subject.subscribe_complete(|_| {}, move || count.set(count.get() + 1));
    }
    subject.complete();
    assert_eq!(count.get(), 2);
  }

  #[test]
  fn dropped_subject_releases_its_observers() {
    let marker = Rc::new(Cell::new(0));
    let subject = Subject::<i32, ()>::new();
    let c_marker = marker.clone();
    let subscription = subject.subscribe(move |v| c_marker.set(v));
    assert_eq!(Rc::strong_count(&marker), 2);

    drop(subject);
    assert_eq!(Rc::strong_count(&marker), 1);
    assert!(!subscription.is_closed());
    subscription.unsubscribe();
    assert!(subscription.is_closed());
  }

  #[test]
  fn unsubscribe_after_drop_of_every_handle() {
    let marker = Rc::new(Cell::new(0));
    let subject = ReplaySubject::<i32, ()>::new(1);
    let c_marker = marker.clone();
    let subscription = subject.subscribe(move |v| c_marker.set(v));
    drop(subscription);
    drop(subject);
    assert_eq!(Rc::strong_count(&marker), 1);
  }

  #[test]
  fn events_without_observers_are_dropped() {
    let subject = Subject::<i32, &str>::new();
    subject.next(1);
    subject.error("nobody listens");
    subject.complete();
  }

  #[test]
  fn reentrant_next_from_observer() {
    let subject = Subject::<i32, ()>::new();
    let seen = Rc::new(RefCell::new(vec![]));
    {
      let subject = subject.clone();
      let seen = seen.clone();
      subject.clone().subscribe(move |v| {
        seen.borrow_mut().push(("a", v));
        if v == 1 {
          subject.next(2);
        }
      });
    }
    {
      let seen = seen.clone();
      subject.subscribe(move |v| seen.borrow_mut().push(("b", v)));
    }
    subject.next(1);
    assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 2), ("a", 2), ("b", 1)]);
  }

  #[test]
  fn unsubscribe_during_broadcast_stops_delivery() {
    let subject = Subject::<i32, ()>::new();
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let seen = Rc::new(RefCell::new(vec![]));
    {
      let victim = victim.clone();
      subject.subscribe(move |_| {
        if let Some(s) = victim.borrow().as_ref() {
          s.unsubscribe();
        }
      });
    }
    let c_seen = seen.clone();
    *victim.borrow_mut() = Some(subject.subscribe(move |v| c_seen.borrow_mut().push(v)));
    subject.next(1);
    assert!(seen.borrow().is_empty());
    assert_eq!(subject.observer_count(), 1);
  }

  #[test]
  fn subscribe_during_broadcast_misses_inflight_event() {
    let subject = Subject::<i32, ()>::new();
    let seen = Rc::new(RefCell::new(vec![]));
    {
      let subject = subject.clone();
      let seen = seen.clone();
      let subscribed = Cell::new(false);
      subject.clone().subscribe(move |_| {
        if !subscribed.replace(true) {
          let seen = seen.clone();
          subject.subscribe(move |v| seen.borrow_mut().push(v));
        }
      });
    }
    subject.next(1);
    subject.next(2);
    assert_eq!(*seen.borrow(), vec![2]);
  }

  #[test]
  fn subject_relays_an_observable() {
    let subject = Subject::<i32, ()>::new();
    let (seen, next) = recorder();
    subject.subscribe(next);
    Observable::of(vec![1, 2]).subscribe_observer(subject.clone());
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }
}
