use std::collections::VecDeque;

use super::Subscribers;
use crate::{
  observable::{Observable, Subscribable},
  observer::Observer,
  rc::MutRc,
};

/// What a [`ReplaySubject`] remembers for late subscribers.
pub(crate) struct Memory<Item, Err> {
  capacity: usize,
  values: VecDeque<Item>,
  err: Option<Err>,
  completed: bool,
}

impl<Item, Err> Memory<Item, Err> {
  fn new(capacity: usize) -> Self {
    Memory { capacity, values: VecDeque::new(), err: None, completed: false }
  }

  fn remember(&mut self, value: Item) {
    if self.capacity == 0 {
      return;
    }
    if self.values.len() >= self.capacity {
      self.values.pop_front();
    }
    self.values.push_back(value);
  }

  #[inline]
  pub(crate) fn is_terminated(&self) -> bool { self.err.is_some() || self.completed }

  #[inline]
  pub(crate) fn err(&self) -> Option<&Err> { self.err.as_ref() }
}

/// A subject that replays the last `memory_size` values, followed by the
/// terminal signal if one was recorded, to every new subscriber.
///
/// Once `error` or `complete` has been recorded further `next` calls are
/// ignored. A later `error` still replaces the recorded error.
///
/// ```
/// use rxlite::prelude::*;
///
/// let subject = ReplaySubject::<i32, ()>::new(2);
/// subject.next(1);
/// subject.next(2);
/// subject.next(3);
/// subject.subscribe(|v| println!("{}", v)); // prints 2, then 3
/// ```
pub struct ReplaySubject<Item, Err> {
  pub(crate) subscribers: Subscribers<Item, Err>,
  pub(crate) memory: MutRc<Memory<Item, Err>>,
}

impl<Item, Err> Clone for ReplaySubject<Item, Err> {
  fn clone(&self) -> Self {
    ReplaySubject { subscribers: self.subscribers.clone(), memory: self.memory.clone() }
  }
}

impl<Item, Err> ReplaySubject<Item, Err> {
  /// `memory_size`: number of values kept and replayed on subscription. `0`
  /// disables replay of values; the terminal signal is still replayed.
  pub fn new(memory_size: usize) -> Self {
    ReplaySubject { subscribers: Subscribers::default(), memory: MutRc::own(Memory::new(memory_size)) }
  }

  #[inline]
  pub fn memory_size(&self) -> usize { self.memory.rc_deref().capacity }

  /// Whether `error` or `complete` has been recorded.
  #[inline]
  pub fn is_terminated(&self) -> bool { self.memory.rc_deref().is_terminated() }

  #[inline]
  pub fn observer_count(&self) -> usize { self.subscribers.len() }

  /// Save `value` for replay without broadcasting it.
  pub(crate) fn remember(&self, value: Item) { self.memory.rc_deref_mut().remember(value) }
}

impl<Item: Clone, Err: Clone> ReplaySubject<Item, Err> {
  /// The values a new subscriber would be replayed, oldest first.
  pub fn buffered(&self) -> Vec<Item> { self.memory.rc_deref().values.iter().cloned().collect() }

  pub fn next(&self, value: Item) {
    if self.is_terminated() {
      log::debug!("replay subject ignored a value pushed after termination");
      return;
    }
    self.remember(value.clone());
    self.subscribers.next(value);
  }

  pub fn error(&self, err: Err) {
    self.memory.rc_deref_mut().err = Some(err.clone());
    self.subscribers.error(err);
  }

  pub fn complete(&self) {
    self.memory.rc_deref_mut().completed = true;
    self.subscribers.complete();
  }
}

impl<Item, Err> Subscribable<Item, Err> for ReplaySubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn observable(&self) -> Observable<Item, Err> {
    let subscribers = self.subscribers.clone();
    let memory = self.memory.clone();
    Observable::new(move |subscriber| {
      let teardown = subscribers.register(subscriber.clone());
      let (values, err, completed) = {
        let memory = memory.rc_deref();
        (memory.values.clone(), memory.err.clone(), memory.completed)
      };
      for value in values {
        subscriber.next(value);
      }
      if let Some(err) = err {
        subscriber.error(err);
      } else if completed {
        subscriber.complete();
      }
      teardown
    })
  }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for ReplaySubject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { ReplaySubject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { ReplaySubject::error(self, err) }

  #[inline]
  fn complete(&mut self) { ReplaySubject::complete(self) }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[derive(Debug, PartialEq)]
  enum Event {
    Next(i32),
    Error(&'static str),
    Complete,
  }

  fn record(subject: &ReplaySubject<i32, &'static str>) -> Rc<RefCell<Vec<Event>>> {
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e, c) = (log.clone(), log.clone(), log.clone());
    subject.subscribe_all(
      move |v| n.borrow_mut().push(Event::Next(v)),
      move |err| e.borrow_mut().push(Event::Error(err)),
      move || c.borrow_mut().push(Event::Complete),
    );
    log
  }

  #[test]
  fn huge_memory_size_allocates_lazily() {
    let subject = ReplaySubject::<u8, ()>::new(usize::MAX);
    assert_eq!(subject.memory_size(), usize::MAX);
    subject.next(1);
    subject.next(2);
    assert_eq!(subject.buffered(), vec![1, 2]);

    let idle = IdleSubject::<u8, ()>::new(
      Rc::new(ManualIdleScheduler::new()),
      IdleSubjectOptions::default().with_memory_size(usize::MAX),
    );
    idle.next(3);
    assert_eq!(idle.buffered(), vec![3]);
  }

  #[test]
  fn multicast_like_a_subject() {
    let subject = ReplaySubject::new(2);
    let a = record(&subject);
    let b = record(&subject);
    subject.next(42);
    assert_eq!(*a.borrow(), vec![Event::Next(42)]);
    assert_eq!(*b.borrow(), vec![Event::Next(42)]);
  }

  #[test]
  fn unsubscribed_observer_gets_nothing() {
    let subject = ReplaySubject::<i32, ()>::new(2);
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.subscribe(move |v| c_seen.borrow_mut().push(v)).unsubscribe();
    subject.next(42);
    assert!(seen.borrow().is_empty());
    assert_eq!(subject.observer_count(), 0);
  }

  #[test]
  fn keeps_the_last_values() {
    let subject = ReplaySubject::new(2);
    for v in [0, 0, 0, 42, 666] {
      subject.next(v);
    }
    assert_eq!(subject.buffered(), vec![42, 666]);
    let log = record(&subject);
    assert_eq!(*log.borrow(), vec![Event::Next(42), Event::Next(666)]);
  }

  #[test]
  fn replays_values_then_error() {
    let subject = ReplaySubject::new(2);
    subject.next(42);
    subject.next(666);
    subject.error("boum!");
    let log = record(&subject);
    assert_eq!(*log.borrow(), vec![Event::Next(42), Event::Next(666), Event::Error("boum!")]);
  }

  #[test]
  fn replays_values_then_complete() {
    let subject = ReplaySubject::new(2);
    subject.next(42);
    subject.next(666);
    subject.complete();
    let log = record(&subject);
    assert_eq!(*log.borrow(), vec![Event::Next(42), Event::Next(666), Event::Complete]);
  }

  #[test]
  fn error_wins_over_complete_and_latest_error_is_kept() {
    let subject = ReplaySubject::new(1);
    subject.complete();
    subject.error("first");
    subject.error("second");
    let log = record(&subject);
    assert_eq!(*log.borrow(), vec![Event::Error("second")]);
  }

  #[test]
  fn zero_capacity_replays_nothing() {
    let subject = ReplaySubject::new(0);
    subject.next(1);
    subject.next(2);
    let log = record(&subject);
    assert!(log.borrow().is_empty());
    subject.next(3);
    assert_eq!(*log.borrow(), vec![Event::Next(3)]);
    assert!(subject.buffered().is_empty());
  }

  #[test]
  fn next_after_termination_is_ignored() {
    let subject = ReplaySubject::new(3);
    let live = record(&subject);
    subject.next(1);
    subject.complete();
    subject.next(2);
    assert!(subject.is_terminated());
    assert_eq!(*live.borrow(), vec![Event::Next(1), Event::Complete]);
    assert_eq!(subject.buffered(), vec![1]);
  }

  #[test]
  fn buffer_never_exceeds_capacity() {
    let subject = ReplaySubject::<usize, ()>::new(3);
    for v in 0..10 {
      subject.next(v);
      assert!(subject.buffered().len() <= subject.memory_size());
    }
    assert_eq!(subject.buffered(), vec![7, 8, 9]);
  }
}
