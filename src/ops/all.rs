use crate::{
  observable::Observable,
  observer::Observer,
  rc::MutRc,
  subscriber::Subscriber,
  subscription::Teardown,
};

impl<Item, Err> Observable<Item, Err>
where
  Item: Clone + 'static,
  Err: 'static,
{
  /// Combine `sources` into one observable of snapshots.
  ///
  /// Nothing is emitted until every source has produced a value; from then
  /// on each value from any source emits a `Vec` holding the latest value of
  /// every source, in source order. Errors from any source are forwarded as
  /// they come. Completes once every source has completed; with no sources
  /// it completes right away.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// let a = Subject::<i32, ()>::new();
  /// let b = Subject::<i32, ()>::new();
  /// Observable::all(vec![a.observable(), b.observable()])
  ///   .subscribe(|pair| println!("{:?}", pair));
  /// a.next(1);
  /// b.next(2); // prints [1, 2]
  /// ```
  pub fn all(sources: Vec<Observable<Item, Err>>) -> Observable<Vec<Item>, Err> {
    Observable::new(move |subscriber: Subscriber<Vec<Item>, Err>| {
      if sources.is_empty() {
        subscriber.complete();
        return Teardown::empty();
      }
      let state = MutRc::own(AllState::new(sources.len()));
      let mut teardown = Teardown::empty();
      for (index, source) in sources.iter().enumerate() {
        let observer = AllObserver { index, state: state.clone(), downstream: subscriber.clone() };
        teardown = teardown.and(Teardown::unsubscribe(source.actual_subscribe(observer)));
      }
      teardown
    })
  }
}

struct AllState<Item> {
  latest: Vec<Option<Item>>,
  completed: Vec<bool>,
  done: bool,
}

impl<Item: Clone> AllState<Item> {
  fn new(len: usize) -> Self {
    AllState { latest: vec![None; len], completed: vec![false; len], done: false }
  }

  fn snapshot(&self) -> Option<Vec<Item>> { self.latest.iter().cloned().collect() }
}

struct AllObserver<Item, Err> {
  index: usize,
  state: MutRc<AllState<Item>>,
  downstream: Subscriber<Vec<Item>, Err>,
}

impl<Item: Clone, Err> Observer<Item, Err> for AllObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    let snapshot = {
      let mut state = self.state.rc_deref_mut();
      state.latest[self.index] = Some(value);
      state.snapshot()
    };
    if let Some(values) = snapshot {
      self.downstream.next(values);
    }
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    let all_done = {
      let mut state = self.state.rc_deref_mut();
      state.completed[self.index] = true;
      if !state.done && state.completed.iter().all(|c| *c) {
        state.done = true;
        true
      } else {
        false
      }
    };
    if all_done {
      self.downstream.complete();
    }
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[derive(Debug, PartialEq)]
  enum Event {
    Next(Vec<i32>),
    Error(&'static str),
    Complete,
  }

  fn record(observable: &Observable<Vec<i32>, &'static str>) -> (Rc<RefCell<Vec<Event>>>, Subscription) {
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e, c) = (log.clone(), log.clone(), log.clone());
    let subscription = observable.subscribe_all(
      move |v| n.borrow_mut().push(Event::Next(v)),
      move |err| e.borrow_mut().push(Event::Error(err)),
      move || c.borrow_mut().push(Event::Complete),
    );
    (log, subscription)
  }

  #[test]
  fn waits_for_every_source() {
    let a = Subject::new();
    let b = Subject::new();
    let (log, _) = record(&Observable::all(vec![a.observable(), b.observable()]));

    a.next(1);
    a.next(2);
    assert!(log.borrow().is_empty());

    b.next(10);
    a.next(3);
    b.next(20);
    assert_eq!(
      *log.borrow(),
      vec![Event::Next(vec![2, 10]), Event::Next(vec![3, 10]), Event::Next(vec![3, 20])]
    );
  }

  #[test]
  fn completes_after_every_source_completed() {
    let a = Subject::new();
    let b = Subject::new();
    let (log, _) = record(&Observable::all(vec![a.observable(), b.observable()]));

    b.complete();
    b.complete();
    assert!(log.borrow().is_empty());
    a.complete();
    a.complete();
    assert_eq!(*log.borrow(), vec![Event::Complete]);
  }

  #[test]
  fn forwards_every_error() {
    let a = Subject::new();
    let b = Subject::new();
    let (log, _) = record(&Observable::all(vec![a.observable(), b.observable()]));

    a.error("first");
    b.error("second");
    assert_eq!(*log.borrow(), vec![Event::Error("first"), Event::Error("second")]);
  }

  #[test]
  fn synchronous_sources_in_index_order() {
    let combined =
      Observable::all(vec![Observable::of(vec![1, 2]), Observable::of(vec![10, 20])]);
    let (log, _) = record(&combined);
    assert_eq!(
      *log.borrow(),
      vec![Event::Next(vec![2, 10]), Event::Next(vec![2, 20]), Event::Complete]
    );
  }

  #[test]
  fn empty_sources_complete_immediately() {
    let (log, _) = record(&Observable::all(vec![]));
    assert_eq!(*log.borrow(), vec![Event::Complete]);
  }

  #[test]
  fn unsubscribe_releases_every_source() {
    let a = Subject::<i32, &'static str>::new();
    let b = Subject::new();
    let (log, subscription) = record(&Observable::all(vec![a.observable(), b.observable()]));
    assert_eq!(a.observer_count(), 1);
    assert_eq!(b.observer_count(), 1);

    subscription.unsubscribe();
    a.next(1);
    b.next(2);
    assert_eq!(a.observer_count(), 0);
    assert_eq!(b.observer_count(), 0);
    assert!(log.borrow().is_empty());
  }

  #[test]
  fn combines_replaying_sources() {
    let a = BehaviorSubject::new(1);
    let b = BehaviorSubject::new(2);
    let (log, _) = record(&Observable::all(vec![a.observable(), b.observable()]));
    assert_eq!(*log.borrow(), vec![Event::Next(vec![1, 2])]);
    b.next(3);
    assert_eq!(*log.borrow(), vec![Event::Next(vec![1, 2]), Event::Next(vec![1, 3])]);
  }
}
