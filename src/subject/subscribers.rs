use smallvec::SmallVec;

use crate::{
  observer::Notification, rc::MutRc, subscriber::Subscriber, subscription::Teardown,
};

struct List<Item, Err> {
  next_id: usize,
  observers: Vec<(usize, Subscriber<Item, Err>)>,
}

impl<Item, Err> Default for List<Item, Err> {
  fn default() -> Self { List { next_id: 0, observers: vec![] } }
}

/// The live observers of a subject and the broadcast routine shared by every
/// subject kind.
///
/// Observers are kept in registration order. Broadcasting iterates a snapshot
/// taken before the first callback runs, so observers added during a
/// broadcast do not receive the in-flight event, and observers removed during
/// it receive nothing more (their subscriber is closed).
pub(crate) struct Subscribers<Item, Err>(MutRc<List<Item, Err>>);

impl<Item, Err> Clone for Subscribers<Item, Err> {
  fn clone(&self) -> Self { Subscribers(self.0.clone()) }
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Subscribers(MutRc::own(List::default())) }
}

impl<Item, Err> Subscribers<Item, Err> {
  #[inline]
  pub(crate) fn len(&self) -> usize { self.0.rc_deref().observers.len() }

  fn snapshot(&self) -> SmallVec<[Subscriber<Item, Err>; 4]> {
    self.0.rc_deref().observers.iter().map(|(_, s)| s.clone()).collect()
  }
}

impl<Item: 'static, Err: 'static> Subscribers<Item, Err> {
  /// Add `subscriber` and return the teardown that removes it again.
  pub(crate) fn register(&self, subscriber: Subscriber<Item, Err>) -> Teardown {
    let id = {
      let mut list = self.0.rc_deref_mut();
      let id = list.next_id;
      list.next_id += 1;
      list.observers.push((id, subscriber));
      id
    };
    log::debug!("subject observer {} registered", id);

    let list = self.0.downgrade();
    Teardown::new(move || {
      let Some(list) = list.upgrade() else {
        return;
      };
      let removed = {
        let mut list = list.rc_deref_mut();
        list.observers.iter().position(|(i, _)| *i == id).map(|idx| list.observers.remove(idx))
      };
      if removed.is_some() {
        log::debug!("subject observer {} removed", id);
      }
    })
  }
}

impl<Item: Clone, Err: Clone> Subscribers<Item, Err> {
  /// Deliver `notification` to every observer in registration order.
  ///
  /// The value is cloned for all observers except the last one, which
  /// receives the moved value.
  pub(crate) fn broadcast(&self, notification: Notification<Item, Err>) {
    let snapshot = self.snapshot();
    log::trace!("broadcast to {} observers", snapshot.len());
    let mut iter = snapshot.iter().peekable();
    while let Some(subscriber) = iter.next() {
      if iter.peek().is_some() {
        subscriber.deliver(notification.clone());
      } else {
        subscriber.deliver(notification);
        break;
      }
    }
  }

  #[inline]
  pub(crate) fn next(&self, value: Item) { self.broadcast(Notification::Next(value)) }

  #[inline]
  pub(crate) fn error(&self, err: Err) { self.broadcast(Notification::Error(err)) }

  #[inline]
  pub(crate) fn complete(&self) { self.broadcast(Notification::Complete) }
}
