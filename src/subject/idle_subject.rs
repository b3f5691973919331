use std::{rc::Rc, time::Duration};

use super::ReplaySubject;
use crate::{
  observable::{Observable, Subscribable},
  observer::Observer,
  rc::MutRc,
  scheduler::{IdleHandle, IdleScheduler},
};

/// Construction parameters of an [`IdleSubject`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleSubjectOptions {
  /// Number of values kept for replay on subscription.
  pub memory_size: usize,
  /// Hint handed to the scheduler with every idle request.
  pub timeout: Option<Duration>,
}

impl IdleSubjectOptions {
  pub fn with_memory_size(mut self, memory_size: usize) -> Self {
    self.memory_size = memory_size;
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }
}

#[derive(Default)]
struct IdleState {
  handle: Option<IdleHandle>,
  generation: u64,
  pending: bool,
}

/// A subject that does not broadcast values immediately but only when the
/// host is idle.
///
/// Observers should not expect to receive every update, only the last one
/// pushed before the host became idle. The replay buffer still records every
/// value, so a late subscriber sees the full history (up to `memory_size`).
///
/// `error` and `complete` are delivered synchronously and withdraw any
/// outstanding idle request.
///
/// ```
/// use std::rc::Rc;
/// use rxlite::prelude::*;
///
/// let idle = Rc::new(ManualIdleScheduler::new());
/// let subject = IdleSubject::<i32, ()>::new(idle.clone(), IdleSubjectOptions::default());
/// subject.subscribe(|v| assert_eq!(v, 2));
/// subject.next(1);
/// subject.next(2);
/// idle.run_idle();
/// ```
pub struct IdleSubject<Item, Err> {
  subject: ReplaySubject<Item, Err>,
  scheduler: Rc<dyn IdleScheduler>,
  timeout: Option<Duration>,
  idle: MutRc<IdleState>,
}

impl<Item, Err> Clone for IdleSubject<Item, Err> {
  fn clone(&self) -> Self {
    IdleSubject {
      subject: self.subject.clone(),
      scheduler: self.scheduler.clone(),
      timeout: self.timeout,
      idle: self.idle.clone(),
    }
  }
}

impl<Item, Err> IdleSubject<Item, Err> {
  pub fn new(scheduler: Rc<dyn IdleScheduler>, options: IdleSubjectOptions) -> Self {
    IdleSubject {
      subject: ReplaySubject::new(options.memory_size),
      scheduler,
      timeout: options.timeout,
      idle: MutRc::own(IdleState::default()),
    }
  }

  /// Whether a broadcast is waiting for the host to become idle.
  #[inline]
  pub fn is_idle_pending(&self) -> bool { self.idle.rc_deref().pending }

  #[inline]
  pub fn is_terminated(&self) -> bool { self.subject.is_terminated() }

  #[inline]
  pub fn observer_count(&self) -> usize { self.subject.observer_count() }

  fn cancel_pending(&self) {
    let handle = {
      let mut idle = self.idle.rc_deref_mut();
      idle.generation += 1;
      idle.pending = false;
      idle.handle.take()
    };
    if let Some(handle) = handle {
      log::debug!("idle request {:?} cancelled", handle);
      self.scheduler.cancel_idle(handle);
    }
  }
}

impl<Item, Err> IdleSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  /// The values a new subscriber would be replayed, oldest first.
  #[inline]
  pub fn buffered(&self) -> Vec<Item> { self.subject.buffered() }

  /// Record `value` for replay and schedule its broadcast for the next idle
  /// period, replacing any broadcast still waiting.
  pub fn next(&self, value: Item) {
    if self.is_terminated() {
      log::debug!("idle subject ignored a value pushed after termination");
      return;
    }
    self.subject.remember(value.clone());
    self.cancel_pending();

    let generation = {
      let mut idle = self.idle.rc_deref_mut();
      idle.pending = true;
      idle.generation
    };
    let subscribers = self.subject.subscribers.clone();
    let idle = self.idle.clone();
    let handle = self.scheduler.request_idle(
      Box::new(move || {
        {
          let mut state = idle.rc_deref_mut();
          if state.generation != generation || !state.pending {
            log::trace!("stale idle callback ignored");
            return;
          }
          state.pending = false;
          state.handle = None;
        }
        subscribers.next(value);
      }),
      self.timeout,
    );

    // The scheduler may have fired the callback before returning.
    let mut idle = self.idle.rc_deref_mut();
    if idle.generation == generation && idle.pending {
      log::debug!("idle request {:?} issued", handle);
      idle.handle = Some(handle);
    }
  }

  pub fn error(&self, err: Err) {
    self.cancel_pending();
    self.subject.error(err);
  }

  pub fn complete(&self) {
    self.cancel_pending();
    self.subject.complete();
  }
}

impl<Item, Err> Subscribable<Item, Err> for IdleSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  #[inline]
  fn observable(&self) -> Observable<Item, Err> { self.subject.observable() }
}

impl<Item, Err> Observer<Item, Err> for IdleSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  #[inline]
  fn next(&mut self, value: Item) { IdleSubject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { IdleSubject::error(self, err) }

  #[inline]
  fn complete(&mut self) { IdleSubject::complete(self) }
}
