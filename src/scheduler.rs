//! Idle scheduling: the host facility [`IdleSubject`](crate::subject::IdleSubject)
//! defers its broadcasts to.
//!
//! The crate never decides when the host is idle. It asks an injected
//! [`IdleScheduler`] to call back "later, when there is spare capacity" and
//! relies only on that callback running at most once per accepted request,
//! unless cancelled first.

use std::{collections::VecDeque, time::Duration};

use crate::rc::MutRc;

/// Identifies one accepted idle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdleHandle(pub u64);

/// A callback waiting for the host to become idle.
pub type IdleCallback = Box<dyn FnOnce()>;

/// Host capability to run a callback once the environment is idle.
pub trait IdleScheduler {
  /// Queue `callback` to run once when the host is idle. `timeout` is a hint
  /// for the latest acceptable delay.
  fn request_idle(&self, callback: IdleCallback, timeout: Option<Duration>) -> IdleHandle;

  /// Withdraw a request that has not fired yet. Unknown or already fired
  /// handles are ignored.
  fn cancel_idle(&self, handle: IdleHandle);
}

struct IdleTask {
  handle: IdleHandle,
  timeout: Option<Duration>,
  callback: IdleCallback,
}

#[derive(Default)]
struct IdleQueue {
  last_handle: u64,
  tasks: VecDeque<IdleTask>,
}

/// An idle scheduler driven by hand.
///
/// Requests queue up until the owner declares an idle period with
/// [`ManualIdleScheduler::run_idle`]. Useful for hosts with their own event
/// loop and for tests.
#[derive(Clone, Default)]
pub struct ManualIdleScheduler {
  queue: MutRc<IdleQueue>,
}

impl ManualIdleScheduler {
  pub fn new() -> Self { Self::default() }

  /// Number of requests waiting to fire.
  pub fn pending(&self) -> usize { self.queue.rc_deref().tasks.len() }

  /// Timeout hints of the waiting requests, oldest first.
  pub fn pending_timeouts(&self) -> Vec<Option<Duration>> {
    self.queue.rc_deref().tasks.iter().map(|t| t.timeout).collect()
  }

  /// Fire every request queued before this call, oldest first, and return how
  /// many fired. Requests made by the callbacks themselves wait for the next
  /// idle period.
  pub fn run_idle(&self) -> usize {
    let horizon = self.queue.rc_deref().last_handle;
    let mut fired = 0;
    loop {
      let task = {
        let mut queue = self.queue.rc_deref_mut();
        let ready = queue.tasks.front().is_some_and(|t| t.handle.0 <= horizon);
        if ready { queue.tasks.pop_front() } else { None }
      };
      let Some(task) = task else {
        break;
      };
      log::trace!("idle callback {:?} fired", task.handle);
      (task.callback)();
      fired += 1;
    }
    fired
  }
}

impl IdleScheduler for ManualIdleScheduler {
  fn request_idle(&self, callback: IdleCallback, timeout: Option<Duration>) -> IdleHandle {
    let mut queue = self.queue.rc_deref_mut();
    queue.last_handle += 1;
    let handle = IdleHandle(queue.last_handle);
    queue.tasks.push_back(IdleTask { handle, timeout, callback });
    handle
  }

  fn cancel_idle(&self, handle: IdleHandle) {
    self.queue.rc_deref_mut().tasks.retain(|t| t.handle != handle);
  }
}
