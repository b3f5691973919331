//! Bridge from an observable to a `Future`.
//!
//! The future resolves on the first event the source delivers:
//!
//! - a value resolves it with `Ok(Some(value))` and unsubscribes the source,
//! - `complete` without a value resolves it with `Ok(None)`,
//! - `error` resolves it with `Err(RxError::Errored(err))`,
//! - a source that lets go of its observer without signalling resolves it
//!   with `Err(RxError::Canceled)`.
//!
//! Dropping the future unsubscribes the source.

use std::{
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};

use futures::channel::oneshot;
use pin_project_lite::pin_project;

use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscription::Subscription,
};

type Outcome<Item, Err> = Result<Option<Item>, Err>;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Subscribe and return a future resolving with the first event.
  ///
  /// ```
  /// use futures::executor::block_on;
  /// use rxlite::prelude::*;
  ///
  /// let first = block_on(Observable::<_, ()>::of(vec![1, 2]).to_future());
  /// assert_eq!(first, Ok(Some(1)));
  /// ```
  pub fn to_future(&self) -> ObservableFuture<Item, Err> {
    let (sender, receiver) = oneshot::channel();
    let subscription =
      self.actual_subscribe(FirstEvent { sender: Some(sender), subscription: None });
    ObservableFuture { receiver, subscription }
  }
}

pin_project! {
  /// Future returned by [`Observable::to_future`].
  #[must_use = "futures do nothing unless you `.await` or poll them"]
  pub struct ObservableFuture<Item, Err> {
    #[pin]
    receiver: oneshot::Receiver<Outcome<Item, Err>>,
    subscription: Subscription,
  }

  impl<Item, Err> PinnedDrop for ObservableFuture<Item, Err> {
    fn drop(this: Pin<&mut Self>) {
      this.project().subscription.unsubscribe();
    }
  }
}

impl<Item, Err> Future for ObservableFuture<Item, Err> {
  type Output = Result<Option<Item>, RxError<Err>>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let this = self.project();
    match this.receiver.poll(cx) {
      Poll::Ready(Ok(Ok(value))) => Poll::Ready(Ok(value)),
      Poll::Ready(Ok(Err(err))) => Poll::Ready(Err(RxError::Errored(err))),
      Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(RxError::Canceled)),
      Poll::Pending => Poll::Pending,
    }
  }
}

struct FirstEvent<Item, Err> {
  sender: Option<oneshot::Sender<Outcome<Item, Err>>>,
  subscription: Option<Subscription>,
}

impl<Item, Err> FirstEvent<Item, Err> {
  fn resolve(&mut self, outcome: Outcome<Item, Err>) {
    let Some(sender) = self.sender.take() else {
      return;
    };
    if sender.send(outcome).is_err() {
      log::trace!("observable future dropped before it resolved");
    }
    if let Some(subscription) = self.subscription.take() {
      subscription.unsubscribe();
    }
  }
}

impl<Item, Err> Observer<Item, Err> for FirstEvent<Item, Err> {
  fn start(&mut self, subscription: &Subscription) {
    self.subscription = Some(subscription.clone());
  }

  fn next(&mut self, value: Item) { self.resolve(Ok(Some(value))) }

  fn error(&mut self, err: Err) { self.resolve(Err(err)) }

  fn complete(&mut self) { self.resolve(Ok(None)) }
}
