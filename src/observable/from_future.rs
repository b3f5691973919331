use std::future::Future;

use futures::{
  future::{abortable, FutureExt},
  task::{LocalSpawn, LocalSpawnExt},
};

use crate::{observable::Observable, subscriber::Subscriber, subscription::Teardown};

impl<Item, Err> Observable<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  /// Converts a `Future` resolving to a `Result` into an observable: `Ok`
  /// is emitted as a value followed by `complete`, `Err` goes to the error
  /// channel.
  ///
  /// The future runs once on `spawner`, the first time it is polled; every
  /// subscriber receives the same outcome. Unsubscribing before it resolves
  /// aborts that subscriber's task.
  ///
  /// ```
  /// use futures::{executor::LocalPool, future};
  /// use rxlite::prelude::*;
  ///
  /// let mut pool = LocalPool::new();
  /// Observable::<i32, ()>::from_future(future::ok(1), pool.spawner())
  ///   .subscribe(|v| println!("{}", v));
  /// pool.run();
  /// ```
  pub fn from_future<F, S>(future: F, spawner: S) -> Self
  where
    F: Future<Output = Result<Item, Err>> + 'static,
    S: LocalSpawn + 'static,
  {
    let shared = future.shared();
    Observable::new(move |subscriber: Subscriber<Item, Err>| {
      let task = shared.clone().map(move |result| match result {
        Ok(value) => {
          subscriber.next(value);
          subscriber.complete();
        }
        Err(err) => subscriber.error(err),
      });
      let (task, handle) = abortable(task);
      if let Err(err) = spawner.spawn_local(task.map(|_| ())) {
        log::error!("from_future could not spawn its task: {}", err);
        return Teardown::empty();
      }
      Teardown::new(move || handle.abort())
    })
  }
}
