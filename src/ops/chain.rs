use std::rc::Rc;

use crate::{
  observable::Observable, observer::Observer, subscriber::Subscriber, subscription::Teardown,
};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Creates a new stream which calls `mapper` on each value and emits its
  /// return.
  ///
  /// `mapper` also receives an error sink: calling it sends an error
  /// downstream, which lets per-item logic fail without aborting the source.
  /// Errors from the source are forwarded unchanged and `complete` is
  /// forwarded at most once.
  ///
  /// Both `source.chain(mapper)` and `Observable::chain(&source, mapper)`
  /// work.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// Observable::<i32, String>::of(vec![1, -2, 3])
  ///   .chain(|v, error| {
  ///     if v < 0 {
  ///       error(format!("negative: {}", v));
  ///     }
  ///     v * 10
  ///   })
  ///   .subscribe_err(|v| println!("{}", v), |e| eprintln!("{}", e));
  /// ```
  pub fn chain<Out, F>(&self, mapper: F) -> Observable<Out, Err>
  where
    Out: 'static,
    F: Fn(Item, &dyn Fn(Err)) -> Out + 'static,
  {
    let source = self.clone();
    let mapper = Rc::new(mapper);
    Observable::new(move |subscriber: Subscriber<Out, Err>| {
      let observer =
        ChainObserver { mapper: mapper.clone(), downstream: subscriber, completed: false };
      Teardown::unsubscribe(source.actual_subscribe(observer))
    })
  }
}

struct ChainObserver<F, Out, Err> {
  mapper: Rc<F>,
  downstream: Subscriber<Out, Err>,
  completed: bool,
}

impl<Item, Out, Err, F> Observer<Item, Err> for ChainObserver<F, Out, Err>
where
  F: Fn(Item, &dyn Fn(Err)) -> Out,
{
  fn next(&mut self, value: Item) {
    let downstream = &self.downstream;
    let out = (self.mapper)(value, &|err| downstream.error(err));
    self.downstream.next(out);
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    if !self.completed {
      self.completed = true;
      self.downstream.complete();
    }
  }
}
