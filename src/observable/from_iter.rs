use crate::{
  observable::{Observable, Subscribable},
  subscription::Teardown,
};

impl<Item, Err> Observable<Item, Err> {
  /// Creates an observable that produces values from an iterable.
  ///
  /// Every subscription iterates a fresh clone of `iter`, emitting each value
  /// and then completing. Iteration stops early once the subscription is
  /// closed. The whole iteration runs inside `subscribe`, so `iter` must be
  /// finite.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// Observable::<_, ()>::from_iter(0..10).subscribe(|v| println!("{},", v));
  /// ```
  #[allow(clippy::should_implement_trait)]
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Item> + Clone + 'static,
  {
    Observable::new(move |subscriber| {
      for v in iter.clone() {
        if subscriber.is_closed() {
          return Teardown::empty();
        }
        subscriber.next(v);
      }
      subscriber.complete();
      Teardown::empty()
    })
  }

  /// Converts any source exposing an observable view, such as a subject,
  /// into a plain [`Observable`].
  #[allow(clippy::should_implement_trait)]
  pub fn from<S>(source: &S) -> Self
  where
    S: Subscribable<Item, Err> + ?Sized,
  {
    source.observable()
  }
}
