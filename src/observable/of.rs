use crate::{observable::Observable, subscription::Teardown};

/// Creates an observable producing multiple values.
///
/// Completes immediately after emitting the values given. Never emits an error.
///
/// # Examples
///
/// ```
/// use rxlite::{of_sequence, prelude::*};
///
/// of_sequence!(1, 2, 3).subscribe(|v: i32| println!("{},", v));
///
/// // print log:
/// // 1
/// // 2
/// // 3
/// ```
#[macro_export]
macro_rules! of_sequence {
  ( $( $item:expr ),* $(,)? ) => {
    $crate::observable::Observable::<_, ()>::of(vec![$( $item ),*])
  };
}

impl<Item, Err> Observable<Item, Err>
where
  Item: Clone + 'static,
{
  /// Creates an observable producing `items` in order, then completing.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// Observable::<_, ()>::of(vec![1, 2, 3]).subscribe(|v| println!("{},", v));
  /// ```
  pub fn of(items: Vec<Item>) -> Self {
    Observable::new(move |subscriber| {
      for item in items.iter().cloned() {
        subscriber.next(item);
      }
      subscriber.complete();
      Teardown::empty()
    })
  }

  /// Emits `value` if there is one, then completes.
  pub fn complete(value: Option<Item>) -> Self {
    Observable::new(move |subscriber| {
      if let Some(v) = value.clone() {
        subscriber.next(v);
      }
      subscriber.complete();
      Teardown::empty()
    })
  }
}
