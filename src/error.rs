use thiserror::Error;

/// Failures surfaced at a call site instead of through an observer's `error`
/// callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError<Err> {
  /// The source recorded a terminal error.
  #[error("the source terminated with an error")]
  Errored(Err),

  /// The source was dropped before it produced a value or a terminal signal.
  #[error("the source was dropped before it signalled")]
  Canceled,
}

impl<Err> RxError<Err> {
  /// The error value carried by [`RxError::Errored`].
  pub fn into_inner(self) -> Option<Err> {
    match self {
      RxError::Errored(err) => Some(err),
      RxError::Canceled => None,
    }
  }
}
