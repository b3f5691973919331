//! Combinators built on top of [`Observable`](crate::observable::Observable).
//!
//! Each one is an inherent method on `Observable` that returns a new
//! observable; subscribing to it subscribes to the sources and unsubscribing
//! releases them.

mod all;
mod chain;
#[cfg(feature = "future")]
mod into_future;

#[cfg(feature = "future")]
pub use into_future::ObservableFuture;
