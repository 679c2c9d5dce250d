/// **Event streams.**
///
/// An `EventStream` is a node of the propagation graph. It is created either as a source, with
/// `receiver`, or derived from another stream (`map`, `filter`, `filter_repeats`).
/// Values pushed with `send` are propagated synchronously, rank after rank.
pub mod event_stream;

/// **Behaviors.**
///
/// A `Behavior` holds a value at every point in time. It is built from a stream with
/// `starts_with`, or from other behaviors with `lift2`, which is time-synchronized.
pub mod behavior;

/// Difference and running average over event streams.
pub mod combinators;

pub use self::behavior::{lift2, Behavior};
pub use self::combinators::{average, diff};
pub use self::event_stream::{receiver, EventStream};
