/// **Models.**
///
/// A `Model` holds one value and notifies its change handlers synchronously, in registration
/// order. Nothing orders notifications across models: a handler sees whatever state the other
/// models are in at that moment.
pub mod model;

/// Difference and running mean over models.
pub mod combinators;

pub use self::combinators::{diff, mean};
pub use self::model::{Model, ModelValue};
