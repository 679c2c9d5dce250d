//! `glitch` puts three reactive programming styles side by side on the same small problem:
//! the difference between two numeric sources, one of which may be derived from the other
//! (e.g. a stream of values and its own running mean).
//!
//! The three styles are *functional reactive* event streams and behaviors (`frp`), models with
//! change handlers (`mvc`), and reactive-extensions observables (`rx`). Each one provides the
//! same two combinators, `diff` and a running average, on top of the shared arithmetic of
//! module `arithmetic`.
//!
//! Wiring a value against a value derived from it shows how each style orders updates. Only the
//! rank-ordered FRP runtime is *glitch-free*: models and observables deliver synchronously, one
//! subscriber after the other, so a combinator may briefly observe one input updated and the
//! other not yet. The driver sequences of module `demos` make this visible.
//!
//! Everything is single-threaded and synchronous.
//!


/// **Arithmetic shared by every combinator.**
///
/// `LatestPair` keeps the last value seen on each side of a difference, a side without a value
/// counting as NaN. `RunningMean` accumulates a count and a sum. NaN propagates silently:
/// nothing here can fail.
pub mod arithmetic;

/// **A continuation is a piece of propagation work awaiting a value of some type.**
///
/// Closures taking the runtime and a value are continuations. A continuation can be handed to the
/// runtime with `at`, to receive its value at a given rank, and `pause` postpones that delivery
/// by one instant. Runtime tasks are boxed continuations awaiting `()`.
pub mod continuations;

/// **A runtime propagates updates through an FRP graph.**
///
/// A runtime discretizes time in so-called *instants*. During an instant, tasks run by
/// increasing *rank*, the topological height of the node they update, so that a node only runs
/// once all of its inputs settled. Every task goes through `schedule`, which may also delay it by
/// some instants while keeping its rank.
///
/// The `instant` method runs one instant, while the `execute` method runs instants until there
/// is no more work to do.
pub mod runtime;

/// **Functional reactive programming: event streams and behaviors.**
///
/// Derived nodes are propagated by a `Runtime` in rank order, and lifted behaviors are
/// recomputed once per instant: a difference between a stream and its own mean never glitches.
pub mod frp;

/// **Model-observer binding.**
///
/// Models fire change handlers synchronously, in registration order, when their value changes.
pub mod mvc;

/// **Reactive extensions: subjects, observables and operators.**
///
/// Subjects are hot sources, observables are cold chains wired on subscription, and
/// `combine_latest` emits once every side emitted.
pub mod rx;

/// **Display regions**, and number formatting.
pub mod display;

/// **The driver sequences**, one per substrate and wiring.
pub mod demos;

/// Error type of the driver.
pub mod error;

pub use demos::{run_demos, Demo, DemoConfig};
pub use display::{OutputFormat, Page};
pub use error::{Error, Result};
