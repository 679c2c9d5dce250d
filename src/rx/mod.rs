/// Observer callbacks.
pub mod observer;

/// Subscription handles.
pub mod subscription;

/// **Subjects.**
///
/// A `Subject` is the hot entry point of a chain: values are pushed into it from outside, and
/// forwarded to its observers as they arrive.
pub mod subject;

/// **Observables and operators.**
///
/// Observables are cold: operators (`map`, `filter`, `distinct_until_changed`,
/// `combine_latest`) only describe a chain, which is wired to its source on `subscribe`.
/// There is no scheduler: a value travels down the whole chain before `next` returns, and
/// observers of a same source are served one chain after the other.
pub mod observable;

/// Difference and running average over observables.
pub mod combinators;

pub use self::combinators::{average, diff, diff_reversed};
pub use self::observable::Observable;
pub use self::observer::Observer;
pub use self::subject::Subject;
pub use self::subscription::Subscription;
