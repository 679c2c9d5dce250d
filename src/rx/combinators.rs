use std::cell::RefCell;

use crate::arithmetic::RunningMean;
use crate::rx::observable::Observable;


/// Returns an observable of `a - b`, combining the latest values once both emitted.
/// `a` is subscribed first.
///
/// Unlike the FRP and model `diff`s, nothing is emitted while one side has no value yet: an
/// update of `a` alone does not produce a NaN difference.
pub fn diff(a: &Observable<f64>, b: &Observable<f64>) -> Observable<f64> {
  a.combine_latest(b, |a: &f64, b: &f64| a - b)
}


/// Same difference as `diff`, but `b` is subscribed first.
pub fn diff_reversed(a: &Observable<f64>, b: &Observable<f64>) -> Observable<f64> {
  b.combine_latest(a, |b: &f64, a: &f64| a - b)
}


/// Returns an observable of the running mean of `values`.
pub fn average(values: &Observable<f64>) -> Observable<f64> {
  let mean = RefCell::new(RunningMean::new());

  values.map(move |v| mean.borrow_mut().push(v))
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////
