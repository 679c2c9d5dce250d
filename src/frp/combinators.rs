use crate::arithmetic::RunningMean;
use crate::frp::behavior::lift2;
use crate::frp::event_stream::EventStream;


/// Returns a stream of `latest(a) - latest(b)`, firing once per instant in which `a` or `b`
/// fired. A side which never fired counts as NaN.
pub fn diff(a: &EventStream<f64>, b: &EventStream<f64>) -> EventStream<f64> {
  let a = a.starts_with(f64::NAN);
  let b = b.starts_with(f64::NAN);

  lift2(|a: &f64, b: &f64| a - b, &a, &b).changes()
}


/// Returns a stream of the running mean of `values`.
pub fn average(values: &EventStream<f64>) -> EventStream<f64> {
  let mut mean = RunningMean::new();

  values.map(move |v| mean.push(v))
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////
