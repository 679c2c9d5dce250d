use std::rc::Rc;
use std::cell::RefCell;

use crate::arithmetic::{LatestPair, RunningMean, Side};
use crate::mvc::model::Model;


/// Returns a model of `latest(a) - latest(b)`, updated whenever `a` or `b` changes.
///
/// The result starts empty. Its handlers run in the middle of whatever notification updated
/// `a` or `b`, so when `b` depends on `a`, they may observe `b` updated and `a` not yet.
pub fn diff(a: &Model<f64>, b: &Model<f64>) -> Model<f64> {
  let difference = Model::empty();
  let latest     = Rc::new(RefCell::new(LatestPair::new()));

  for (model, side) in [(a, Side::Left), (b, Side::Right)] {
    let latest = latest.clone();
    let target = difference.clone();

    model.on_change(move |m: &Model<f64>| {
      let value = m.get().unwrap_or(f64::NAN);
      let updated = latest.borrow_mut().update(side, value);
      target.set(updated);
    });
  }

  difference
}


/// Returns a model of the running mean of every value taken by `source`. It starts at NaN.
pub fn mean(source: &Model<f64>) -> Model<f64> {
  let average = Model::new(f64::NAN);
  let running = RefCell::new(RunningMean::new());

  let target = average.clone();
  source.on_change(move |m: &Model<f64>| {
    let updated = running.borrow_mut().push(m.get().unwrap_or(f64::NAN));
    target.set(updated);
  });

  average
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;


  fn collect(model: &Model<f64>) -> Rc<RefCell<Vec<f64>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_copy = seen.clone();
    model.on_change(move |m: &Model<f64>| {
      seen_copy.borrow_mut().push(m.get().unwrap_or(f64::NAN));
    });
    seen
  }

  #[test]
  fn diff_of_independent_models() {
    let a = Model::new(f64::NAN);
    let b = Model::new(f64::NAN);
    let seen = collect(&diff(&a, &b));

    b.set(10.0);
    a.set(12.0);
    b.set(11.0);
    a.set(14.0);
    b.set(8.0);

    let seen = seen.borrow();
    assert!(seen[0].is_nan());
    assert_eq!(&seen[1..], &[2.0, 1.0, 3.0, 6.0]);
  }

  #[test]
  fn mean_model() {
    let source  = Model::new(f64::NAN);
    let average = mean(&source);
    let seen    = collect(&average);

    for v in [4.0, 5.0, 7.0, 12.0] {
      source.set(v);
    }

    assert_eq!(*seen.borrow(), vec![4.0, 4.5, 16.0 / 3.0, 7.0]);
  }

  #[test]
  fn diff_against_own_mean_glitches() {
    let seq  = Model::new(f64::NAN);
    let seen = collect(&diff(&seq, &mean(&seq)));

    for v in [4.0, 5.0, 7.0, 12.0] {
      seq.set(v);
    }

    let seen = seen.borrow();
    assert!(seen[0].is_nan());
    assert_eq!(
      &seen[1..],
      &[0.0, -0.5, 0.5, 5.0 - 16.0 / 3.0, 7.0 - 16.0 / 3.0, 0.0, 5.0]
    );
  }

  proptest! {
    #[test]
    fn diff_tracks_latest_distinct_values(
      updates in prop::collection::vec((any::<bool>(), -1000i32..1000), 1..40)
    ) {
      let a = Model::new(f64::NAN);
      let b = Model::new(f64::NAN);
      let difference = diff(&a, &b);

      let (mut left, mut right) = (f64::NAN, f64::NAN);
      for (is_left, value) in updates {
        let value = f64::from(value);
        if is_left {
          left = value;
          a.set(value);
        } else {
          right = value;
          b.set(value);
        }

        let current = difference.get().unwrap_or(f64::NAN);
        let expected = left - right;
        prop_assert!(current == expected || (current.is_nan() && expected.is_nan()));
      }
    }
  }
}
