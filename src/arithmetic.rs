///////////////////////////////////////////////////////////////////////////////////////////////////
// LATEST PAIR
///////////////////////////////////////////////////////////////////////////////////////////////////

/// One of the two inputs of a difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side { Left, Right }


/// Last value seen on each side of a difference (last-value-wins).
///
/// A side which has not been updated yet counts as NaN, and NaN propagates silently.
#[derive(Clone, Debug, Default)]
pub struct LatestPair {
  left : Option<f64>,
  right: Option<f64>
}


impl LatestPair {
  /// Creates a pair where no side has a value yet.
  pub fn new() -> Self {
    Self::default()
  }

  /// Records `value` as the latest value of `side`, and returns the updated difference.
  pub fn update(&mut self, side: Side, value: f64) -> f64 {
    match side {
      Side::Left  => self.left  = Some(value),
      Side::Right => self.right = Some(value)
    };

    self.left.unwrap_or(f64::NAN) - self.right.unwrap_or(f64::NAN)
  }

  /// Returns `latest(left) - latest(right)`, or `None` while both sides are unset.
  pub fn difference(&self) -> Option<f64> {
    match (self.left, self.right) {
      (None, None) => None,
      (left, right) => Some(left.unwrap_or(f64::NAN) - right.unwrap_or(f64::NAN))
    }
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// RUNNING MEAN
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Arithmetic mean of every value pushed so far. No decay, no window.
#[derive(Clone, Debug, Default)]
pub struct RunningMean {
  count: u64,
  sum  : f64
}


impl RunningMean {
  pub fn new() -> Self {
    Self::default()
  }

  /// Accumulates `value` and returns the mean of all values pushed so far.
  pub fn push(&mut self, value: f64) -> f64 {
    self.count += 1;
    self.sum += value;

    self.sum / self.count as f64
  }

  pub fn count(&self) -> u64 {
    self.count
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;


  fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
  }

  #[test]
  fn profit_sequence() {
    let mut pair = LatestPair::new();
    assert_eq!(pair.difference(), None);

    let outputs: Vec<f64> = [
      (Side::Right, 10.0),
      (Side::Left , 12.0),
      (Side::Right, 11.0),
      (Side::Left , 14.0),
      (Side::Right,  8.0)
    ].iter().map(|&(side, value)| pair.update(side, value)).collect();

    assert!(outputs[0].is_nan());
    assert_eq!(&outputs[1..], &[2.0, 1.0, 3.0, 6.0]);
    assert_eq!(pair.difference(), Some(6.0));
  }

  #[test]
  fn one_sided_difference_is_nan() {
    let mut pair = LatestPair::new();

    assert!(pair.update(Side::Left, 3.0).is_nan());
    assert!(pair.difference().unwrap_or(0.0).is_nan());
  }

  #[test]
  fn mean_sequence() {
    let mut mean = RunningMean::new();
    let means: Vec<f64> = [4.0, 5.0, 7.0, 12.0].iter().map(|&v| mean.push(v)).collect();

    assert_eq!(means, vec![4.0, 4.5, 16.0 / 3.0, 7.0]);
    assert_eq!(mean.count(), 4);
  }

  proptest! {
    #[test]
    fn difference_tracks_latest_values(
      updates in prop::collection::vec((any::<bool>(), -1e6f64..1e6), 1..40)
    ) {
      let mut pair = LatestPair::new();
      let mut left  = f64::NAN;
      let mut right = f64::NAN;

      for (is_left, value) in updates {
        let output = if is_left {
          left = value;
          pair.update(Side::Left, value)
        } else {
          right = value;
          pair.update(Side::Right, value)
        };
        prop_assert!(same(output, left - right));
      }
    }

    #[test]
    fn mean_of_every_prefix(values in prop::collection::vec(-1e6f64..1e6, 1..40)) {
      let mut mean = RunningMean::new();

      for (n, &value) in values.iter().enumerate() {
        let expected = values[..=n].iter().sum::<f64>() / (n + 1) as f64;
        let output = mean.push(value);
        prop_assert!((output - expected).abs() <= 1e-9 * expected.abs().max(1.0));
      }
    }

    #[test]
    fn replay_is_deterministic(values in prop::collection::vec(-1e6f64..1e6, 0..40)) {
      let run = |values: &[f64]| -> Vec<f64> {
        let mut mean = RunningMean::new();
        let mut pair = LatestPair::new();
        values.iter().flat_map(|&v| {
          let m = mean.push(v);
          vec![pair.update(Side::Right, m), pair.update(Side::Left, v)]
        }).collect()
      };

      let first  = run(&values);
      let second = run(&values);
      prop_assert_eq!(first.len(), second.len());
      for (a, b) in first.iter().zip(second.iter()) {
        prop_assert!(same(*a, *b));
      }
    }
  }
}
