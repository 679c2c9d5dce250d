use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use tracing::info;

use crate::arithmetic::Side;
use crate::display::{annotate_profit, format_number, Page};
use crate::error::Error;
use crate::frp;
use crate::mvc::{self, Model};
use crate::runtime::Runtime;
use crate::rx::{self, Subject};


/// Updates of the profit demos: `Left` is the sell price, `Right` the buy price.
const PROFIT_UPDATES: [(Side, f64); 5] = [
  (Side::Right, 10.0),
  (Side::Left , 12.0),
  (Side::Right, 11.0),
  (Side::Left , 14.0),
  (Side::Right,  8.0)
];

/// Values of the mean-normalized demos.
const MEAN_VALUES: [f64; 4] = [4.0, 5.0, 7.0, 12.0];

/// Values of the repeat-filtered demo; the repeated `-10` is dropped on the absolute side only.
const ABS_VALUES: [f64; 4] = [5.0, -10.0, -10.0, 12.0];


///////////////////////////////////////////////////////////////////////////////////////////////////
// CONFIG
///////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug)]
pub struct DemoConfig {
  /// Profits strictly above this are flagged with `buy now`.
  pub buy_threshold: f64
}

impl Default for DemoConfig {
  fn default() -> Self {
    DemoConfig { buy_threshold: 5.0 }
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// DEMO
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A driver sequence: a wiring of sources and combinators on one substrate, fed with literal
/// values, displayed in one or more regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Demo {
  /// FRP: profit between two independent prices.
  FrpProfit,
  /// FRP: values minus their own running mean.
  FrpMean,
  /// FRP: values minus their repeat-filtered absolute value.
  FrpAbs,
  /// Models: profit between two independent prices.
  MvcProfit,
  /// Models: values minus their own running mean.
  MvcMean,
  /// Rx: values minus their own running mean, values subscribed first.
  RxMean,
  /// Rx: values minus their own running mean, mean subscribed first.
  RxMeanReversed
}


impl Demo {
  pub const ALL: [Demo; 7] = [
    Demo::FrpProfit,
    Demo::FrpMean,
    Demo::FrpAbs,
    Demo::MvcProfit,
    Demo::MvcMean,
    Demo::RxMean,
    Demo::RxMeanReversed
  ];

  pub fn name(self) -> &'static str {
    match self {
      Demo::FrpProfit      => "frp-profit",
      Demo::FrpMean        => "frp-mean",
      Demo::FrpAbs         => "frp-abs",
      Demo::MvcProfit      => "mvc-profit",
      Demo::MvcMean        => "mvc-mean",
      Demo::RxMean         => "rx-mean",
      Demo::RxMeanReversed => "rx-mean-reversed"
    }
  }

  /// Display regions written by the demo.
  pub fn regions(self) -> &'static [&'static str] {
    match self {
      Demo::FrpProfit      => &["fj1"],
      Demo::FrpMean        => &["fj2"],
      Demo::FrpAbs         => &["fj3", "fj4"],
      Demo::MvcProfit      => &["bb1"],
      Demo::MvcMean        => &["bb2"],
      Demo::RxMean         => &["rx1"],
      Demo::RxMeanReversed => &["rx2"]
    }
  }

  /// Wires the demo, feeds it, and appends its outputs to `page`.
  pub fn run(self, config: &DemoConfig, page: &mut Page) {
    info!(demo = self.name(), "running demo");

    match self {
      Demo::FrpProfit      => frp_profit(config, page),
      Demo::FrpMean        => frp_mean(page),
      Demo::FrpAbs         => frp_abs(page),
      Demo::MvcProfit      => mvc_profit(config, page),
      Demo::MvcMean        => mvc_mean(page),
      Demo::RxMean         => rx_mean(page, false),
      Demo::RxMeanReversed => rx_mean(page, true)
    }
  }
}


impl fmt::Display for Demo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}


impl FromStr for Demo {
  type Err = Error;

  fn from_str(name: &str) -> Result<Self, Self::Err> {
    Demo::ALL
      .into_iter()
      .find(|demo| demo.name() == name)
      .ok_or_else(|| Error::UnknownDemo(name.to_string()))
  }
}


/// Runs `demos` in order on a fresh page.
pub fn run_demos(demos: &[Demo], config: &DemoConfig) -> Page {
  let mut page = Page::new();

  for demo in demos {
    demo.run(config, &mut page);
  }

  page
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// FRP
///////////////////////////////////////////////////////////////////////////////////////////////////

fn frp_profit(config: &DemoConfig, page: &mut Page) {
  let region    = page.region("fj1");
  let threshold = config.buy_threshold;

  let mut runtime = Runtime::new();
  let sell = frp::receiver();
  let buy  = frp::receiver();

  frp::diff(&sell, &buy).subscribe(move |profit| region.append(annotate_profit(profit, threshold)));

  for (side, price) in PROFIT_UPDATES {
    match side {
      Side::Left  => sell.send(&mut runtime, price),
      Side::Right => buy.send(&mut runtime, price)
    }
  }
}

fn frp_mean(page: &mut Page) {
  let region = page.region("fj2");

  let mut runtime = Runtime::new();
  let values = frp::receiver();

  frp::diff(&values, &frp::average(&values))
    .subscribe(move |v| region.append(format_number(v)));

  for v in MEAN_VALUES {
    values.send(&mut runtime, v);
  }
}

fn frp_abs(page: &mut Page) {
  let diff_region = page.region("fj3");
  let abs_region  = page.region("fj4");

  let mut runtime = Runtime::new();
  let a = frp::receiver::<f64>();
  let b = a.filter_repeats().map(f64::abs);

  frp::diff(&a, &b).subscribe(move |v| diff_region.append(format_number(v)));
  b.subscribe(move |v| abs_region.append(format_number(v)));

  for v in ABS_VALUES {
    a.send(&mut runtime, v);
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// MODELS
///////////////////////////////////////////////////////////////////////////////////////////////////

fn mvc_profit(config: &DemoConfig, page: &mut Page) {
  let region    = page.region("bb1");
  let threshold = config.buy_threshold;

  let sell = Model::new(f64::NAN);
  let buy  = Model::new(f64::NAN);

  mvc::diff(&sell, &buy).on_change(move |m: &Model<f64>| {
    region.append(annotate_profit(m.get().unwrap_or(f64::NAN), threshold));
  });

  for (side, price) in PROFIT_UPDATES {
    match side {
      Side::Left  => sell.set(price),
      Side::Right => buy.set(price)
    };
  }
}

fn mvc_mean(page: &mut Page) {
  let region = page.region("bb2");

  let seq = Model::new(f64::NAN);
  // The mean subscribes to `seq` before the difference does
  let mean = mvc::mean(&seq);

  mvc::diff(&seq, &mean).on_change(move |m: &Model<f64>| {
    region.append(format_number(m.get().unwrap_or(f64::NAN)));
  });

  for v in MEAN_VALUES {
    seq.set(v);
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// RX
///////////////////////////////////////////////////////////////////////////////////////////////////

fn rx_mean(page: &mut Page, reversed: bool) {
  let region = page.region(if reversed { "rx2" } else { "rx1" });

  let values = Subject::new();
  let source = values.observable();
  let means  = rx::average(&source);

  let combined = if reversed {
    rx::diff_reversed(&source, &means)
  } else {
    rx::diff(&source, &means)
  };
  let _subscription = combined.subscribe_next(move |v| region.append(format_number(v)));

  for v in MEAN_VALUES {
    values.next(v);
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
  use super::*;


  fn lines(demo: Demo) -> Vec<Vec<String>> {
    let page = run_demos(&[demo], &DemoConfig::default());

    demo.regions().iter().map(|name| page.lines(name).unwrap_or_default()).collect()
  }

  #[test]
  fn frp_profit_output() {
    assert_eq!(lines(Demo::FrpProfit), vec![vec!["NaN", "2", "1", "3", "6 buy now"]]);
  }

  #[test]
  fn frp_mean_has_no_glitch() {
    assert_eq!(lines(Demo::FrpMean), vec![vec!["0", "0.5", "1.666666666666667", "5"]]);
  }

  #[test]
  fn frp_abs_output() {
    assert_eq!(lines(Demo::FrpAbs), vec![
      vec!["0", "-20", "-20", "0"],
      vec!["5", "10", "12"]
    ]);
  }

  #[test]
  fn mvc_profit_output() {
    assert_eq!(lines(Demo::MvcProfit), vec![vec!["NaN", "2", "1", "3", "6 buy now"]]);
  }

  #[test]
  fn mvc_mean_glitches() {
    assert_eq!(lines(Demo::MvcMean), vec![vec![
      "NaN", "0", "-0.5", "0.5", "-0.33333333333333304", "1.666666666666667", "0", "5"
    ]]);
  }

  #[test]
  fn rx_mean_output() {
    assert_eq!(lines(Demo::RxMean), vec![vec![
      "0", "1", "0.5", "2.5", "1.666666666666667", "6.666666666666667", "5"
    ]]);
  }

  #[test]
  fn rx_mean_reversed_output() {
    assert_eq!(lines(Demo::RxMeanReversed), vec![vec![
      "0", "-0.5", "0.5", "-0.33333333333333304", "1.666666666666667", "0", "5"
    ]]);
  }

  #[test]
  fn threshold_is_configurable() {
    let config = DemoConfig { buy_threshold: 2.5 };
    let page = run_demos(&[Demo::FrpProfit, Demo::MvcProfit], &config);
    let expected = vec!["NaN", "2", "1", "3 buy now", "6 buy now"];

    assert_eq!(page.lines("fj1"), Some(expected.iter().map(|s| s.to_string()).collect()));
    assert_eq!(page.lines("bb1"), Some(expected.iter().map(|s| s.to_string()).collect()));
  }

  #[test]
  fn rerun_is_deterministic() {
    let config = DemoConfig::default();

    assert_eq!(
      run_demos(&Demo::ALL, &config).render(crate::display::OutputFormat::Text),
      run_demos(&Demo::ALL, &config).render(crate::display::OutputFormat::Text)
    );
  }

  #[test]
  fn demo_names_round_trip() {
    for demo in Demo::ALL {
      assert_eq!(demo.name().parse::<Demo>().unwrap(), demo);
      assert_eq!(demo.to_string(), demo.name());
    }

    assert!(matches!("fj1".parse::<Demo>(), Err(Error::UnknownDemo(name)) if name == "fj1"));
  }

  #[test]
  fn regions_follow_demo_order() {
    let page = run_demos(&Demo::ALL, &DemoConfig::default());
    let names: Vec<&str> = page.regions().iter().map(|region| region.name()).collect();

    assert_eq!(names, vec!["fj1", "fj2", "fj3", "fj4", "bb1", "bb2", "rx1", "rx2"]);
  }
}
