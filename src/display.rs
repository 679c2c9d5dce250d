use std::rc::Rc;
use std::cell::RefCell;
use std::io;

use clap::ValueEnum;

use crate::error::Result;


///////////////////////////////////////////////////////////////////////////////////////////////////
// FORMATTING
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Formats a number the way a browser prints it: `NaN`, `Infinity`, no trailing `.0`,
/// shortest round-trip digits, and exponent notation outside of `[1e-6, 1e21)`.
pub fn format_number(value: f64) -> String {
  if value.is_nan() {
    return String::from("NaN");
  }
  if value.is_infinite() {
    return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
  }
  // Also covers -0
  if value == 0.0 {
    return String::from("0");
  }

  let magnitude = value.abs();
  if (1e-6..1e21).contains(&magnitude) {
    return format!("{value}");
  }

  let scientific = format!("{value:e}");
  match scientific.split_once('e') {
    Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
    _ => scientific
  }
}

/// Formats a profit, flagged with ` buy now` when it exceeds `threshold`.
pub fn annotate_profit(value: f64, threshold: f64) -> String {
  let mut text = format_number(value);

  if value > threshold {
    text.push_str(" buy now");
  }

  text
}

fn escape_html(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());

  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      _   => escaped.push(c)
    }
  }

  escaped
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// OUTPUT REGION
///////////////////////////////////////////////////////////////////////////////////////////////////

/// A named, append-only display area.
///
/// Cloning an `OutputRegion` creates a new handle to the same lines, so that display callbacks
/// can own one.
#[derive(Clone, Debug)]
pub struct OutputRegion {
  name : String,
  lines: Rc<RefCell<Vec<String>>>
}


impl OutputRegion {
  pub fn new(name: impl Into<String>) -> Self {
    OutputRegion { name: name.into(), lines: Rc::new(RefCell::new(Vec::new())) }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn append(&self, line: impl Into<String>) {
    self.lines.borrow_mut().push(line.into());
  }

  pub fn lines(&self) -> Vec<String> {
    self.lines.borrow().clone()
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// PAGE
///////////////////////////////////////////////////////////////////////////////////////////////////

/// How a `Page` is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  /// One `[region]` header per region, then one line per entry.
  #[default]
  Text,
  /// One `<div id="region">` per region, entries separated by `<br>`.
  Html
}


/// Every display region, in creation order.
#[derive(Clone, Debug, Default)]
pub struct Page {
  regions: Vec<OutputRegion>
}


impl Page {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the region called `name`, creating it at the end of the page if needed.
  pub fn region(&mut self, name: &str) -> OutputRegion {
    if let Some(region) = self.regions.iter().find(|region| region.name() == name) {
      return region.clone();
    }

    let region = OutputRegion::new(name);
    self.regions.push(region.clone());
    region
  }

  pub fn regions(&self) -> &[OutputRegion] {
    &self.regions
  }

  /// Returns the lines of the region called `name`, if it exists.
  pub fn lines(&self, name: &str) -> Option<Vec<String>> {
    self.regions.iter().find(|region| region.name() == name).map(OutputRegion::lines)
  }

  pub fn render(&self, format: OutputFormat) -> String {
    let mut output = String::new();

    for (i, region) in self.regions.iter().enumerate() {
      match format {
        OutputFormat::Text => {
          if i > 0 {
            output.push('\n');
          }
          output.push_str(&format!("[{}]\n", region.name()));
          for line in region.lines() {
            output.push_str(&line);
            output.push('\n');
          }
        }
        OutputFormat::Html => {
          output.push_str(&format!("<div id=\"{}\">", escape_html(region.name())));
          for line in region.lines() {
            output.push_str(&escape_html(&line));
            output.push_str("<br>");
          }
          output.push_str("</div>\n");
        }
      }
    }

    output
  }

  pub fn write_to<W: io::Write>(&self, writer: &mut W, format: OutputFormat) -> Result<()> {
    writer.write_all(self.render(format).as_bytes())?;
    writer.flush()?;

    Ok(())
  }
}


///////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
  use super::*;


  #[test]
  fn numbers_print_like_a_browser() {
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(4.0), "4");
    assert_eq!(format_number(-20.0), "-20");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(7.0 - 16.0 / 3.0), "1.666666666666667");
    assert_eq!(format_number(16.0 / 3.0), "5.333333333333333");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
    assert_eq!(format_number(123456789.0), "123456789");
  }

  #[test]
  fn profit_annotation() {
    assert_eq!(annotate_profit(6.0, 5.0), "6 buy now");
    assert_eq!(annotate_profit(5.0, 5.0), "5");
    assert_eq!(annotate_profit(f64::NAN, 5.0), "NaN");
  }

  #[test]
  fn regions_keep_creation_order() {
    let mut page = Page::new();
    let b = page.region("b");
    let a = page.region("a");
    page.region("b").append("two");
    b.append("one");
    a.append("<x>");

    assert_eq!(page.lines("b"), Some(vec![String::from("two"), String::from("one")]));
    assert_eq!(page.lines("missing"), None);
    assert_eq!(page.render(OutputFormat::Text), "[b]\ntwo\none\n\n[a]\n<x>\n");
    assert_eq!(
      page.render(OutputFormat::Html),
      "<div id=\"b\">two<br>one<br></div>\n<div id=\"a\">&lt;x&gt;<br></div>\n"
    );
  }

  #[test]
  fn write_to_buffer() {
    let mut page = Page::new();
    page.region("r").append("1");

    let mut buffer = Vec::new();
    page.write_to(&mut buffer, OutputFormat::Text).unwrap();
    assert_eq!(buffer, b"[r]\n1\n");
  }
}
