use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use glitch::{run_demos, Demo, DemoConfig, OutputFormat};


/// Runs the driver sequences and prints every display region.
///
/// Each demo wires the same difference problem on one reactive substrate, feeds it a fixed
/// sequence of values, and displays what the difference emitted, in emission order.
#[derive(Parser, Debug)]
#[command(name = "glitch", version)]
struct Cli {
  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Demos to run, in order (all of them by default)
  #[arg(long = "demo", value_enum)]
  demos: Vec<Demo>,

  /// Profits strictly above this are flagged with "buy now"
  #[arg(long, default_value_t = DemoConfig::default().buy_threshold)]
  threshold: f64,

  /// Log propagation details
  #[arg(short, long)]
  verbose: bool
}


fn main() -> glitch::Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();

  let demos = if cli.demos.is_empty() { Demo::ALL.to_vec() } else { cli.demos };
  let config = DemoConfig { buy_threshold: cli.threshold };

  let page = run_demos(&demos, &config);
  page.write_to(&mut io::stdout().lock(), cli.format)
}
