mod command;
#[cfg(feature = "line")]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

use anyhow::Result;
use clap::Parser;
use rustplot::{PlotConfig, Raster};

/// Plot a function of x in the terminal.
#[derive(Parser, Debug)]
#[command(name = "rustplot", version, about)]
struct Cli {
    /// Expression in x, e.g. "sin(x) * 3". Printed once and exits when given.
    expression: Option<String>,

    /// Lower bound of the x domain.
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    from: f64,

    /// Upper bound of the x domain.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    to: f64,

    /// Width in characters of a printed plot.
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Height in characters of a printed plot.
    #[arg(long, default_value_t = 24)]
    height: usize,

    /// Largest |y| shown; values beyond it are clamped.
    #[arg(long, default_value_t = rustplot::config::DEFAULT_CEILING)]
    ceiling: f64,

    /// Number of samples; defaults to one per column.
    #[arg(long)]
    samples: Option<usize>,

    /// Start the interactive line mode instead of the full-screen interface.
    #[arg(long)]
    line: bool,

    /// Open the interactive interface even when an expression is given.
    #[arg(long, short)]
    interactive: bool,
}

impl Cli {
    fn config(&self) -> Result<PlotConfig> {
        let config = PlotConfig::cells()
            .with_ceiling(self.ceiling)
            .with_sample_count(self.samples);
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config()?;

    if let Some(expression) = cli.expression.as_deref().filter(|_| !cli.interactive) {
        let raster = Raster::from_expression(expression, cli.from, cli.to, cli.width, cli.height, &config)?;
        println!("{}", raster);
        return Ok(());
    }

    if cli.line {
        return run_line(cli, config);
    }
    run_tui(cli, config)
}

#[cfg(feature = "line")]
fn run_line(cli: Cli, config: PlotConfig) -> Result<()> {
    line_mode::run_line(cli.from, cli.to, config)
}

#[cfg(not(feature = "line"))]
fn run_line(_cli: Cli, _config: PlotConfig) -> Result<()> {
    anyhow::bail!("line mode is not available: rebuild with `--features line`")
}

#[cfg(feature = "tui")]
fn run_tui(cli: Cli, config: PlotConfig) -> Result<()> {
    tui_mode::run_tui(cli.from, cli.to, config, cli.expression)
}

#[cfg(all(not(feature = "tui"), feature = "line"))]
fn run_tui(cli: Cli, config: PlotConfig) -> Result<()> {
    run_line(cli, config)
}

#[cfg(all(not(feature = "tui"), not(feature = "line")))]
fn run_tui(_cli: Cli, _config: PlotConfig) -> Result<()> {
    anyhow::bail!("no interactive interface compiled in: pass an expression to print a plot")
}
