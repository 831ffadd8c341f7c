//! tickplant CLI - Calendar-partitioned ticker plant.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickplant_lib::indicators::PriceField;
use tickplant_lib::{AssetGroup, Source};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;

use display::Policy;

#[derive(Parser)]
#[command(name = "tickplant")]
#[command(about = "Calendar-partitioned ticker plant and indicators", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Ticker plant root directory
    #[arg(long, env = "TICKS_HOME", global = true)]
    root: Option<PathBuf>,

    /// Holiday list, one YYYY-MM-DD per line
    #[arg(long, env = "TICKPLANT_HOLIDAYS", global = true)]
    holidays: Option<PathBuf>,
}

/// Identifies one series in the plant.
#[derive(Args, Clone)]
struct SeriesArgs {
    /// Symbol, e.g. AAPL or CL
    symbol: String,

    /// Asset group
    #[arg(short, long, default_value = "futures")]
    group: AssetGroup,

    /// Data source
    #[arg(long, default_value = "ib")]
    source: Source,

    /// Exchange, e.g. nymex or smart
    #[arg(short = 'x', long)]
    exchange: String,

    /// Contract month for futures, e.g. 201201
    #[arg(short, long)]
    contract: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition raw tick files into per-day plant files
    Partition {
        /// Symbols to partition, as SYMBOL or SYMBOL:CONTRACT
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Directory holding the raw <symbol><contract>.tks files
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,

        /// Asset group
        #[arg(short, long, default_value = "futures")]
        group: AssetGroup,

        /// Data source
        #[arg(long, default_value = "ib")]
        source: Source,

        /// Exchange, e.g. nymex or smart
        #[arg(short = 'x', long)]
        exchange: String,

        /// Start date (YYYY-MM-DD[ HH:MM:SS]). Defaults to the first tick.
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD[ HH:MM:SS]). Defaults to today.
        #[arg(short, long)]
        end: Option<String>,

        /// What to do with day files that already exist
        #[arg(long, value_enum, default_value = "replace")]
        policy: Policy,

        /// Maximum symbols partitioned at once
        #[arg(long, default_value = "4")]
        parallel: usize,
    },

    /// Show per-day statistics and missing trading days for a series
    Stats {
        #[command(flatten)]
        series: SeriesArgs,

        /// Start of the window checked for missing days
        #[arg(short, long)]
        start: Option<String>,

        /// End of the window checked for missing days
        #[arg(short, long)]
        end: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Remove duplicate timestamps from the day files of a series
    Dedup {
        #[command(flatten)]
        series: SeriesArgs,

        /// Do not keep <symbol>.tks.original backups
        #[arg(long)]
        no_backup: bool,
    },

    /// Compute an indicator over a stored series
    Indicator {
        #[command(flatten)]
        series: SeriesArgs,

        /// Tick column to compute on
        #[arg(short, long, default_value = "close")]
        field: PriceField,

        /// Start date (YYYY-MM-DD[ HH:MM:SS])
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD[ HH:MM:SS])
        #[arg(short, long)]
        end: Option<String>,

        /// Print JSON instead of timestamp/value lines
        #[arg(long)]
        json: bool,

        #[command(subcommand)]
        kind: IndicatorKind,
    },

    /// Convert a legacy YYYY-MM-DD HH:MM:SS tick file to the current layout
    Convert {
        /// Legacy tick file
        input: PathBuf,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Indicators available from the command line.
#[derive(Subcommand, Clone, Copy)]
enum IndicatorKind {
    /// Simple moving average
    Sma {
        /// Window length
        window: usize,
    },
    /// Exponential moving average
    Ema {
        /// Smoothing constant in (0, 1]
        alpha: f64,
    },
    /// Cumulative moving average
    Cma,
    /// Change in the EMA over the last DELTA steps (prints one value)
    Dema {
        /// Smoothing constant in (0, 1]
        alpha: f64,
        /// Lookback in steps
        delta: usize,
    },
    /// Percentage rate of change
    Rofc {
        /// Lookback in steps
        periods: usize,
    },
    /// Relative strength index
    Rsi {
        /// Lookback in steps
        #[arg(default_value = "14")]
        periods: usize,
    },
    /// Detrended price oscillator
    Dpo {
        /// Window length
        periods: usize,
    },
    /// Population z-score
    Zscore,
    /// Min-max scaling onto [-1, 1]
    Normalize,
    /// Shift left, repeating the last value
    Lshift {
        /// Steps to shift
        steps: usize,
    },
    /// Shift right, filling with the first value or FILL
    Rshift {
        /// Steps to shift
        steps: usize,
        /// Fill value for the vacated start
        #[arg(long)]
        fill: Option<f64>,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = config::Settings::resolve(cli.root, cli.holidays);

    match command {
        Commands::Partition {
            symbols,
            input_dir,
            group,
            source,
            exchange,
            start,
            end,
            policy,
            parallel,
        } => {
            let batch = commands::partition::Batch {
                symbols,
                input_dir,
                group,
                source,
                exchange,
                start,
                end,
                policy: policy.into(),
                parallel,
            };
            commands::partition::partition(batch, &settings, cli.quiet).await
        }
        Commands::Stats {
            series,
            start,
            end,
            json,
        } => commands::stats::stats(&series, start.as_deref(), end.as_deref(), json, &settings),
        Commands::Dedup { series, no_backup } => {
            commands::dedup::dedup(&series, !no_backup, &settings, cli.quiet)
        }
        Commands::Indicator {
            series,
            field,
            start,
            end,
            json,
            kind,
        } => commands::indicator::indicator(
            &series,
            field,
            kind,
            start.as_deref(),
            end.as_deref(),
            json,
            &settings,
        ),
        Commands::Convert { input, output } => {
            commands::convert::convert(&input, output.as_deref(), cli.quiet)
        }
    }
}
