//! StockScope CLI — technical snapshots from the command line.
//!
//! Commands:
//! - `analyze` — load price history (CSV directory or synthetic walk) and
//!   print one JSON snapshot per symbol
//! - `config` — print the effective engine configuration as TOML
//!
//! Log verbosity comes from `RUST_LOG` (default `info`); logs go to stderr so
//! stdout stays pure JSON.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use stockscope_core::data::{CsvSource, PriceSource, SyntheticSource};
use stockscope_core::{
    compute_snapshots, EngineConfig, SnapshotBuilder, SnapshotRequest, TechnicalSnapshot,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stockscope",
    about = "StockScope CLI — technical indicator snapshots for OHLCV price history"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a technical snapshot for each symbol and print it as JSON.
    Analyze {
        /// Symbols to analyze (e.g., AAPL MSFT INFY).
        #[arg(required = true)]
        symbols: Vec<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// Seed for --synthetic.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Treat the symbols as domestic-market listings (domestic currency
        /// symbol, Indian digit grouping).
        #[arg(long, default_value_t = false)]
        domestic: bool,

        /// ISO currency code. Defaults to INR with --domestic, USD otherwise.
        #[arg(long)]
        currency: Option<String>,

        /// Path to an engine config TOML file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print the engine configuration as TOML.
    Config {
        /// Validate and print this file instead of the defaults.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Directory of <SYMBOL>.csv files (timestamp,open,high,low,close,volume).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Generate this many bars of seeded synthetic history per symbol.
    #[arg(long)]
    synthetic: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbols,
            source,
            seed,
            domestic,
            currency,
            config,
            pretty,
        } => run_analyze(
            &symbols,
            &source,
            seed,
            domestic,
            currency,
            config.as_deref(),
            pretty,
        ),
        Commands::Config { file } => run_config(file.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn make_source(args: &SourceArgs, seed: u64) -> Result<Box<dyn PriceSource>> {
    match (&args.data_dir, args.synthetic) {
        (Some(dir), None) => Ok(Box::new(CsvSource::new(dir))),
        (None, Some(bars)) => Ok(Box::new(SyntheticSource::new(bars, seed))),
        _ => bail!("exactly one of --data-dir or --synthetic is required"),
    }
}

fn run_analyze(
    symbols: &[String],
    source_args: &SourceArgs,
    seed: u64,
    domestic: bool,
    currency: Option<String>,
    config_path: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let builder = SnapshotBuilder::new(config).context("invalid engine config")?;
    let source = make_source(source_args, seed)?;
    let currency = currency.unwrap_or_else(|| if domestic { "INR" } else { "USD" }.to_string());

    let mut requests = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let series = source
            .fetch(symbol)
            .with_context(|| format!("fetching {symbol} from {} source", source.name()))?;
        info!(symbol = %symbol, bars = series.len(), source = source.name(), "loaded history");
        requests.push(SnapshotRequest::new(
            symbol.as_str(),
            series,
            domestic,
            currency.as_str(),
        ));
    }

    let results = if requests.len() == 1 {
        vec![requests[0].build(&builder)]
    } else {
        compute_snapshots(&builder, &requests)
    };

    let mut failed = 0;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(snapshot) => print_snapshot(&snapshot, pretty)?,
            Err(err) => {
                failed += 1;
                error!(symbol = %request.symbol, retryable = err.is_retryable(), "{err}");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} symbols failed", requests.len());
    }
    Ok(())
}

fn print_snapshot(snapshot: &TechnicalSnapshot, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    println!("{json}");
    Ok(())
}

fn run_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_requires_a_source() {
        assert!(Cli::try_parse_from(["stockscope", "analyze", "AAPL"]).is_err());
        assert!(Cli::try_parse_from([
            "stockscope",
            "analyze",
            "AAPL",
            "--data-dir",
            "data",
            "--synthetic",
            "100"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["stockscope", "analyze", "AAPL", "--synthetic", "100"]).is_ok());
    }

    #[test]
    fn synthetic_source_builds_snapshot() {
        let source = make_source(
            &SourceArgs {
                data_dir: None,
                synthetic: Some(80),
            },
            7,
        )
        .unwrap();
        let series = source.fetch("TEST").unwrap();
        let snapshot = SnapshotRequest::new("test", series, false, "USD")
            .build(&SnapshotBuilder::default())
            .unwrap();
        assert_eq!(snapshot.symbol, "TEST");
    }
}
