//! Semlab CLI — load, inspect, and compare the dashboard feeds.
//!
//! Commands:
//! - `fetch` — download both CSV feeds and save them locally
//! - `catalog` — list symbols, companies, and sectors
//! - `peers` — print the sector peers of a symbol
//! - `compare` — returns table plus optional chart-series exports
//!
//! This binary is the stand-in for the browser presentation layer: it only
//! consumes what `semlab-core` derives.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use semlab_core::compare::{chart_tickers, compute_returns, rebase, ComparisonMode, Timeframe};
use semlab_core::config::Endpoints;
use semlab_core::data::{
    decode, Catalog, FileSource, HttpSource, PriceSeries, SnapshotSource, StdoutProgress,
};
use semlab_core::session::{LoadState, Session};

mod export;

#[derive(Parser)]
#[command(name = "semlab", about = "Semlab CLI — SEM market comparison pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download both CSV feeds and save them locally.
    Fetch {
        /// Endpoints TOML file. Defaults to the built-in dashboard URLs.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the two CSV files.
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// List the catalog (symbol, company, sector).
    Catalog {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the sector peers of a symbol.
    Peers {
        /// Base symbol (e.g., MCB).
        symbol: String,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Compare performance: returns table plus optional exports.
    Compare {
        /// Base symbol.
        #[arg(long)]
        base: String,

        /// Trailing window: 1M, 3M, 1Y, 2Y, 3Y, YTD.
        #[arg(long, default_value = "3M")]
        timeframe: String,

        /// Comparison mode: single, peers, custom.
        #[arg(long, default_value = "single")]
        mode: String,

        /// Custom ticker list (comma/semicolon/whitespace separated); used
        /// with --mode custom.
        #[arg(long, default_value = "")]
        tickers: String,

        /// Write the rebased chart series as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the returns table as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Local category CSV (offline mode; requires --prices-file).
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Local price CSV (offline mode; requires --catalog-file).
    #[arg(long)]
    prices_file: Option<PathBuf>,

    /// Endpoints TOML file for remote mode.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn source(&self) -> Result<Box<dyn SnapshotSource>> {
        match (&self.catalog_file, &self.prices_file) {
            (Some(catalog), Some(prices)) => {
                Ok(Box::new(FileSource::new(catalog.clone(), prices.clone())))
            }
            (None, None) => {
                let endpoints = load_endpoints(self.config.as_deref())?;
                Ok(Box::new(HttpSource::new(endpoints)))
            }
            _ => bail!("--catalog-file and --prices-file must be given together"),
        }
    }
}

fn load_endpoints(config: Option<&std::path::Path>) -> Result<Endpoints> {
    match config {
        Some(path) => Endpoints::from_file(path).map_err(|e| anyhow!(e)),
        None => Ok(Endpoints::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { config, out_dir } => cmd_fetch(config, out_dir),
        Commands::Catalog { input } => cmd_catalog(&input),
        Commands::Peers { symbol, input } => cmd_peers(&symbol, &input),
        Commands::Compare {
            base,
            timeframe,
            mode,
            tickers,
            json,
            csv,
            input,
        } => cmd_compare(&base, &timeframe, &mode, &tickers, json, csv, &input),
    }
}

fn cmd_fetch(config: Option<PathBuf>, out_dir: PathBuf) -> Result<()> {
    let endpoints = load_endpoints(config.as_deref())?;
    let source = HttpSource::new(endpoints);

    println!("Fetching category listing...");
    let catalog_text = source.fetch_catalog_csv()?;
    println!("Fetching price history...");
    let prices_text = source.fetch_prices_csv()?;

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;
    let catalog_path = out_dir.join("listedcompanies.csv");
    let prices_path = out_dir.join("dailyprices.csv");
    fs::write(&catalog_path, &catalog_text)?;
    fs::write(&prices_path, &prices_text)?;

    let catalog = Catalog::from_rows(&decode(&catalog_text));
    let prices = PriceSeries::from_rows(&decode(&prices_text));
    println!(
        "Saved {} instruments and {} price dates to {}",
        catalog.len(),
        prices.len(),
        out_dir.display()
    );
    Ok(())
}

fn cmd_catalog(input: &InputArgs) -> Result<()> {
    let session = load_session(input)?;
    let snapshot = session.snapshot().context("no snapshot after load")?;

    println!("{:<10} {:<36} {}", "symbol", "company", "sector");
    for record in snapshot.catalog.records() {
        println!(
            "{:<10} {:<36} {}",
            record.symbol, record.company, record.sector
        );
    }
    Ok(())
}

fn cmd_peers(symbol: &str, input: &InputArgs) -> Result<()> {
    let session = load_session(input)?;
    let snapshot = session.snapshot().context("no snapshot after load")?;

    let base = symbol.to_uppercase();
    let peers = snapshot.catalog.peers(&base);
    if peers.is_empty() {
        println!("no sector peers for {base}");
    } else {
        for peer in peers {
            println!("{peer}");
        }
    }
    Ok(())
}

fn cmd_compare(
    base: &str,
    timeframe: &str,
    mode: &str,
    tickers_input: &str,
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
    input: &InputArgs,
) -> Result<()> {
    let timeframe: Timeframe = timeframe.parse().map_err(|e: String| anyhow!(e))?;
    let mode: ComparisonMode = mode.parse().map_err(|e: String| anyhow!(e))?;

    let session = load_session(input)?;
    let snapshot = session.snapshot().context("no snapshot after load")?;

    let tickers = chart_tickers(base, mode, &snapshot.catalog, tickers_input);
    let filtered = snapshot.prices.filter_timeframe(timeframe);
    let returns = compute_returns(&filtered, &tickers);

    println!(
        "{} returns, {} mode, {} points in window",
        timeframe.label(),
        mode.label(),
        filtered.len()
    );
    println!("{:<10} {:>10}", "ticker", "return %");
    for r in &returns {
        println!("{:<10} {:>10}", r.ticker, r.label());
    }

    if json.is_some() || csv.is_some() {
        let chart = rebase(&filtered, &tickers);
        if let Some(path) = json {
            fs::write(&path, export::rebased_series_json(&chart)?)
                .with_context(|| format!("write {}", path.display()))?;
            println!("wrote chart series to {}", path.display());
        }
        if let Some(path) = csv {
            fs::write(&path, export::returns_csv(&returns)?)
                .with_context(|| format!("write {}", path.display()))?;
            println!("wrote returns table to {}", path.display());
        }
    }
    Ok(())
}

fn load_session(input: &InputArgs) -> Result<Session> {
    let source = input.source()?;
    let mut session = Session::new();
    session.load(source.as_ref(), &StdoutProgress);

    if let LoadState::Error(e) = session.state() {
        bail!("load failed: {e}");
    }
    Ok(session)
}
