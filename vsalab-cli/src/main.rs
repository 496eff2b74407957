//! VSALab CLI — scan, filter, and cache management commands.
//!
//! Commands:
//! - `scan` — run the full pipeline: load bars, screen, analyze, write reports
//! - `filter` — run only the volume-surge screener and print matches
//! - `cache status` — report cached symbols, timeframes, and date ranges

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vsalab_core::data::{ingest, CsvCache, StdoutProgress};
use vsalab_core::domain::{BarSeries, Timeframe};
use vsalab_core::Priority;
use vsalab_runner::{run_scan, screen_ticker, ScanConfig};

#[derive(Parser)]
#[command(name = "vsalab", about = "VSALab CLI — volume spread analysis screener")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full scan pipeline and write report artifacts.
    Scan {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tickers to scan (e.g., SPY QQQ AAPL). Merged with the config universe.
        tickers: Vec<String>,

        /// File with one ticker per line.
        #[arg(long)]
        ticker_file: Option<PathBuf>,

        /// Cache directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        cache_dir: PathBuf,

        /// Report output directory (overrides the config).
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Analysis date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Offline mode: cache only, no provider.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Use synthetic data when real data is unavailable.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
    /// Run only the volume-surge screener against cached data.
    Filter {
        /// Tickers to screen.
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Cache directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        cache_dir: PathBuf,

        /// Baseline window for the volume SMA.
        #[arg(long, default_value_t = 20)]
        sma_period: usize,
    },
    /// Cache management commands.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Report cached symbols, timeframes, bar counts, and date ranges.
    Status {
        /// Cache directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        cache_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            tickers,
            ticker_file,
            cache_dir,
            output_dir,
            as_of,
            offline,
            synthetic,
        } => run_scan_cmd(
            config, tickers, ticker_file, cache_dir, output_dir, as_of, offline, synthetic,
        ),
        Commands::Filter {
            tickers,
            cache_dir,
            sma_period,
        } => run_filter_cmd(tickers, cache_dir, sma_period),
        Commands::Cache { action } => match action {
            CacheAction::Status { cache_dir } => run_cache_status(&cache_dir),
        },
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{text}', expected YYYY-MM-DD"))
}

#[allow(clippy::too_many_arguments)]
fn run_scan_cmd(
    config_path: Option<PathBuf>,
    tickers: Vec<String>,
    ticker_file: Option<PathBuf>,
    cache_dir: PathBuf,
    output_dir: Option<PathBuf>,
    as_of: Option<String>,
    offline: bool,
    synthetic: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ScanConfig::from_toml_path(&path)?,
        None => ScanConfig::default(),
    };
    config.tickers.extend(tickers);
    if ticker_file.is_some() {
        config.ticker_file = ticker_file;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let as_of = match as_of {
        Some(text) => parse_date(&text)?,
        None => Local::now().date_naive(),
    };

    let cache = CsvCache::new(&cache_dir);
    let summary = run_scan(
        &config,
        &cache,
        None,
        Some(&StdoutProgress),
        as_of,
        offline,
        synthetic,
    )?;

    println!(
        "Scanned {} tickers: {} analyzed, {} failed",
        summary.universe_size,
        summary.outcome.analyses.len(),
        summary.outcome.failures.len()
    );
    for analysis in &summary.outcome.analyses {
        if analysis.priority >= Priority::High {
            println!(
                "  {} {} ({}, weekly {})",
                analysis.priority.as_str(),
                analysis.ticker,
                analysis.verdict.as_str(),
                analysis.weekly.status.as_str()
            );
        }
    }
    println!("Markdown report: {}", summary.reports.markdown.display());
    println!("CSV report: {}", summary.reports.csv.display());
    Ok(())
}

fn run_filter_cmd(tickers: Vec<String>, cache_dir: PathBuf, sma_period: usize) -> Result<()> {
    let cache = CsvCache::new(&cache_dir);
    let mut matches = 0usize;

    for raw_ticker in &tickers {
        let ticker = raw_ticker.trim().to_uppercase();
        let load = |timeframe: Timeframe| -> Result<BarSeries> {
            let raw = cache.load(&ticker, timeframe)?;
            Ok(ingest(&ticker, timeframe, raw)?)
        };
        let (weekly, monthly) = match (load(Timeframe::Weekly), load(Timeframe::Monthly)) {
            (Ok(w), Ok(m)) => (w, m),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("{ticker}: {e}");
                continue;
            }
        };
        let surge = screen_ticker(&weekly, &monthly, sma_period);
        if surge.is_match() {
            matches += 1;
            println!("MATCH: {ticker} | {}", surge.reason());
        }
    }

    println!("{matches}/{} tickers matched", tickers.len());
    Ok(())
}

fn run_cache_status(cache_dir: &PathBuf) -> Result<()> {
    let cache = CsvCache::new(cache_dir);
    let entries = cache.status()?;
    if entries.is_empty() {
        println!("Cache at {} is empty", cache_dir.display());
        return Ok(());
    }
    println!("{} cached series under {}:", entries.len(), cache_dir.display());
    for entry in entries {
        let range = match (entry.first, entry.last) {
            (Some(first), Some(last)) => format!("{first} -> {last}"),
            _ => "empty".to_string(),
        };
        println!(
            "  {} {:<9} {:>5} bars  {}",
            entry.symbol,
            entry.timeframe.to_string(),
            entry.bars,
            range
        );
    }
    Ok(())
}
