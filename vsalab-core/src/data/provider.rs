//! Data provider trait and structured error types.
//!
//! The `BarProvider` trait abstracts over bar sources (CSV import, a broker
//! feed, a test stub) so the engine never depends on where bars come from.
//! Implementations that reach a network live outside this workspace.

use crate::domain::Timeframe;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw OHLCV bar from a provider (before validation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no cached data for '{symbol}' ({timeframe})")]
    NoCachedData { symbol: String, timeframe: Timeframe },

    #[error("cache error: {0}")]
    CacheError(String),

    #[error("validation error: {0}")]
    ValidationError(#[from] crate::domain::SeriesError),

    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for one (symbol, timeframe).
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    CsvImport,
    Cache,
    Synthetic,
}

/// Trait for bar providers.
///
/// The cache layer sits above this trait — providers don't know about the
/// cache. A fetch may legitimately return an empty bar list (unknown but
/// valid symbol); callers treat that as a per-ticker negative, not a batch
/// failure.
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch OHLCV bars for a symbol and timeframe over a date range.
    fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError>;

    /// Check if the provider is currently available.
    fn is_available(&self) -> bool;
}

/// Progress callback for multi-symbol loads.
pub trait LoadProgress: Send {
    /// Called when starting to load a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol load completes.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, result: &Result<(), DataError>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl LoadProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Loading {symbol}...", index + 1, total);
    }

    fn on_complete(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        result: &Result<(), DataError>,
    ) {
        match result {
            Ok(()) => println!("[{}/{}] {symbol} done", index + 1, total),
            Err(e) => println!("[{}/{}] {symbol} failed: {e}", index + 1, total),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("Loaded {succeeded}/{total} symbols ({failed} failed)");
    }
}
