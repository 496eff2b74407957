//! Bar loading and data resolution for the scanner.
//!
//! Given a ticker universe, loads one series per (symbol, timeframe) and
//! implements the fallback policy:
//! 1. If cached data exists → use it
//! 2. If not cached and a provider is available → fetch and cache
//! 3. If no data and `synthetic` → generate synthetic bars (tagged)
//! 4. Otherwise → fail for that symbol with a clear error
//!
//! Synthetic data is a developer-only debug mode. Results produced on
//! synthetic data are tagged in the report and should never be traded.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;
use vsalab_core::data::{ingest, BarProvider, CsvCache, DataError, DataSource, LoadProgress, RawBar};
use vsalab_core::domain::{BarSeries, Timeframe};

/// Timeframes a scan loads for every ticker.
pub const SCAN_TIMEFRAMES: [Timeframe; 3] = [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly];

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no cached data for '{symbol}' ({timeframe}) and no provider (use synthetic mode for fake data)")]
    NoCachedDataOffline { symbol: String, timeframe: Timeframe },

    #[error("no cached data for '{symbol}' ({timeframe}) and fetch failed: {reason}")]
    FetchFailed {
        symbol: String,
        timeframe: Timeframe,
        reason: String,
    },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Options controlling how bars are loaded.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Bars to generate/request per timeframe ending at `as_of`.
    pub bars: usize,
    /// Last date of the requested range.
    pub as_of: NaiveDate,
    /// If true, never consult the provider.
    pub offline: bool,
    /// If true, generate synthetic bars when real data is unavailable.
    pub synthetic: bool,
    /// Ignore the cache and refetch.
    pub force: bool,
}

/// Result of loading one ticker's series across all scan timeframes.
#[derive(Debug)]
pub struct LoadedTicker {
    pub series: HashMap<Timeframe, BarSeries>,
    pub sources: HashMap<Timeframe, DataSource>,
    /// Deterministic BLAKE3 hash over all loaded bar data.
    pub dataset_hash: String,
    /// Whether any timeframe used synthetic data.
    pub has_synthetic: bool,
}

/// Load one ticker's daily, weekly, and monthly series with the fallback
/// policy applied per timeframe.
pub fn load_ticker(
    symbol: &str,
    cache: &CsvCache,
    provider: Option<&dyn BarProvider>,
    opts: &LoadOptions,
) -> Result<LoadedTicker, LoadError> {
    let mut series = HashMap::new();
    let mut sources = HashMap::new();
    let mut has_synthetic = false;

    for timeframe in SCAN_TIMEFRAMES {
        // Step 1: cache
        if !opts.force {
            if let Ok(raw) = cache.load(symbol, timeframe) {
                series.insert(timeframe, ingest(symbol, timeframe, raw)?);
                sources.insert(timeframe, DataSource::Cache);
                continue;
            }
        }

        // Step 2: provider
        if !opts.offline {
            if let Some(prov) = provider {
                if prov.is_available() {
                    let start = range_start(opts.as_of, timeframe, opts.bars);
                    match prov.fetch(symbol, timeframe, start, opts.as_of) {
                        Ok(fetched) => {
                            cache.write(symbol, timeframe, &fetched.bars)?;
                            series.insert(timeframe, ingest(symbol, timeframe, fetched.bars)?);
                            sources.insert(timeframe, fetched.source);
                            continue;
                        }
                        Err(e) => {
                            if !opts.synthetic {
                                return Err(LoadError::FetchFailed {
                                    symbol: symbol.to_string(),
                                    timeframe,
                                    reason: e.to_string(),
                                });
                            }
                            // fall through to synthetic
                        }
                    }
                }
            }
        }

        // Step 3: synthetic fallback
        if opts.synthetic {
            eprintln!(
                "WARNING: generating synthetic {timeframe} data for {symbol} — results will be tagged as synthetic"
            );
            let raw = generate_synthetic_bars(symbol, timeframe, opts.as_of, opts.bars);
            series.insert(timeframe, ingest(symbol, timeframe, raw)?);
            sources.insert(timeframe, DataSource::Synthetic);
            has_synthetic = true;
            continue;
        }

        // Step 4: fail
        return Err(LoadError::NoCachedDataOffline {
            symbol: symbol.to_string(),
            timeframe,
        });
    }

    let dataset_hash = compute_dataset_hash(&series);

    Ok(LoadedTicker {
        series,
        sources,
        dataset_hash,
        has_synthetic,
    })
}

/// Load a whole universe sequentially, reporting progress per symbol.
///
/// Per-symbol failures are collected, not propagated: one bad ticker must
/// not abort the batch.
pub fn load_universe(
    symbols: &[String],
    cache: &CsvCache,
    provider: Option<&dyn BarProvider>,
    progress: Option<&dyn LoadProgress>,
    opts: &LoadOptions,
) -> (HashMap<String, LoadedTicker>, HashMap<String, LoadError>) {
    let mut loaded = HashMap::new();
    let mut failures = HashMap::new();
    let total = symbols.len();

    for (i, symbol) in symbols.iter().enumerate() {
        if let Some(p) = progress {
            p.on_start(symbol, i, total);
        }
        match load_ticker(symbol, cache, provider, opts) {
            Ok(ticker) => {
                if let Some(p) = progress {
                    p.on_complete(symbol, i, total, &Ok(()));
                }
                loaded.insert(symbol.clone(), ticker);
            }
            Err(e) => {
                if let Some(p) = progress {
                    p.on_complete(
                        symbol,
                        i,
                        total,
                        &Err(DataError::Other(e.to_string())),
                    );
                }
                failures.insert(symbol.clone(), e);
            }
        }
    }

    if let Some(p) = progress {
        p.on_batch_complete(loaded.len(), failures.len(), total);
    }

    (loaded, failures)
}

fn range_start(as_of: NaiveDate, timeframe: Timeframe, bars: usize) -> NaiveDate {
    let bars = bars as i64;
    match timeframe {
        // weekday-only bars: ~7/5 calendar days per bar, plus slack
        Timeframe::Daily => as_of - chrono::Duration::days(bars * 7 / 5 + 7),
        Timeframe::Weekly => as_of - chrono::Duration::weeks(bars + 1),
        Timeframe::Monthly | Timeframe::Quarterly => {
            as_of - Months::new(bars as u32 + 1)
        }
    }
}

/// Compute a deterministic BLAKE3 hash over all loaded bar data.
///
/// Covers timeframes in a fixed order and every OHLCV value, so the hash is
/// identical regardless of HashMap iteration order.
fn compute_dataset_hash(series: &HashMap<Timeframe, BarSeries>) -> String {
    let mut hasher = blake3::Hasher::new();
    for timeframe in SCAN_TIMEFRAMES {
        let Some(s) = series.get(&timeframe) else {
            continue;
        };
        hasher.update(s.symbol().as_bytes());
        hasher.update(timeframe.as_str().as_bytes());
        for bar in s.bars() {
            hasher.update(bar.date.to_string().as_bytes());
            hasher.update(&bar.open.to_le_bytes());
            hasher.update(&bar.high.to_le_bytes());
            hasher.update(&bar.low.to_le_bytes());
            hasher.update(&bar.close.to_le_bytes());
            hasher.update(&bar.volume.to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

/// Generate synthetic bars for testing/development.
///
/// A simple random walk from a starting price of 100.0, seeded from the
/// (symbol, timeframe) pair so reruns are reproducible and symbols differ.
pub fn generate_synthetic_bars(
    symbol: &str,
    timeframe: Timeframe,
    as_of: NaiveDate,
    bars: usize,
) -> Vec<RawBar> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let seed_bytes = blake3::hash(format!("{symbol}/{timeframe}").as_bytes());
    let seed: [u8; 32] = *seed_bytes.as_bytes();
    let mut rng = StdRng::from_seed(seed);

    // Walk dates backwards from as_of, then emit oldest-first.
    let mut dates = Vec::with_capacity(bars);
    let mut current = as_of;
    while dates.len() < bars {
        match timeframe {
            Timeframe::Daily => {
                let weekday = current.weekday();
                if weekday != chrono::Weekday::Sat && weekday != chrono::Weekday::Sun {
                    dates.push(current);
                }
                current -= chrono::Duration::days(1);
            }
            Timeframe::Weekly => {
                dates.push(current);
                current -= chrono::Duration::weeks(1);
            }
            Timeframe::Monthly | Timeframe::Quarterly => {
                dates.push(current);
                current = current - Months::new(1);
            }
        }
    }
    dates.reverse();

    let mut out = Vec::with_capacity(bars);
    let mut price = 100.0_f64;
    for date in dates {
        let period_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + period_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64);

        out.push(RawBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
        price = close;
    }

    out
}
