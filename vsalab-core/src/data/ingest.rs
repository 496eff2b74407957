//! Ingest — raw provider bars to a validated series.
//!
//! Sorts by date, dedupes (first occurrence wins), converts to domain bars,
//! and revalidates through `BarSeries::new`. Any remaining malformation
//! (insane OHLC) is a hard rejection, never a silent drop.

use super::provider::{DataError, RawBar};
use crate::domain::{Bar, BarSeries, Timeframe};

/// Convert raw bars into a validated `BarSeries`.
pub fn ingest(
    symbol: &str,
    timeframe: Timeframe,
    mut raw: Vec<RawBar>,
) -> Result<BarSeries, DataError> {
    raw.sort_by_key(|b| b.date);
    raw.dedup_by_key(|b| b.date);

    let bars: Vec<Bar> = raw
        .into_iter()
        .map(|r| Bar {
            symbol: symbol.to_string(),
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
        })
        .collect();

    Ok(BarSeries::new(symbol, timeframe, bars)?)
}
