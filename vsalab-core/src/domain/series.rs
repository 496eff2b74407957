//! Validated bar series — the only input the engine accepts.
//!
//! Validation happens once, at the boundary. Everything downstream
//! (feature derivation, classification, scanning) assumes a sane,
//! chronologically ordered series and never re-checks.

use super::{Bar, Timeframe};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection reasons for a malformed bar series.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series has an empty symbol")]
    EmptySymbol,

    #[error("bar {index} belongs to '{found}', expected '{expected}'")]
    MixedSymbols {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("dates not strictly increasing at index {index} ({prev} -> {next})")]
    NonMonotonicDates {
        index: usize,
        prev: chrono::NaiveDate,
        next: chrono::NaiveDate,
    },

    #[error("bar {index} ({date}) failed OHLCV sanity check")]
    InsaneBar {
        index: usize,
        date: chrono::NaiveDate,
    },
}

/// Chronologically ordered bars for one (symbol, timeframe).
///
/// Immutable once constructed; derived features live in a separate
/// `FeatureSeries` value rather than being written back into the bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    symbol: String,
    timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a validated series. Rejects malformed input rather than letting
    /// corrupt data reach the classifiers.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        bars: Vec<Bar>,
    ) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(SeriesError::EmptySymbol);
        }
        for (i, bar) in bars.iter().enumerate() {
            if bar.symbol != symbol {
                return Err(SeriesError::MixedSymbols {
                    index: i,
                    expected: symbol.clone(),
                    found: bar.symbol.clone(),
                });
            }
            if !bar.is_sane() {
                return Err(SeriesError::InsaneBar {
                    index: i,
                    date: bar.date,
                });
            }
            if i > 0 && bars[i - 1].date >= bar.date {
                return Err(SeriesError::NonMonotonicDates {
                    index: i,
                    prev: bars[i - 1].date,
                    next: bar.date,
                });
            }
        }
        Ok(Self {
            symbol,
            timeframe,
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Last bar of the series, if any.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
