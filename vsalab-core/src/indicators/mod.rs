//! Per-bar indicator implementations feeding the feature deriver.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! They are computed once per series and never recomputed per bar.
//! The first `lookback()` values of every output are `f64::NAN` (warmup);
//! classifiers treat NaN as non-matching, never as zero.

pub mod clv;
pub mod rel_vol;
pub mod spread;
pub mod spread_sma;
pub mod volume_sma;

pub use clv::Clv;
pub use rel_vol::RelVol;
pub use spread::Spread;
pub use spread_sma::SpreadSma;
pub use volume_sma::VolumeSma;

use crate::domain::Bar;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values should be `f64::NAN`.
///
/// No indicator value at bar t may depend on data from bar t+1 or later.
pub trait Indicator {
    /// Human-readable name (e.g., "vol_sma_20", "clv").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Create synthetic bars from (close, volume) pairs for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes_volumes: &[(f64, u64)]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes_volumes
        .iter()
        .enumerate()
        .map(|(i, &(close, volume))| {
            let open = if i == 0 {
                close
            } else {
                closes_volumes[i - 1].0
            };
            Bar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
