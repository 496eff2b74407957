//! Close Location Value (CLV).
//!
//! Position of the close within the bar's range, normalized to [-1, 1]:
//! -1 closes on the low, +1 on the high. A zero-range bar divides by a
//! small epsilon instead of zero, so its CLV degenerates to 0 rather than
//! raising.

use super::Indicator;
use crate::domain::Bar;

/// Denominator substitute when high == low.
pub const ZERO_RANGE_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct Clv;

impl Indicator for Clv {
    fn name(&self) -> &str {
        "clv"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        bars.iter()
            .map(|b| {
                let mut range = b.high - b.low;
                if range == 0.0 {
                    range = ZERO_RANGE_EPSILON;
                }
                ((b.close - b.low) - (b.high - b.close)) / range
            })
            .collect()
    }
}
