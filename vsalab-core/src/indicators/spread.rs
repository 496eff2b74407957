//! Spread — the high-low range of each bar.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Spread;

impl Indicator for Spread {
    fn name(&self) -> &str {
        "spread"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        bars.iter().map(|b| b.high - b.low).collect()
    }
}
