//! Simple moving average of spread — the baseline against which a bar's
//! range counts as narrow or wide.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct SpreadSma {
    period: usize,
    name: String,
}

impl SpreadSma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "spread SMA period must be >= 1");
        Self {
            period,
            name: format!("spread_sma_{period}"),
        }
    }
}

impl Indicator for SpreadSma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        let mut sum: f64 = bars.iter().take(self.period).map(|b| b.high - b.low).sum();
        result[self.period - 1] = sum / self.period as f64;

        for i in self.period..n {
            sum += (bars[i].high - bars[i].low) - (bars[i - self.period].high - bars[i - self.period].low);
            result[i] = sum / self.period as f64;
        }

        result
    }
}
