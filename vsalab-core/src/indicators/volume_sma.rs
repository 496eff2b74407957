//! Simple moving average of volume.
//!
//! Rolling mean over a trailing window. Lookback: period - 1 (first valid
//! value at index period-1).

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct VolumeSma {
    period: usize,
    name: String,
}

impl VolumeSma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volume SMA period must be >= 1");
        Self {
            period,
            name: format!("vol_sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for VolumeSma {
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

        // Compute initial window sum, then roll forward
        let mut sum: f64 = bars.iter().take(self.period).map(|b| b.volume as f64).sum();
        result[self.period - 1] = sum / self.period as f64;

        for i in self.period..n {
            sum += bars[i].volume as f64 - bars[i - self.period].volume as f64;
            result[i] = sum / self.period as f64;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn vol_sma_3_basic() {
        let bars = make_bars(&[
            (100.0, 100),
            (100.0, 200),
            (100.0, 300),
            (100.0, 400),
            (100.0, 500),
        ]);
        let result = VolumeSma::new(3).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 200.0, DEFAULT_EPSILON);
        assert_approx(result[3], 300.0, DEFAULT_EPSILON);
        assert_approx(result[4], 400.0, DEFAULT_EPSILON);
    }

    #[test]
    fn vol_sma_too_few_bars() {
        let bars = make_bars(&[(100.0, 100), (100.0, 200)]);
        let result = VolumeSma::new(5).compute(&bars);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn vol_sma_lookback() {
        assert_eq!(VolumeSma::new(20).lookback(), 19);
        assert_eq!(VolumeSma::new(1).lookback(), 0);
    }
}
