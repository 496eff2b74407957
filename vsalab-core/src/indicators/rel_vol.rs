//! Relative volume — volume over its trailing moving average.
//!
//! A zero volume SMA is floored at 1.0 before division, so RelVol is never
//! NaN or infinite once the warmup window has filled.

use super::{Indicator, VolumeSma};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct RelVol {
    vol_sma: VolumeSma,
    name: String,
}

impl RelVol {
    pub fn new(period: usize) -> Self {
        Self {
            vol_sma: VolumeSma::new(period),
            name: format!("rel_vol_{period}"),
        }
    }
}

impl Indicator for RelVol {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.vol_sma.lookback()
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let sma = self.vol_sma.compute(bars);
        bars.iter()
            .zip(sma)
            .map(|(bar, avg)| {
                if avg.is_nan() {
                    f64::NAN
                } else {
                    let floor = if avg == 0.0 { 1.0 } else { avg };
                    bar.volume as f64 / floor
                }
            })
            .collect()
    }
}
