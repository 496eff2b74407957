//! Feature derivation — annotates a bar series with the VSA inputs.
//!
//! A `FeatureSeries` is a new value computed from a validated `BarSeries`;
//! the bars themselves are never mutated. Feature columns are computed once
//! and queried by index during the scan, so deriving twice from the same
//! series yields identical values.

use crate::domain::{Bar, BarSeries, Timeframe};
use crate::indicators::{Clv, Indicator, RelVol, Spread, SpreadSma, VolumeSma};
use serde::{Deserialize, Serialize};

/// Default trailing window for the volume and spread baselines.
pub const DEFAULT_SMA_PERIOD: usize = 20;

/// A bar series annotated with per-bar VSA features.
///
/// SMA-derived columns are NaN for the first `sma_period - 1` bars
/// (insufficient history, not zero).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSeries {
    symbol: String,
    timeframe: Timeframe,
    sma_period: usize,
    bars: Vec<Bar>,
    spread: Vec<f64>,
    clv: Vec<f64>,
    vol_sma: Vec<f64>,
    rel_vol: Vec<f64>,
    spread_sma: Vec<f64>,
}

/// View of one bar together with its features and predecessor close.
///
/// `prev_close` is None for the first bar of a series; classifiers cannot
/// establish a direction there.
#[derive(Debug, Clone, Copy)]
pub struct BarFeatures<'a> {
    pub bar: &'a Bar,
    pub prev_close: Option<f64>,
    pub spread: f64,
    pub clv: f64,
    pub vol_sma: f64,
    pub rel_vol: f64,
    pub spread_sma: f64,
}

impl FeatureSeries {
    /// Derive features for every bar of the series.
    pub fn derive(series: &BarSeries, sma_period: usize) -> Self {
        let bars = series.bars();
        Self {
            symbol: series.symbol().to_string(),
            timeframe: series.timeframe(),
            sma_period,
            spread: Spread.compute(bars),
            clv: Clv.compute(bars),
            vol_sma: VolumeSma::new(sma_period).compute(bars),
            rel_vol: RelVol::new(sma_period).compute(bars),
            spread_sma: SpreadSma::new(sma_period).compute(bars),
            bars: bars.to_vec(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn sma_period(&self) -> usize {
        self.sma_period
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

    /// Features for the bar at `index`, or None when out of bounds.
    pub fn at(&self, index: usize) -> Option<BarFeatures<'_>> {
        let bar = self.bars.get(index)?;
        Some(BarFeatures {
            bar,
            prev_close: index.checked_sub(1).map(|p| self.bars[p].close),
            spread: self.spread[index],
            clv: self.clv[index],
            vol_sma: self.vol_sma[index],
            rel_vol: self.rel_vol[index],
            spread_sma: self.spread_sma[index],
        })
    }
}
