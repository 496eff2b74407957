//! Volume-surge screener — the cheap pre-filter before sequence analysis.
//!
//! A ticker is worth analyzing when its latest weekly OR latest monthly
//! volume exceeds the trailing 20-bar volume average on that timeframe.
//! Insufficient history is a non-match, never an error.

use serde::{Deserialize, Serialize};
use vsalab_core::domain::BarSeries;
use vsalab_core::indicators::{Indicator, VolumeSma};

/// One timeframe's volume-vs-baseline measurement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeCheck {
    pub met: bool,
    pub latest_volume: f64,
    pub volume_sma: f64,
}

impl VolumeCheck {
    fn not_met() -> Self {
        Self {
            met: false,
            latest_volume: 0.0,
            volume_sma: 0.0,
        }
    }
}

/// Screener outcome for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSurge {
    pub weekly: VolumeCheck,
    pub monthly: VolumeCheck,
}

impl VolumeSurge {
    /// True when either timeframe shows the surge.
    pub fn is_match(&self) -> bool {
        self.weekly.met || self.monthly.met
    }

    /// Human-readable trigger reason, carried into reports and the
    /// narrative prompt.
    pub fn reason(&self) -> String {
        format!(
            "Weekly_Vol_vs_SMA: {} ({:.0} vs {:.0}), Monthly_Vol_vs_SMA: {} ({:.0} vs {:.0})",
            self.weekly.met,
            self.weekly.latest_volume,
            self.weekly.volume_sma,
            self.monthly.met,
            self.monthly.latest_volume,
            self.monthly.volume_sma,
        )
    }
}

/// Check the latest bar's volume against its trailing SMA.
pub fn check_volume_condition(series: &BarSeries, sma_period: usize) -> VolumeCheck {
    let bars = series.bars();
    if bars.len() < sma_period {
        return VolumeCheck::not_met();
    }
    let sma = VolumeSma::new(sma_period).compute(bars);
    let latest_sma = sma[bars.len() - 1];
    if latest_sma.is_nan() {
        return VolumeCheck::not_met();
    }
    let latest_volume = bars[bars.len() - 1].volume as f64;
    VolumeCheck {
        met: latest_volume > latest_sma,
        latest_volume,
        volume_sma: latest_sma,
    }
}

/// Screen one ticker from its weekly and monthly series.
pub fn screen_ticker(weekly: &BarSeries, monthly: &BarSeries, sma_period: usize) -> VolumeSurge {
    VolumeSurge {
        weekly: check_volume_condition(weekly, sma_period),
        monthly: check_volume_condition(monthly, sma_period),
    }
}
