//! Bar classifiers — pure predicates labeling a single bar.
//!
//! Every predicate takes the bar's features and the threshold set
//! explicitly; there is no global configuration. All comparisons are
//! strict, so a NaN feature (warmup) or a flat bar (close == prev close)
//! never matches.

use crate::features::BarFeatures;
use serde::{Deserialize, Serialize};

/// Policy constants for the VSA classifiers.
///
/// The defaults are fixed policy, not tuning knobs: the sequence semantics
/// depend on them exactly. A distinct set may be passed for sensitivity
/// analysis in tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VsaThresholds {
    /// Spread below this fraction of its SMA counts as narrow.
    pub narrow_spread_ratio: f64,
    /// RelVol below this counts as low volume.
    pub low_volume: f64,
    /// RelVol above this counts as high volume (absorption).
    pub high_volume: f64,
    /// RelVol above this counts as ultra-high volume (anchors).
    pub ultra_high_volume: f64,
    /// CLV above this means the close held off the low.
    pub absorption_clv: f64,
    /// CLV below this means the close held off the high.
    pub climax_clv: f64,
    /// CLV floor for a bullish test (close not at the extreme low).
    pub test_clv_floor: f64,
    /// CLV ceiling for a no-demand bar (close not at the extreme high).
    pub no_demand_clv_ceiling: f64,
}

impl Default for VsaThresholds {
    fn default() -> Self {
        Self {
            narrow_spread_ratio: 0.85,
            low_volume: 0.85,
            high_volume: 1.5,
            ultra_high_volume: 1.8,
            absorption_clv: -0.25,
            climax_clv: 0.25,
            test_clv_floor: -0.8,
            no_demand_clv_ceiling: 0.8,
        }
    }
}

/// Close-to-close direction of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Down,
    Up,
    Flat,
}

impl Direction {
    pub fn of(close: f64, prev_close: f64) -> Self {
        if close < prev_close {
            Direction::Down
        } else if close > prev_close {
            Direction::Up
        } else {
            Direction::Flat
        }
    }
}

/// Anchor classification — the high-volume bar that starts a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnchorKind {
    /// Heavy selling absorbed on a down move (bullish).
    StoppingVolume,
    /// Professionals selling into public buying (bearish).
    BuyingClimax,
    /// Supply swamping demand on a down move (bearish).
    SupplyDominance,
}

impl AnchorKind {
    /// The confirmation a sequence needs after this anchor.
    pub fn confirmation(&self) -> ConfirmationKind {
        match self {
            AnchorKind::StoppingVolume => ConfirmationKind::Bullish,
            AnchorKind::BuyingClimax | AnchorKind::SupplyDominance => ConfirmationKind::Bearish,
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, AnchorKind::StoppingVolume)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorKind::StoppingVolume => "STOPPING_VOLUME",
            AnchorKind::BuyingClimax => "BUYING_CLIMAX",
            AnchorKind::SupplyDominance => "SUPPLY_DOMINANCE",
        }
    }
}

/// Which kind of follow-up bar confirms a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationKind {
    /// Test bar: supply has dried up.
    Bullish,
    /// No-demand bar: buying has dried up.
    Bearish,
}

fn direction(f: &BarFeatures<'_>) -> Option<Direction> {
    f.prev_close.map(|prev| Direction::of(f.bar.close, prev))
}

fn is_narrow(f: &BarFeatures<'_>, t: &VsaThresholds) -> bool {
    f.spread < f.spread_sma * t.narrow_spread_ratio
}

/// No-Supply: quiet narrow down bar — sellers absent.
pub fn is_no_supply(f: &BarFeatures<'_>, t: &VsaThresholds) -> bool {
    direction(f) == Some(Direction::Down) && is_narrow(f, t) && f.rel_vol < t.low_volume
}

/// Stopping-Volume / absorption: heavy selling met by buying, close held
/// off the low.
pub fn is_stopping_volume(f: &BarFeatures<'_>, t: &VsaThresholds) -> bool {
    direction(f) == Some(Direction::Down)
        && f.rel_vol > t.high_volume
        && f.clv > t.absorption_clv
}

/// Confirmation bar check against the kind implied by the anchor.
///
/// Bullish (Test): a quiet down bar not closing at the extreme low, or any
/// narrow-range low-volume bar. Bearish (No-Demand): a quiet up bar closing
/// off the high, or a narrow low-volume up bar.
pub fn is_test_bar(f: &BarFeatures<'_>, kind: ConfirmationKind, t: &VsaThresholds) -> bool {
    let is_low_vol = f.rel_vol < t.low_volume;
    match kind {
        ConfirmationKind::Bullish => {
            let is_down = direction(f) == Some(Direction::Down);
            (is_down && is_low_vol && f.clv > t.test_clv_floor) || (is_narrow(f, t) && is_low_vol)
        }
        ConfirmationKind::Bearish => {
            let is_up = direction(f) == Some(Direction::Up);
            (is_up && is_low_vol && f.clv < t.no_demand_clv_ceiling)
                || (is_up && is_narrow(f, t) && is_low_vol)
        }
    }
}

/// Anchor classification, checked in priority order.
///
/// Ultra-high volume is required for any anchor; the stopping-volume branch
/// wins over the bearish branches when both could match.
pub fn identify_anchor(f: &BarFeatures<'_>, t: &VsaThresholds) -> Option<AnchorKind> {
    // NaN (warmup) fails this comparison, so warmup bars are never anchors.
    if f.rel_vol.is_nan() || f.rel_vol <= t.ultra_high_volume {
        return None;
    }
    let dir = direction(f)?;

    if dir == Direction::Down && f.clv > t.absorption_clv {
        return Some(AnchorKind::StoppingVolume);
    }
    if f.clv < t.climax_clv {
        match dir {
            Direction::Up => return Some(AnchorKind::BuyingClimax),
            Direction::Down => return Some(AnchorKind::SupplyDominance),
            Direction::Flat => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::NaiveDate;

    fn bar(close: f64) -> Bar {
        Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    /// Hand-assembled features for threshold edge cases.
    fn features(
        bar: &Bar,
        prev_close: Option<f64>,
        spread: f64,
        clv: f64,
        rel_vol: f64,
        spread_sma: f64,
    ) -> BarFeatures<'_> {
        BarFeatures {
            bar,
            prev_close,
            spread,
            clv,
            vol_sma: 1_000.0,
            rel_vol,
            spread_sma,
        }
    }

    #[test]
    fn no_supply_requires_all_three() {
        let t = VsaThresholds::default();
        let b = bar(99.0);
        assert!(is_no_supply(&features(&b, Some(100.0), 1.0, 0.0, 0.5, 2.0), &t));
        // up move
        assert!(!is_no_supply(&features(&b, Some(98.0), 1.0, 0.0, 0.5, 2.0), &t));
        // wide spread
        assert!(!is_no_supply(&features(&b, Some(100.0), 2.0, 0.0, 0.5, 2.0), &t));
        // high volume
        assert!(!is_no_supply(&features(&b, Some(100.0), 1.0, 0.0, 1.0, 2.0), &t));
    }

    #[test]
    fn stopping_volume_needs_close_off_the_low() {
        let t = VsaThresholds::default();
        let b = bar(99.0);
        assert!(is_stopping_volume(
            &features(&b, Some(100.0), 2.0, 0.0, 1.6, 2.0),
            &t
        ));
        // close on the low
        assert!(!is_stopping_volume(
            &features(&b, Some(100.0), 2.0, -0.9, 1.6, 2.0),
            &t
        ));
        // not enough volume
        assert!(!is_stopping_volume(
            &features(&b, Some(100.0), 2.0, 0.0, 1.4, 2.0),
            &t
        ));
    }

    #[test]
    fn bullish_test_matches_either_branch() {
        let t = VsaThresholds::default();
        let b = bar(99.0);
        // quiet down bar off the low
        assert!(is_test_bar(
            &features(&b, Some(100.0), 2.0, 0.0, 0.5, 2.0),
            ConfirmationKind::Bullish,
            &t
        ));
        // narrow low-volume bar, direction irrelevant
        assert!(is_test_bar(
            &features(&b, Some(98.0), 1.0, 0.9, 0.5, 2.0),
            ConfirmationKind::Bullish,
            &t
        ));
        // quiet down bar closing on the extreme low fails branch one and is wide
        assert!(!is_test_bar(
            &features(&b, Some(100.0), 2.0, -0.9, 0.5, 2.0),
            ConfirmationKind::Bullish,
            &t
        ));
    }

    #[test]
    fn no_demand_requires_up_move() {
        let t = VsaThresholds::default();
        let b = bar(101.0);
        assert!(is_test_bar(
            &features(&b, Some(100.0), 2.0, 0.0, 0.5, 2.0),
            ConfirmationKind::Bearish,
            &t
        ));
        // down bar can never be no-demand
        assert!(!is_test_bar(
            &features(&b, Some(102.0), 1.0, 0.0, 0.5, 2.0),
            ConfirmationKind::Bearish,
            &t
        ));
        // up bar closing on the high
        assert!(!is_test_bar(
            &features(&b, Some(100.0), 2.0, 0.9, 0.5, 2.0),
            ConfirmationKind::Bearish,
            &t
        ));
    }

    #[test]
    fn anchor_requires_ultra_high_volume() {
        let t = VsaThresholds::default();
        let b = bar(99.0);
        assert_eq!(
            identify_anchor(&features(&b, Some(100.0), 2.0, 0.0, 1.8, 2.0), &t),
            None
        );
        assert_eq!(
            identify_anchor(&features(&b, Some(100.0), 2.0, 0.0, 2.0, 2.0), &t),
            Some(AnchorKind::StoppingVolume)
        );
    }

    #[test]
    fn anchor_precedence_stopping_volume_wins() {
        // down, CLV 0.1: both the stopping-volume branch (clv > -0.25) and
        // the supply-dominance branch (clv < 0.25) could claim it.
        let t = VsaThresholds::default();
        let b = bar(99.0);
        assert_eq!(
            identify_anchor(&features(&b, Some(100.0), 2.0, 0.1, 2.0, 2.0), &t),
            Some(AnchorKind::StoppingVolume)
        );
    }

    #[test]
    fn anchor_bearish_branches() {
        let t = VsaThresholds::default();
        let up = bar(101.0);
        assert_eq!(
            identify_anchor(&features(&up, Some(100.0), 2.0, -0.5, 2.0, 2.0), &t),
            Some(AnchorKind::BuyingClimax)
        );
        let down = bar(99.0);
        assert_eq!(
            identify_anchor(&features(&down, Some(100.0), 2.0, -0.5, 2.0, 2.0), &t),
            Some(AnchorKind::SupplyDominance)
        );
    }

    #[test]
    fn warmup_nan_features_never_match() {
        let t = VsaThresholds::default();
        let b = bar(99.0);
        let f = features(&b, Some(100.0), 1.0, f64::NAN, f64::NAN, f64::NAN);
        assert!(!is_no_supply(&f, &t));
        assert!(!is_stopping_volume(&f, &t));
        assert!(!is_test_bar(&f, ConfirmationKind::Bullish, &t));
        assert!(identify_anchor(&f, &t).is_none());
    }

    #[test]
    fn first_bar_has_no_direction() {
        let t = VsaThresholds::default();
        let b = bar(99.0);
        let f = features(&b, None, 1.0, 0.0, 2.0, 2.0);
        assert!(identify_anchor(&f, &t).is_none());
        assert!(!is_no_supply(&f, &t));
    }
}
