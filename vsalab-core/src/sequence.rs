//! Sequence scanner — anchor → test → confirmation over a bounded window.
//!
//! The scan walks the most recent `lookback + 1` bars (the extra bar only
//! supplies the first prev-close). Each anchor found opens a candidate
//! sequence and searches forward for its confirmations; a later anchor
//! supersedes an earlier one, so the record returned always belongs to the
//! most recent anchor in the window.

use crate::classify::{identify_anchor, is_test_bar, AnchorKind, VsaThresholds};
use crate::features::FeatureSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default scan window (bars after the prev-close seed bar).
pub const DEFAULT_LOOKBACK: usize = 5;

/// Confidence of a detected sequence. Ordered by strength, so callers can
/// take the stronger of two timeframes with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SequenceStatus {
    /// No anchor in the window.
    None,
    /// Anchor found, no confirmation yet.
    WatchForTest,
    /// Anchor plus one confirmation.
    ConfirmedEarly,
    /// Anchor plus two confirmations.
    ConfirmedStrong,
}

impl SequenceStatus {
    /// True for ConfirmedEarly and ConfirmedStrong.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SequenceStatus::ConfirmedEarly | SequenceStatus::ConfirmedStrong)
    }

    pub fn is_watch(&self) -> bool {
        matches!(self, SequenceStatus::WatchForTest)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceStatus::None => "NONE",
            SequenceStatus::WatchForTest => "WATCH_FOR_TEST",
            SequenceStatus::ConfirmedEarly => "CONFIRMED_EARLY",
            SequenceStatus::ConfirmedStrong => "CONFIRMED_STRONG",
        }
    }
}

/// Outcome of scanning one (symbol, timeframe) window.
///
/// Recomputed from scratch each run; carries no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub status: SequenceStatus,
    pub anchor: Option<AnchorKind>,
    pub anchor_date: Option<NaiveDate>,
    pub test1_date: Option<NaiveDate>,
    pub test2_date: Option<NaiveDate>,
}

impl SequenceRecord {
    /// The empty record: nothing detected.
    pub fn none() -> Self {
        Self {
            status: SequenceStatus::None,
            anchor: None,
            anchor_date: None,
            test1_date: None,
            test2_date: None,
        }
    }
}

/// Scan the trailing window of `features` for an anchor → test sequence.
///
/// Returns the record of the most recent anchor found, or the empty record
/// when the window holds no anchor or the series is shorter than
/// `lookback + 1` bars (insufficient history is a normal negative result).
pub fn scan_sequence(
    features: &FeatureSeries,
    lookback: usize,
    thresholds: &VsaThresholds,
) -> SequenceRecord {
    let n = features.len();
    if n < lookback + 1 {
        return SequenceRecord::none();
    }

    // Window start; bar `start` itself only seeds prev_close for `start+1`.
    let start = n - (lookback + 1);
    let mut record = SequenceRecord::none();

    for i in (start + 1)..n {
        let f = match features.at(i) {
            Some(f) => f,
            None => continue,
        };
        let anchor = match identify_anchor(&f, thresholds) {
            Some(kind) => kind,
            None => continue,
        };

        // New candidate: any earlier sequence is stale context.
        let confirmation = anchor.confirmation();
        let mut test1: Option<NaiveDate> = None;
        let mut test2: Option<NaiveDate> = None;

        for j in (i + 1)..n {
            let g = match features.at(j) {
                Some(g) => g,
                None => continue,
            };
            if is_test_bar(&g, confirmation, thresholds) {
                if test1.is_none() {
                    test1 = Some(g.bar.date);
                } else if test2.is_none() {
                    test2 = Some(g.bar.date);
                }
                // further matches are ignored for this anchor
            }
        }

        let status = match (test1.is_some(), test2.is_some()) {
            (true, true) => SequenceStatus::ConfirmedStrong,
            (true, false) => SequenceStatus::ConfirmedEarly,
            _ => SequenceStatus::WatchForTest,
        };

        record = SequenceRecord {
            status,
            anchor: Some(anchor),
            anchor_date: Some(f.bar.date),
            test1_date: test1,
            test2_date: test2,
        };
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, BarSeries, Timeframe};
    use chrono::NaiveDate;

    /// Bars engineered so the 3-bar SMAs are predictable: baseline bars have
    /// spread 2.0 and volume 1000.
    fn quiet_bar(day: u32, close: f64, volume: u64) -> Bar {
        Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        }
    }

    fn derive(bars: Vec<Bar>) -> FeatureSeries {
        let series = BarSeries::new("TEST", Timeframe::Daily, bars).unwrap();
        FeatureSeries::derive(&series, 3)
    }

    #[test]
    fn short_series_yields_none() {
        let features = derive(vec![
            quiet_bar(2, 100.0, 1000),
            quiet_bar(3, 100.5, 1000),
            quiet_bar(4, 101.0, 1000),
        ]);
        let record = scan_sequence(&features, 5, &VsaThresholds::default());
        assert_eq!(record, SequenceRecord::none());
    }

    #[test]
    fn window_without_anchor_yields_none() {
        let bars = (0..8).map(|i| quiet_bar(2 + i, 100.0 + i as f64 * 0.1, 1000)).collect();
        let record = scan_sequence(&derive(bars), 5, &VsaThresholds::default());
        assert_eq!(record.status, SequenceStatus::None);
        assert!(record.anchor.is_none());
    }

    /// Down bar on ultra-high volume closing mid-range: stopping-volume
    /// anchor. The trailing volume SMA includes the bar itself, so the
    /// volume has to be well clear of the neighborhood to push RelVol
    /// past the anchor threshold.
    fn anchor_bar(day: u32, prev_close: f64, volume: u64) -> Bar {
        let close = prev_close - 1.0;
        Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: prev_close,
            high: close + 1.5,
            low: close - 1.5,
            close,
            volume,
        }
    }

    /// Quiet down bar closing mid-range: bullish test on low volume.
    fn test_bar(day: u32, prev_close: f64) -> Bar {
        let close = prev_close - 0.1;
        Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: prev_close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 400,
        }
    }

    #[test]
    fn anchor_without_test_is_watch() {
        let bars = vec![
            quiet_bar(2, 100.0, 1000),
            quiet_bar(3, 100.0, 1000),
            quiet_bar(4, 100.0, 1000),
            quiet_bar(5, 100.0, 1000),
            anchor_bar(8, 100.0, 5000),
            quiet_bar(9, 99.0, 1000), // flat close: not a test
        ];
        let record = scan_sequence(&derive(bars), 5, &VsaThresholds::default());
        assert_eq!(record.status, SequenceStatus::WatchForTest);
        assert_eq!(record.anchor, Some(AnchorKind::StoppingVolume));
        assert_eq!(
            record.anchor_date,
            NaiveDate::from_ymd_opt(2024, 1, 8)
        );
        assert!(record.test1_date.is_none());
    }

    #[test]
    fn one_test_confirms_early() {
        let bars = vec![
            quiet_bar(2, 100.0, 1000),
            quiet_bar(3, 100.0, 1000),
            quiet_bar(4, 100.0, 1000),
            anchor_bar(5, 100.0, 5000),
            test_bar(8, 99.0),
            quiet_bar(9, 99.0, 1000),
        ];
        let record = scan_sequence(&derive(bars), 5, &VsaThresholds::default());
        assert_eq!(record.status, SequenceStatus::ConfirmedEarly);
        assert_eq!(record.anchor_date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(record.test1_date, NaiveDate::from_ymd_opt(2024, 1, 8));
        assert!(record.test2_date.is_none());
    }

    #[test]
    fn two_tests_confirm_strong_in_order() {
        let bars = vec![
            quiet_bar(2, 100.0, 1000),
            quiet_bar(3, 100.0, 1000),
            quiet_bar(4, 100.0, 1000),
            anchor_bar(5, 100.0, 5000),
            test_bar(8, 99.0),
            test_bar(9, 98.9),
        ];
        let record = scan_sequence(&derive(bars), 5, &VsaThresholds::default());
        assert_eq!(record.status, SequenceStatus::ConfirmedStrong);
        assert_eq!(record.test1_date, NaiveDate::from_ymd_opt(2024, 1, 8));
        assert_eq!(record.test2_date, NaiveDate::from_ymd_opt(2024, 1, 9));
    }

    #[test]
    fn third_test_is_ignored() {
        // The last bar also qualifies as a test (down, RelVol ~0.82) but
        // two confirmations are already recorded.
        let mut third = test_bar(9, 98.8);
        third.volume = 300;
        let bars = vec![
            quiet_bar(2, 100.0, 1000),
            quiet_bar(3, 100.0, 1000),
            anchor_bar(4, 100.0, 5000),
            test_bar(5, 99.0),
            test_bar(8, 98.9),
            third,
        ];
        let record = scan_sequence(&derive(bars), 5, &VsaThresholds::default());
        assert_eq!(record.status, SequenceStatus::ConfirmedStrong);
        assert_eq!(record.test1_date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(record.test2_date, NaiveDate::from_ymd_opt(2024, 1, 8));
    }

    #[test]
    fn later_anchor_supersedes_earlier() {
        // First anchor gets a confirming test; the later anchor has none.
        // The later anchor still wins: its context is the current one.
        let bars = vec![
            quiet_bar(2, 100.0, 1000),
            quiet_bar(3, 100.0, 1000),
            anchor_bar(4, 100.0, 5000),
            test_bar(5, 99.0),
            anchor_bar(8, 98.9, 12_000),
            quiet_bar(9, 97.9, 1000), // flat: confirms nothing
        ];
        let record = scan_sequence(&derive(bars), 5, &VsaThresholds::default());
        assert_eq!(record.status, SequenceStatus::WatchForTest);
        assert_eq!(record.anchor_date, NaiveDate::from_ymd_opt(2024, 1, 8));
        assert!(record.test1_date.is_none());
    }

    #[test]
    fn bearish_anchor_looks_for_no_demand() {
        // Up bar on ultra-high volume closing near the low: buying climax.
        let climax = Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            open: 100.0,
            high: 103.0,
            low: 100.0,
            close: 100.5,
            volume: 5000,
        };
        // Quiet up bar closing mid-range: no-demand.
        let no_demand = Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            open: 100.5,
            high: 101.6,
            low: 99.6,
            close: 100.6,
            volume: 400,
        };
        let bars = vec![
            quiet_bar(2, 100.0, 1000),
            quiet_bar(3, 100.0, 1000),
            quiet_bar(4, 100.0, 1000),
            climax,
            no_demand,
            quiet_bar(9, 100.6, 1000),
        ];
        let record = scan_sequence(&derive(bars), 5, &VsaThresholds::default());
        assert_eq!(record.anchor, Some(AnchorKind::BuyingClimax));
        assert_eq!(record.status, SequenceStatus::ConfirmedEarly);
        assert_eq!(record.test1_date, NaiveDate::from_ymd_opt(2024, 1, 8));
    }
}
