//! Flat CSV report — one row per ticker, the dashboard's table schema.

use crate::analysis::{ScanOutcome, TickerAnalysis};
use serde::Serialize;
use std::io;

/// One CSV row. Column names match the dashboard grid.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Current_Price")]
    pub current_price: Option<f64>,
    #[serde(rename = "Priority")]
    pub priority: &'static str,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Verdict")]
    pub verdict: &'static str,
    #[serde(rename = "Monthly_Context")]
    pub monthly_context: &'static str,
    #[serde(rename = "Weekly_Context")]
    pub weekly_context: &'static str,
    #[serde(rename = "Weekly_Signal")]
    pub weekly_signal: &'static str,
    #[serde(rename = "Weekly_Anchor_Date")]
    pub weekly_anchor_date: String,
    #[serde(rename = "Synthetic")]
    pub synthetic: bool,
}

impl ReportRow {
    pub fn from_analysis(a: &TickerAnalysis) -> Self {
        Self {
            ticker: a.ticker.clone(),
            current_price: a.current_price,
            priority: a.priority.as_str(),
            action: a.action.clone(),
            verdict: a.verdict.as_str(),
            monthly_context: a.monthly.status.as_str(),
            weekly_context: a.weekly.status.as_str(),
            weekly_signal: a.weekly.anchor.map_or("-", |k| k.as_str()),
            weekly_anchor_date: a
                .weekly
                .anchor_date
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            synthetic: a.has_synthetic,
        }
    }
}

/// Write every analyzed ticker (screened-out rows included) to `writer`.
pub fn write_csv<W: io::Write>(outcome: &ScanOutcome, writer: W) -> csv::Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    for analysis in &outcome.analyses {
        w.serialize(ReportRow::from_analysis(analysis))?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Verdict;
    use crate::screener::{VolumeCheck, VolumeSurge};
    use chrono::NaiveDate;
    use vsalab_core::classify::AnchorKind;
    use vsalab_core::sequence::{SequenceRecord, SequenceStatus};
    use vsalab_core::{Priority, TrendContext};

    fn analysis() -> TickerAnalysis {
        let check = VolumeCheck {
            met: true,
            latest_volume: 5_000.0,
            volume_sma: 1_000.0,
        };
        TickerAnalysis {
            ticker: "SPY".into(),
            current_price: Some(420.0),
            screen: VolumeSurge {
                weekly: check,
                monthly: check,
            },
            weekly: SequenceRecord {
                status: SequenceStatus::ConfirmedStrong,
                anchor: Some(AnchorKind::StoppingVolume),
                anchor_date: NaiveDate::from_ymd_opt(2024, 6, 14),
                test1_date: NaiveDate::from_ymd_opt(2024, 6, 21),
                test2_date: NaiveDate::from_ymd_opt(2024, 6, 28),
            },
            monthly: SequenceRecord::none(),
            trend: TrendContext::Neutral,
            priority: Priority::Medium,
            verdict: Verdict::BullishSetup,
            action: "READY_FOR_ENTRY".to_string(),
            dataset_hash: "abc".into(),
            has_synthetic: false,
        }
    }

    #[test]
    fn csv_has_dashboard_columns() {
        let outcome = ScanOutcome {
            analyses: vec![analysis()],
            failures: vec![],
        };
        let mut buf = Vec::new();
        write_csv(&outcome, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert_eq!(
            header,
            "Ticker,Current_Price,Priority,Action,Verdict,Monthly_Context,Weekly_Context,Weekly_Signal,Weekly_Anchor_Date,Synthetic"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("SPY,420.0,MEDIUM,READY_FOR_ENTRY,BULLISH_SETUP"));
        assert!(row.contains("STOPPING_VOLUME"));
        assert!(row.contains("2024-06-14"));
    }

    #[test]
    fn screened_out_rows_carry_none_priority() {
        let mut a = analysis();
        a.priority = Priority::None;
        a.action = "SCREENED_OUT".to_string();
        a.weekly = SequenceRecord::none();
        let outcome = ScanOutcome {
            analyses: vec![a],
            failures: vec![],
        };
        let mut buf = Vec::new();
        write_csv(&outcome, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("NONE,SCREENED_OUT"));
    }
}
