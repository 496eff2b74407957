//! Markdown report generator.

use crate::analysis::{ScanOutcome, TickerAnalysis};
use chrono::NaiveDate;
use vsalab_core::Priority;

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    pub fn generate(&self, outcome: &ScanOutcome, as_of: NaiveDate) -> String {
        let mut report = format!("# VSA Scan Report - {as_of}\n");

        let tiers = [
            (Priority::VeryHigh, "Very High Conviction"),
            (Priority::High, "High Conviction"),
            (Priority::Medium, "Medium"),
            (Priority::Low, "Watch / Monitoring"),
        ];
        for (tier, title) in tiers {
            let items: Vec<&TickerAnalysis> = outcome
                .analyses
                .iter()
                .filter(|a| a.priority == tier)
                .collect();
            Self::write_section(&mut report, title, &items);
        }

        let screened_out = outcome
            .analyses
            .iter()
            .filter(|a| a.priority == Priority::None)
            .count();
        if screened_out > 0 {
            report.push_str(&format!(
                "\n## Screened Out\n\n{screened_out} tickers showed no volume surge and were not analyzed.\n"
            ));
        }

        if !outcome.failures.is_empty() {
            report.push_str("\n## Failures\n\n");
            for (ticker, reason) in &outcome.failures {
                report.push_str(&format!("- **{ticker}**: {reason}\n"));
            }
        }

        report
    }

    fn write_section(report: &mut String, title: &str, items: &[&TickerAnalysis]) {
        if items.is_empty() {
            return;
        }
        report.push_str(&format!("\n## {title}\n"));
        for analysis in items {
            report.push_str(&format!(
                "\n### {} ({})\n",
                analysis.ticker,
                analysis.verdict.as_str()
            ));
            if let Some(price) = analysis.current_price {
                report.push_str(&format!("**Price:** {price:.2}\n\n"));
            }
            report.push_str(&format!("**Trigger:** {}\n\n", analysis.screen.reason()));
            report.push_str("| Timeframe | Status | Anchor | Anchor Date | Test 1 | Test 2 |\n");
            report.push_str("|-----------|--------|--------|-------------|--------|--------|\n");
            for (name, record) in [("Weekly", &analysis.weekly), ("Monthly", &analysis.monthly)] {
                report.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    name,
                    record.status.as_str(),
                    record.anchor.map_or("-", |a| a.as_str()),
                    fmt_date(record.anchor_date),
                    fmt_date(record.test1_date),
                    fmt_date(record.test2_date),
                ));
            }
            report.push_str(&format!(
                "\n- **Quarterly trend:** {:?}\n- **Action:** {}\n",
                analysis.trend, analysis.action
            ));
            if analysis.has_synthetic {
                report.push_str("- **Data:** SYNTHETIC (not tradeable)\n");
            }
            report.push_str("---\n");
        }
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Verdict;
    use crate::screener::{VolumeCheck, VolumeSurge};
    use vsalab_core::classify::AnchorKind;
    use vsalab_core::sequence::{SequenceRecord, SequenceStatus};
    use vsalab_core::TrendContext;

    fn sample_outcome() -> ScanOutcome {
        let check = VolumeCheck {
            met: true,
            latest_volume: 5_000.0,
            volume_sma: 1_000.0,
        };
        ScanOutcome {
            analyses: vec![TickerAnalysis {
                ticker: "SPY".into(),
                current_price: Some(420.69),
                screen: VolumeSurge {
                    weekly: check,
                    monthly: check,
                },
                weekly: SequenceRecord {
                    status: SequenceStatus::ConfirmedEarly,
                    anchor: Some(AnchorKind::StoppingVolume),
                    anchor_date: NaiveDate::from_ymd_opt(2024, 6, 14),
                    test1_date: NaiveDate::from_ymd_opt(2024, 6, 21),
                    test2_date: None,
                },
                monthly: SequenceRecord::none(),
                trend: TrendContext::BullishTrend,
                priority: vsalab_core::Priority::High,
                verdict: Verdict::BullishSetup,
                action: "PREPARE_ENTRY".to_string(),
                dataset_hash: "abc".into(),
                has_synthetic: false,
            }],
            failures: vec![("BAD".into(), "load failed".into())],
        }
    }

    #[test]
    fn report_groups_by_priority_and_lists_failures() {
        let report = MarkdownReportGenerator
            .generate(&sample_outcome(), NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
        assert!(report.contains("# VSA Scan Report - 2024-06-28"));
        assert!(report.contains("## High Conviction"));
        assert!(report.contains("### SPY (BULLISH_SETUP)"));
        assert!(report.contains("STOPPING_VOLUME"));
        assert!(report.contains("2024-06-21"));
        assert!(report.contains("## Failures"));
        assert!(report.contains("**BAD**"));
    }

    #[test]
    fn empty_tiers_are_omitted() {
        let report = MarkdownReportGenerator
            .generate(&sample_outcome(), NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
        assert!(!report.contains("## Very High Conviction"));
        assert!(!report.contains("## Medium"));
    }
}
