//! Priority resolution — merges weekly and monthly sequences with the
//! quarterly trend into one actionable tier.
//!
//! Higher-timeframe confirmation dominates: a monthly-confirmed setup
//! outranks everything except a setup confirmed on both timeframes, and a
//! weekly confirmation riding a bullish quarterly trend ranks just below.

use crate::domain::BarSeries;
use crate::sequence::SequenceRecord;
use serde::{Deserialize, Serialize};

/// Quarterly trend context, from the last two quarterly closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendContext {
    BullishTrend,
    BearishTrend,
    Neutral,
}

/// Actionable priority tier for one ticker.
///
/// `None` marks tickers that never entered analysis (screener rejects);
/// the resolver itself bottoms out at `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "NONE",
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::VeryHigh => "VERY_HIGH",
        }
    }
}

/// Trend context from a quarterly-resampled series: compares the last two
/// quarterly closes. Fewer than two quarters is Neutral, not an error.
pub fn quarterly_trend(quarterly: &BarSeries) -> TrendContext {
    let bars = quarterly.bars();
    if bars.len() < 2 {
        return TrendContext::Neutral;
    }
    let prev = bars[bars.len() - 2].close;
    let last = bars[bars.len() - 1].close;
    if last > prev {
        TrendContext::BullishTrend
    } else if last < prev {
        TrendContext::BearishTrend
    } else {
        TrendContext::Neutral
    }
}

/// Decision table, top to bottom, first match wins.
pub fn resolve_priority(
    weekly: &SequenceRecord,
    monthly: &SequenceRecord,
    trend: TrendContext,
) -> Priority {
    let weekly_confirmed = weekly.status.is_confirmed();
    let monthly_confirmed = monthly.status.is_confirmed();

    if monthly_confirmed && weekly_confirmed {
        Priority::VeryHigh
    } else if monthly_confirmed {
        Priority::Medium
    } else if trend == TrendContext::BullishTrend && weekly_confirmed {
        Priority::High
    } else if weekly_confirmed {
        Priority::Medium
    } else {
        // watch-only and no-signal both bottom out at Low
        Priority::Low
    }
}
