//! Per-ticker analysis pipeline and parallel universe scan.
//!
//! Each ticker is an independent pure computation: screen, derive, scan
//! weekly and monthly, resolve priority against the quarterly trend. The
//! universe scan fans out with rayon; a failure on one ticker is recorded
//! and never aborts the rest.

use crate::config::ScanConfig;
use crate::data_loader::{LoadError, LoadedTicker};
use crate::screener::{screen_ticker, VolumeSurge};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use vsalab_core::domain::{SeriesError, Timeframe};
use vsalab_core::sequence::SequenceStatus;
use vsalab_core::{
    quarterly_trend, resample_quarterly, resolve_priority, scan_sequence, FeatureSeries, Priority,
    SequenceRecord, TrendContext,
};

/// Errors from analyzing a single ticker.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("missing {0} series")]
    MissingTimeframe(Timeframe),

    #[error("quarterly resample failed: {0}")]
    Resample(#[from] SeriesError),

    #[error("load failed: {0}")]
    Load(#[from] LoadError),
}

/// Directional verdict for one ticker, from the winning anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    BullishSetup,
    BearishSetup,
    Neutral,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::BullishSetup => "BULLISH_SETUP",
            Verdict::BearishSetup => "BEARISH_SETUP",
            Verdict::Neutral => "NEUTRAL",
        }
    }
}

/// Complete analysis record for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerAnalysis {
    pub ticker: String,
    /// Last daily close, when a daily series was loaded.
    pub current_price: Option<f64>,
    pub screen: VolumeSurge,
    pub weekly: SequenceRecord,
    pub monthly: SequenceRecord,
    pub trend: TrendContext,
    pub priority: Priority,
    pub verdict: Verdict,
    /// Next-step label for reports (the dashboard's Action column).
    pub action: String,
    pub dataset_hash: String,
    pub has_synthetic: bool,
}

/// Outcome of a universe scan: analyses ranked by priority, plus the
/// tickers that failed to load or analyze.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub analyses: Vec<TickerAnalysis>,
    pub failures: Vec<(String, String)>,
}

fn verdict_of(weekly: &SequenceRecord, monthly: &SequenceRecord) -> Verdict {
    // The weekly anchor is the actionable context; monthly breaks ties
    // when the weekly window is empty.
    match weekly.anchor.or(monthly.anchor) {
        Some(kind) if kind.is_bullish() => Verdict::BullishSetup,
        Some(_) => Verdict::BearishSetup,
        None => Verdict::Neutral,
    }
}

fn action_of(weekly: &SequenceRecord, monthly: &SequenceRecord) -> &'static str {
    let best = if monthly.status > weekly.status {
        monthly.status
    } else {
        weekly.status
    };
    match best {
        SequenceStatus::ConfirmedStrong => "READY_FOR_ENTRY",
        SequenceStatus::ConfirmedEarly => "PREPARE_ENTRY",
        SequenceStatus::WatchForTest => "WATCH_FOR_TEST",
        SequenceStatus::None => "MONITOR",
    }
}

/// Analyze one loaded ticker.
///
/// Tickers the screener rejects come back with `Priority::None` and empty
/// sequence records; they are cheap rows, not errors.
pub fn analyze_ticker(
    ticker: &str,
    loaded: &LoadedTicker,
    config: &ScanConfig,
) -> Result<TickerAnalysis, ScanError> {
    let weekly_series = loaded
        .series
        .get(&Timeframe::Weekly)
        .ok_or(ScanError::MissingTimeframe(Timeframe::Weekly))?;
    let monthly_series = loaded
        .series
        .get(&Timeframe::Monthly)
        .ok_or(ScanError::MissingTimeframe(Timeframe::Monthly))?;
    let current_price = loaded
        .series
        .get(&Timeframe::Daily)
        .and_then(|s| s.last())
        .map(|b| b.close);

    let screen = screen_ticker(weekly_series, monthly_series, config.sma_period);
    if !screen.is_match() {
        return Ok(TickerAnalysis {
            ticker: ticker.to_string(),
            current_price,
            screen,
            weekly: SequenceRecord::none(),
            monthly: SequenceRecord::none(),
            trend: TrendContext::Neutral,
            priority: Priority::None,
            verdict: Verdict::Neutral,
            action: "SCREENED_OUT".to_string(),
            dataset_hash: loaded.dataset_hash.clone(),
            has_synthetic: loaded.has_synthetic,
        });
    }

    let weekly_features = FeatureSeries::derive(weekly_series, config.sma_period);
    let monthly_features = FeatureSeries::derive(monthly_series, config.sma_period);

    let weekly = scan_sequence(&weekly_features, config.lookback, &config.thresholds);
    let monthly = scan_sequence(&monthly_features, config.lookback, &config.thresholds);

    let quarterly = resample_quarterly(monthly_series)?;
    let trend = quarterly_trend(&quarterly);

    let priority = resolve_priority(&weekly, &monthly, trend);
    let verdict = verdict_of(&weekly, &monthly);
    let action = action_of(&weekly, &monthly);

    Ok(TickerAnalysis {
        ticker: ticker.to_string(),
        current_price,
        screen,
        weekly,
        monthly,
        trend,
        priority,
        verdict,
        action: action.to_string(),
        dataset_hash: loaded.dataset_hash.clone(),
        has_synthetic: loaded.has_synthetic,
    })
}

/// Analyze every loaded ticker in parallel and rank the results.
///
/// `load_failures` from the loader are folded into the outcome so the
/// report can show what was skipped and why.
pub fn scan_universe(
    loaded: &HashMap<String, LoadedTicker>,
    load_failures: HashMap<String, LoadError>,
    config: &ScanConfig,
) -> ScanOutcome {
    let results: Vec<(String, Result<TickerAnalysis, ScanError>)> = loaded
        .par_iter()
        .map(|(ticker, data)| (ticker.clone(), analyze_ticker(ticker, data, config)))
        .collect();

    let mut outcome = ScanOutcome::default();
    for (ticker, result) in results {
        match result {
            Ok(analysis) => outcome.analyses.push(analysis),
            Err(e) => outcome.failures.push((ticker, e.to_string())),
        }
    }
    for (ticker, err) in load_failures {
        outcome.failures.push((ticker, err.to_string()));
    }

    // Highest priority first, then ticker for a stable report order.
    outcome
        .analyses
        .sort_by(|a, b| b.priority.cmp(&a.priority).then(a.ticker.cmp(&b.ticker)));
    outcome.failures.sort();
    outcome
}
