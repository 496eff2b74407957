//! Narrative prompt construction and the generative-text collaborator.
//!
//! The engine's output is structured; the narrative layer asks an external
//! language model to wrap it in prose. Only the prompt construction lives
//! here — transport, retries, and model selection belong to the provider
//! implementation outside this workspace. The returned text is an opaque
//! annotation, never an input to detection.

use crate::analysis::TickerAnalysis;
use serde_json::{json, Map, Value};
use thiserror::Error;
use vsalab_core::domain::BarSeries;

/// Keys the narrative model is instructed to emit.
const SYSTEM_INSTRUCTION: &str = "\
Act as a Master Volume Spread Analysis (VSA) Expert. Analyze the provided \
multi-timeframe data (Monthly, Weekly, Daily).
The data provided is a JSON object with OHLCV data for specific timeframes.

You must output your analysis in valid JSON format ONLY, with no markdown \
formatting. The JSON should have the following keys:
- \"vsa_status\": string (e.g., \"Mark-up\", \"Absorption\", \"Stopping Volume\", \"No Supply\", \"Test\", \"Jumping the Creek\", etc.)
- \"verdict\": string (e.g., \"BULLISH\", \"BEARISH\", \"NEUTRAL\")
- \"correlation_analysis\": string (How Monthly/Weekly structure influences Daily setup)
- \"smart_money_logic\": string (Intent behind volume spikes)
- \"key_levels\": list of strings (e.g. [\"Support at 150\", \"Resistance at 180\"])
- \"setup_stage\": string (e.g. \"Ready for Entry\", \"Ready for Exit\", \"Monitoring\")
- \"entry_trigger\": string (Specific price/volume condition to wait for)
- \"exit_trigger\": string
- \"volume_requirement\": string
- \"invalidation_level\": string";

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative provider unavailable: {0}")]
    Unavailable(String),

    #[error("narrative provider failed: {0}")]
    ProviderFailed(String),
}

/// A fully assembled prompt for the narrative model.
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    pub ticker: String,
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Serialize the last `n` bars as a date-keyed JSON object, the shape the
/// prompt promises the model.
fn serialize_series(series: &BarSeries, n: usize) -> Value {
    let bars = series.bars();
    let start = bars.len().saturating_sub(n);
    let mut map = Map::new();
    for bar in &bars[start..] {
        map.insert(
            bar.date.format("%Y-%m-%d").to_string(),
            json!({
                "Open": bar.open,
                "High": bar.high,
                "Low": bar.low,
                "Close": bar.close,
                "Volume": bar.volume,
            }),
        );
    }
    Value::Object(map)
}

/// Build the narrative request for one analyzed ticker.
///
/// `daily`, `weekly`, `monthly` are the same series the analysis ran on;
/// the depths mirror what the analysis serializes elsewhere (60/25/25).
pub fn build_request(
    analysis: &TickerAnalysis,
    daily: &BarSeries,
    weekly: &BarSeries,
    monthly: &BarSeries,
    depths: &crate::config::BarDepths,
) -> NarrativeRequest {
    let monthly_json = serde_json::to_string_pretty(&serialize_series(monthly, depths.monthly))
        .unwrap_or_default();
    let weekly_json = serde_json::to_string_pretty(&serialize_series(weekly, depths.weekly))
        .unwrap_or_default();
    let daily_json =
        serde_json::to_string_pretty(&serialize_series(daily, depths.daily)).unwrap_or_default();

    let user_prompt = format!(
        "Analyze the following data for {ticker}:\n\n\
Trigger Reason: {reason}\n\n\
Detected weekly status: {weekly_status:?}, monthly status: {monthly_status:?}, \
priority: {priority}\n\n\
Monthly Data (Last {m} bars):\n{monthly_json}\n\n\
Weekly Data (Last {w} bars):\n{weekly_json}\n\n\
Daily Data (Last {d} bars):\n{daily_json}\n",
        ticker = analysis.ticker,
        reason = analysis.screen.reason(),
        weekly_status = analysis.weekly.status,
        monthly_status = analysis.monthly.status,
        priority = analysis.priority.as_str(),
        m = depths.monthly,
        w = depths.weekly,
        d = depths.daily,
    );

    NarrativeRequest {
        ticker: analysis.ticker.clone(),
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_prompt,
    }
}

/// Trait for narrative providers.
///
/// Implementations own their transport and retry policy; the scan only
/// sees opaque text or an error it records per ticker.
pub trait NarrativeProvider: Send + Sync {
    fn name(&self) -> &str;

    fn narrate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError>;

    fn is_available(&self) -> bool;
}

/// Null provider — always unavailable. Used in tests and offline scans.
pub struct NullNarrative;

impl NarrativeProvider for NullNarrative {
    fn name(&self) -> &str {
        "null"
    }

    fn narrate(&self, _request: &NarrativeRequest) -> Result<String, NarrativeError> {
        Err(NarrativeError::Unavailable("null provider".into()))
    }

    fn is_available(&self) -> bool {
        false
    }
}
