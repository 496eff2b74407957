//! VSALab Core — the Volume Spread Analysis signal-detection engine.
//!
//! This crate turns a validated OHLCV bar series into a structured trading
//! signal:
//! - Domain types (bars, validated series, timeframes)
//! - Per-bar feature derivation (spread, CLV, relative volume, baselines)
//! - Pure bar classifiers (no-supply, stopping volume, tests, anchors)
//! - Bounded-window sequence scanner (anchor → test → confirmation)
//! - Multi-timeframe priority resolver with quarterly trend context
//! - Data boundary (provider trait, CSV cache, ingest validation)
//!
//! Everything is a pure computation over immutable input: no network, no
//! shared state, no ordering dependency between tickers. Callers may fan
//! out across tickers with any concurrency mechanism they like.

pub mod classify;
pub mod data;
pub mod domain;
pub mod features;
pub mod indicators;
pub mod priority;
pub mod resample;
pub mod sequence;

pub use classify::{AnchorKind, ConfirmationKind, Direction, VsaThresholds};
pub use features::{BarFeatures, FeatureSeries, DEFAULT_SMA_PERIOD};
pub use priority::{quarterly_trend, resolve_priority, Priority, TrendContext};
pub use resample::resample_quarterly;
pub use sequence::{scan_sequence, SequenceRecord, SequenceStatus, DEFAULT_LOOKBACK};
