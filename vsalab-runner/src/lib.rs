//! VSALab Runner — scan orchestration on top of `vsalab-core`.
//!
//! This crate builds on the engine to provide:
//! - Data loading with cache/provider/synthetic fallback
//! - The volume-surge screener (cheap pre-filter)
//! - Parallel per-ticker analysis with per-ticker failure isolation
//! - Narrative prompt construction for the generative-text collaborator
//! - Markdown and CSV report artifacts
//! - TOML scan configuration

pub mod analysis;
pub mod config;
pub mod data_loader;
pub mod narrative;
pub mod reporting;
pub mod runner;
pub mod screener;

pub use analysis::{analyze_ticker, scan_universe, ScanError, ScanOutcome, TickerAnalysis, Verdict};
pub use config::{BarDepths, ConfigError, ScanConfig};
pub use data_loader::{
    generate_synthetic_bars, load_ticker, load_universe, LoadError, LoadOptions, LoadedTicker,
    SCAN_TIMEFRAMES,
};
pub use narrative::{build_request, NarrativeError, NarrativeProvider, NarrativeRequest, NullNarrative};
pub use reporting::{write_csv, write_reports, MarkdownReportGenerator, ReportPaths, ReportRow};
pub use runner::{run_scan, RunError, ScanSummary};
pub use screener::{check_volume_condition, screen_ticker, VolumeCheck, VolumeSurge};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn analysis_types_are_send_sync() {
        assert_send::<TickerAnalysis>();
        assert_sync::<TickerAnalysis>();
        assert_send::<ScanOutcome>();
        assert_sync::<ScanOutcome>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<ScanConfig>();
        assert_sync::<ScanConfig>();
        assert_send::<LoadOptions>();
        assert_sync::<LoadOptions>();
    }

    #[test]
    fn screener_types_are_send_sync() {
        assert_send::<VolumeSurge>();
        assert_sync::<VolumeSurge>();
    }
}
