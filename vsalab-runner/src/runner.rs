//! Single-entry scan orchestration: universe → load → analyze → report.

use crate::analysis::{scan_universe, ScanOutcome};
use crate::config::{ConfigError, ScanConfig};
use crate::data_loader::{load_universe, LoadOptions};
use crate::reporting::{write_reports, ReportPaths};
use chrono::NaiveDate;
use thiserror::Error;
use vsalab_core::data::{BarProvider, CsvCache, LoadProgress};

/// Errors that abort an entire scan run (per-ticker problems never do).
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("writing reports failed: {0}")]
    Report(#[from] std::io::Error),
}

/// Everything a completed scan run produced.
#[derive(Debug)]
pub struct ScanSummary {
    pub outcome: ScanOutcome,
    pub reports: ReportPaths,
    pub universe_size: usize,
}

/// Run a full scan: resolve the universe, load bars with the configured
/// fallback policy, analyze in parallel, write report artifacts.
pub fn run_scan(
    config: &ScanConfig,
    cache: &CsvCache,
    provider: Option<&dyn BarProvider>,
    progress: Option<&dyn LoadProgress>,
    as_of: NaiveDate,
    offline: bool,
    synthetic: bool,
) -> Result<ScanSummary, RunError> {
    config.validate()?;
    let universe = config.resolve_universe()?;

    let opts = LoadOptions {
        bars: config
            .depths
            .daily
            .max(config.depths.weekly)
            .max(config.depths.monthly),
        as_of,
        offline,
        synthetic,
        force: false,
    };

    let (loaded, failures) = load_universe(&universe, cache, provider, progress, &opts);
    let outcome = scan_universe(&loaded, failures, config);
    let reports = write_reports(&outcome, as_of, &config.output_dir)?;

    Ok(ScanSummary {
        outcome,
        reports,
        universe_size: universe.len(),
    })
}
