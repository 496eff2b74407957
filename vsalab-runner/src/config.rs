//! Serializable scan configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vsalab_core::VsaThresholds;

/// Errors from loading or validating a scan configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config has an empty universe (set `tickers` or `ticker_file`)")]
    EmptyUniverse,

    #[error("sma_period must be >= 1, got {0}")]
    BadSmaPeriod(usize),

    #[error("lookback must be >= 1, got {0}")]
    BadLookback(usize),
}

/// How many bars to request per timeframe.
///
/// The defaults are the depths the narrative prompt serializes: 60 daily
/// bars, 25 weekly, 25 monthly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BarDepths {
    pub daily: usize,
    pub weekly: usize,
    pub monthly: usize,
}

impl Default for BarDepths {
    fn default() -> Self {
        Self {
            daily: 60,
            weekly: 25,
            monthly: 25,
        }
    }
}

/// Full configuration for one scan run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Inline ticker universe. Merged with `ticker_file` when both are set.
    pub tickers: Vec<String>,

    /// Optional file with one ticker per line.
    pub ticker_file: Option<PathBuf>,

    /// Trailing window for the volume and spread baselines.
    pub sma_period: usize,

    /// Sequence scan window (bars after the prev-close seed bar).
    pub lookback: usize,

    /// Bars to request per timeframe.
    pub depths: BarDepths,

    /// Report output directory.
    pub output_dir: PathBuf,

    /// Classifier thresholds. Defaults are fixed policy; override only for
    /// sensitivity analysis.
    pub thresholds: VsaThresholds,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tickers: Vec::new(),
            ticker_file: None,
            sma_period: vsalab_core::DEFAULT_SMA_PERIOD,
            lookback: vsalab_core::DEFAULT_LOOKBACK,
            depths: BarDepths::default(),
            output_dir: PathBuf::from("reports"),
            thresholds: VsaThresholds::default(),
        }
    }
}

impl ScanConfig {
    /// Load from a TOML file and validate.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ScanConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate parameter ranges; universe resolution happens later because
    /// `ticker_file` may supply it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sma_period < 1 {
            return Err(ConfigError::BadSmaPeriod(self.sma_period));
        }
        if self.lookback < 1 {
            return Err(ConfigError::BadLookback(self.lookback));
        }
        Ok(())
    }

    /// Resolve the final ticker universe: inline list plus ticker file,
    /// uppercased, deduped, in first-seen order.
    pub fn resolve_universe(&self) -> Result<Vec<String>, ConfigError> {
        let mut seen = std::collections::HashSet::new();
        let mut universe = Vec::new();

        let mut push = |raw: &str| {
            let ticker = raw.trim().to_uppercase();
            if !ticker.is_empty() && seen.insert(ticker.clone()) {
                universe.push(ticker);
            }
        };

        for t in &self.tickers {
            push(t);
        }
        if let Some(path) = &self.ticker_file {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            for line in text.lines() {
                push(line);
            }
        }

        if universe.is_empty() {
            return Err(ConfigError::EmptyUniverse);
        }
        Ok(universe)
    }
}
