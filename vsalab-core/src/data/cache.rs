//! CSV bar cache — one file per (symbol, timeframe).
//!
//! Layout: `<dir>/<SYMBOL>_<timeframe>.csv` with a header row, serde-driven
//! through the csv crate. The cache stores raw provider bars; validation
//! happens at ingest, not here.

use super::provider::{DataError, RawBar};
use crate::domain::Timeframe;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvCache {
    dir: PathBuf,
}

impl CsvCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        self.dir.join(format!("{symbol}_{timeframe}.csv"))
    }

    /// True when a cached file exists for this (symbol, timeframe).
    pub fn contains(&self, symbol: &str, timeframe: Timeframe) -> bool {
        self.path_for(symbol, timeframe).exists()
    }

    /// Load cached bars, or `NoCachedData` when the file is absent.
    pub fn load(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<RawBar>, DataError> {
        let path = self.path_for(symbol, timeframe);
        if !path.exists() {
            return Err(DataError::NoCachedData {
                symbol: symbol.to_string(),
                timeframe,
            });
        }
        let mut reader = csv::Reader::from_path(&path)
            .map_err(|e| DataError::CacheError(format!("{}: {e}", path.display())))?;
        let mut bars = Vec::new();
        for record in reader.deserialize() {
            let bar: RawBar =
                record.map_err(|e| DataError::CacheError(format!("{}: {e}", path.display())))?;
            bars.push(bar);
        }
        Ok(bars)
    }

    /// Write bars for a (symbol, timeframe), creating the cache dir if needed.
    pub fn write(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        bars: &[RawBar],
    ) -> Result<(), DataError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DataError::CacheError(format!("{}: {e}", self.dir.display())))?;
        let path = self.path_for(symbol, timeframe);
        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| DataError::CacheError(format!("{}: {e}", path.display())))?;
        for bar in bars {
            writer
                .serialize(bar)
                .map_err(|e| DataError::CacheError(format!("{}: {e}", path.display())))?;
        }
        writer
            .flush()
            .map_err(|e| DataError::CacheError(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    /// Every (symbol, timeframe, bar count) currently cached, sorted by file name.
    pub fn status(&self) -> Result<Vec<CacheEntry>, DataError> {
        let mut entries = Vec::new();
        if !self.dir.exists() {
            return Ok(entries);
        }
        let mut names: Vec<PathBuf> = fs::read_dir(&self.dir)
            .map_err(|e| DataError::CacheError(format!("{}: {e}", self.dir.display())))?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
            .collect();
        names.sort();

        for path in names {
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(s) => s,
                None => continue,
            };
            let (symbol, timeframe) = match stem.rsplit_once('_') {
                Some((sym, "daily")) => (sym, Timeframe::Daily),
                Some((sym, "weekly")) => (sym, Timeframe::Weekly),
                Some((sym, "monthly")) => (sym, Timeframe::Monthly),
                Some((sym, "quarterly")) => (sym, Timeframe::Quarterly),
                _ => continue,
            };
            let bars = self.load(symbol, timeframe)?;
            entries.push(CacheEntry {
                symbol: symbol.to_string(),
                timeframe,
                bars: bars.len(),
                first: bars.first().map(|b| b.date),
                last: bars.last().map(|b| b.date),
            });
        }
        Ok(entries)
    }
}

/// One cached file's summary, for `cache status` style listings.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub bars: usize,
    pub first: Option<chrono::NaiveDate>,
    pub last: Option<chrono::NaiveDate>,
}
