//! Data boundary: provider trait, CSV cache, ingest validation.

pub mod cache;
pub mod ingest;
pub mod provider;

pub use cache::{CacheEntry, CsvCache};
pub use ingest::ingest;
pub use provider::{
    BarProvider, DataError, DataSource, FetchResult, LoadProgress, RawBar, StdoutProgress,
};
