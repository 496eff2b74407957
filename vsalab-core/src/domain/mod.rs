//! Domain types for VSALab.

pub mod bar;
pub mod series;
pub mod timeframe;

pub use bar::Bar;
pub use series::{BarSeries, SeriesError};
pub use timeframe::Timeframe;

/// Symbol type alias
pub type Symbol = String;
