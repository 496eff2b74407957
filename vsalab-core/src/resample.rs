//! Calendar-quarter resampling for trend context.
//!
//! Aggregates any lower-timeframe series into quarterly bars: open from the
//! first bar of the quarter, high/low from the extremes, close from the
//! last bar, volume summed, dated at the quarter's last bar.

use crate::domain::{Bar, BarSeries, SeriesError, Timeframe};
use chrono::Datelike;

fn quarter_key(bar: &Bar) -> (i32, u32) {
    (bar.date.year(), (bar.date.month() - 1) / 3)
}

/// Resample a series into calendar quarters.
///
/// The input is already validated and ordered, so quarters come out in
/// order and the result revalidates cleanly.
pub fn resample_quarterly(series: &BarSeries) -> Result<BarSeries, SeriesError> {
    let mut quarters: Vec<Bar> = Vec::new();

    for bar in series.bars() {
        match quarters.last_mut() {
            Some(current) if quarter_key(current) == quarter_key(bar) => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.date = bar.date;
                current.volume += bar.volume;
            }
            _ => quarters.push(bar.clone()),
        }
    }

    BarSeries::new(series.symbol(), Timeframe::Quarterly, quarters)
}
