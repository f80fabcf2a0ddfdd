//! OHLCV bar representation and series invariants.

use crate::domain::error::ChartsmithError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Check the series invariants every downstream computation relies on:
/// non-empty, strictly increasing dates, `low <= open,close <= high`,
/// non-negative volume. Returns the first violation found.
pub fn validate_bars(bars: &[OhlcvBar]) -> Result<(), ChartsmithError> {
    if bars.is_empty() {
        return Err(ChartsmithError::EmptySeries);
    }

    for (i, bar) in bars.iter().enumerate() {
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(ChartsmithError::NonMonotonicTimestamps {
                index: i,
                prev: bars[i - 1].date,
                date: bar.date,
            });
        }
        if bar.volume < 0 {
            return Err(ChartsmithError::NegativeVolume {
                index: i,
                date: bar.date,
                volume: bar.volume,
            });
        }
        let bounded = bar.low <= bar.high
            && bar.low <= bar.open
            && bar.open <= bar.high
            && bar.low <= bar.close
            && bar.close <= bar.high;
        if !bounded {
            return Err(ChartsmithError::PriceBounds {
                index: i,
                date: bar.date,
            });
        }
    }

    Ok(())
}
