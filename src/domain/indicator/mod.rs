//! Technical indicator types and implementations.
//!
//! Each indicator series is aligned index-for-index with its source bars.
//! Warm-up positions and numeric edge cases hold `None`, never a zero fill.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod bollinger;
pub mod vwap;
pub mod macd;

use chrono::NaiveDate;
use std::fmt;

/// One position of an indicator series. `value` is `None` until the
/// indicator has enough history to be defined at this bar.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<IndicatorValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

/// Indicator identity plus parameters; serves as the `IndicatorSet` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Vwap,
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    ImpliedVolatility,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Simple values at defined positions, as (date, value) pairs.
    pub fn simple_points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().filter_map(|p| match p.value {
            Some(IndicatorValue::Simple(v)) => Some((p.date, v)),
            _ => None,
        })
    }

    pub fn undefined_count(&self) -> usize {
        self.values.iter().filter(|p| p.value.is_none()).count()
    }
}

/// Externally supplied implied volatility. The engine never derives this
/// from OHLCV data; it is carried through for plotting only.
#[derive(Debug, Clone, PartialEq)]
pub enum ImpliedVolatility {
    Scalar(f64),
    Series(Vec<f64>),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Vwap => write!(f, "VWAP"),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::ImpliedVolatility => write!(f, "IV"),
        }
    }
}
