//! Selection names exposed to the UI/config layer.
//!
//! These strings are the exact identifiers the caller selects overlays by;
//! anything else is rejected at assembly time rather than silently dropped.

use crate::domain::engine::{LONG_PERIOD, SHORT_PERIOD};
use crate::domain::indicator::bollinger::{DEFAULT_PERIOD, DEFAULT_STDDEV_MULT_X100};
use crate::domain::indicator::IndicatorType;

pub const SELECTION_NAMES: [&str; 7] = [
    "20-Day SMA",
    "50-Day SMA",
    "20-Day EMA",
    "50-Day EMA",
    "Implied Volatility",
    "Bollinger Bands",
    "VWAP",
];

/// Map a selection name to the price-panel indicator it draws.
pub fn overlay_indicator(name: &str) -> Option<IndicatorType> {
    match name {
        "20-Day SMA" => Some(IndicatorType::Sma(SHORT_PERIOD)),
        "50-Day SMA" => Some(IndicatorType::Sma(LONG_PERIOD)),
        "20-Day EMA" => Some(IndicatorType::Ema(SHORT_PERIOD)),
        "50-Day EMA" => Some(IndicatorType::Ema(LONG_PERIOD)),
        "Bollinger Bands" => Some(IndicatorType::Bollinger {
            period: DEFAULT_PERIOD,
            stddev_mult_x100: DEFAULT_STDDEV_MULT_X100,
        }),
        "VWAP" => Some(IndicatorType::Vwap),
        "Implied Volatility" => Some(IndicatorType::ImpliedVolatility),
        _ => None,
    }
}

/// Split a comma-separated selection list as found in config files or CLI
/// arguments. Whitespace around names is ignored; empty entries dropped.
pub fn parse_selection_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
