//! Indicator engine: validate the OHLCV series, then eagerly compute every
//! supported indicator into an immutable [`IndicatorSet`].
//!
//! Selection and display filtering happen downstream in the chart assembler;
//! the engine is total over its input and keeps no state between calls.

use crate::domain::error::ChartsmithError;
use crate::domain::indicator::bollinger::calculate_bollinger_default;
use crate::domain::indicator::ema::calculate_ema;
use crate::domain::indicator::macd::calculate_macd_default;
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::vwap::calculate_vwap;
use crate::domain::indicator::{
    ImpliedVolatility, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::{validate_bars, OhlcvBar};
use std::collections::HashMap;

pub const SHORT_PERIOD: usize = 20;
pub const LONG_PERIOD: usize = 50;
pub const RSI_PERIOD: usize = 14;

/// Output of one engine run: indicator identity → aligned series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    series: HashMap<IndicatorType, IndicatorSeries>,
}

impl IndicatorSet {
    pub fn get(&self, indicator_type: &IndicatorType) -> Option<&IndicatorSeries> {
        self.series.get(indicator_type)
    }

    pub fn contains(&self, indicator_type: &IndicatorType) -> bool {
        self.series.contains_key(indicator_type)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &IndicatorType> {
        self.series.keys()
    }
}

/// Compute all supported indicators over a validated series.
pub fn compute(bars: &[OhlcvBar]) -> Result<IndicatorSet, ChartsmithError> {
    compute_with_volatility(bars, None)
}

/// [`compute`], plus an externally supplied implied-volatility pass-through.
/// The engine never derives volatility itself; when absent the set simply
/// has no `ImpliedVolatility` entry.
pub fn compute_with_volatility(
    bars: &[OhlcvBar],
    implied_vol: Option<&ImpliedVolatility>,
) -> Result<IndicatorSet, ChartsmithError> {
    validate_bars(bars)?;

    let mut series = HashMap::new();
    for computed in [
        calculate_sma(bars, SHORT_PERIOD),
        calculate_sma(bars, LONG_PERIOD),
        calculate_ema(bars, SHORT_PERIOD),
        calculate_ema(bars, LONG_PERIOD),
        calculate_bollinger_default(bars),
        calculate_vwap(bars),
        calculate_rsi(bars, RSI_PERIOD),
        calculate_macd_default(bars),
    ] {
        series.insert(computed.indicator_type.clone(), computed);
    }

    if let Some(vol) = implied_vol {
        let aligned = align_volatility(bars, vol);
        series.insert(IndicatorType::ImpliedVolatility, aligned);
    }

    Ok(IndicatorSet { series })
}

/// Broadcast a scalar across every bar, or align a series index-for-index
/// from the first bar, undefined past its end.
fn align_volatility(bars: &[OhlcvBar], vol: &ImpliedVolatility) -> IndicatorSeries {
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = match vol {
                ImpliedVolatility::Scalar(v) => Some(IndicatorValue::Simple(*v)),
                ImpliedVolatility::Series(vs) => {
                    vs.get(i).map(|&v| IndicatorValue::Simple(v))
                }
            };
            IndicatorPoint {
                date: bar.date,
                value,
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::ImpliedVolatility,
        values,
    }
}
