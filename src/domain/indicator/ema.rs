//! Exponential Moving Average of close prices.
//!
//! k = 2/(period+1). The first defined value at index (period-1) is the
//! SMA of the first `period` closes; later values use
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k).

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values: ema_points(bars, period),
    }
}

/// EMA positions for the close price, shared with the MACD computation.
pub(crate) fn ema_points(bars: &[OhlcvBar], period: usize) -> Vec<IndicatorPoint> {
    let mut values = Vec::with_capacity(bars.len());
    if period == 0 {
        for bar in bars {
            values.push(IndicatorPoint {
                date: bar.date,
                value: None,
            });
        }
        return values;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut seed_sum = 0.0;
    let mut ema = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        let value = if i < period - 1 {
            seed_sum += bar.close;
            None
        } else if i == period - 1 {
            seed_sum += bar.close;
            ema = seed_sum / period as f64;
            Some(IndicatorValue::Simple(ema))
        } else {
            ema = bar.close * k + ema * (1.0 - k);
            Some(IndicatorValue::Simple(ema))
        };
        values.push(IndicatorPoint {
            date: bar.date,
            value,
        });
    }

    values
}
