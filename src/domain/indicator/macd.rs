//! Moving Average Convergence Divergence.
//!
//! Line = EMA(fast) − EMA(slow) of close; signal = EMA(signal_period) of the
//! line, seeded with the simple mean of its first signal_period defined
//! values; histogram = line − signal. A point is defined only once all three
//! components are, i.e. from index max(fast, slow) − 1 + signal_period − 1.

use crate::domain::indicator::ema::ema_points;
use crate::domain::indicator::{
    IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };

    if fast == 0 || slow == 0 || signal_period == 0 {
        let values = bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date,
                value: None,
            })
            .collect();
        return IndicatorSeries {
            indicator_type,
            values,
        };
    }

    let fast_ema = ema_points(bars, fast);
    let slow_ema = ema_points(bars, slow);

    let line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| match (f.value, s.value) {
            (Some(IndicatorValue::Simple(f)), Some(IndicatorValue::Simple(s))) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal_line = signal_of(&line, signal_period);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = match (line[i], signal_line[i]) {
                (Some(line), Some(signal)) => Some(IndicatorValue::Macd {
                    line,
                    signal,
                    histogram: line - signal,
                }),
                _ => None,
            };
            IndicatorPoint {
                date: bar.date,
                value,
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

pub fn calculate_macd_default(bars: &[OhlcvBar]) -> IndicatorSeries {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

/// EMA over the defined suffix of the MACD line, SMA-seeded like the
/// close-price EMA.
fn signal_of(line: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = vec![None; line.len()];

    let Some(start) = line.iter().position(|v| v.is_some()) else {
        return out;
    };

    let mut seen = 0;
    let mut seed_sum = 0.0;
    let mut ema = 0.0;

    for i in start..line.len() {
        // The line is contiguous once defined, so this never skips mid-run.
        let Some(value) = line[i] else { continue };
        seen += 1;
        if seen < period {
            seed_sum += value;
        } else if seen == period {
            seed_sum += value;
            ema = seed_sum / period as f64;
            out[i] = Some(ema);
        } else {
            ema = value * k + ema * (1.0 - k);
            out[i] = Some(ema);
        }
    }

    out
}
