//! Relative Strength Index with Wilder's smoothing.
//!
//! Seed: simple mean of gains/losses over the first `period` close-to-close
//! deltas. After the seed: avg = (prev_avg * (period-1) + current) / period.
//! RSI = 100 - 100/(1 + avg_gain/avg_loss). Zero average loss with nonzero
//! average gain reports 100; both averages zero leaves the position
//! undefined. The first `period` bars are undefined.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    if period == 0 || bars.len() <= period {
        for bar in bars {
            values.push(IndicatorPoint {
                date: bar.date,
                value: None,
            });
        }
        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(period),
            values,
        };
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            values.push(IndicatorPoint {
                date: bar.date,
                value: None,
            });
            continue;
        }

        let change = bar.close - bars[i - 1].close;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        let value = if i < period {
            // Accumulating toward the seed mean over the first `period` deltas.
            avg_gain += gain;
            avg_loss += loss;
            None
        } else if i == period {
            avg_gain = (avg_gain + gain) / period as f64;
            avg_loss = (avg_loss + loss) / period as f64;
            rsi_value(avg_gain, avg_loss)
        } else {
            avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
            rsi_value(avg_gain, avg_loss)
        };

        values.push(IndicatorPoint {
            date: bar.date,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> Option<IndicatorValue> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            // Perfectly flat window: relative strength is indeterminate.
            None
        } else {
            Some(IndicatorValue::Simple(100.0))
        }
    } else {
        let rs = avg_gain / avg_loss;
        Some(IndicatorValue::Simple(100.0 - 100.0 / (1.0 + rs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                symbol: "TEST".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    fn simple(point: &IndicatorPoint) -> f64 {
        match point.value {
            Some(IndicatorValue::Simple(v)) => v,
            _ => panic!("expected defined simple value"),
        }
    }

    #[test]
    fn rsi_warmup_period() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 5) as f64 * 2.0).collect();
        let bars = make_bars(&closes);
        let series = calculate_rsi(&bars, 14);

        assert_eq!(series.values.len(), 20);
        for i in 0..14 {
            assert!(series.values[i].value.is_none(), "bar {} should be undefined", i);
        }
        assert!(series.values[14].value.is_some());
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let series = calculate_rsi(&bars, 14);

        for point in series.values.iter().skip(14) {
            assert!((simple(point) - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let bars = make_bars(&closes);
        let series = calculate_rsi(&bars, 14);

        for point in series.values.iter().skip(14) {
            assert!(simple(point).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rsi_flat_series_undefined() {
        let closes = vec![100.0; 20];
        let bars = make_bars(&closes);
        let series = calculate_rsi(&bars, 14);

        assert!(series.values.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0)
            .collect();
        let bars = make_bars(&closes);
        let series = calculate_rsi(&bars, 14);

        for point in &series.values {
            if let Some(IndicatorValue::Simple(rsi)) = point.value {
                assert!((0.0..=100.0).contains(&rsi), "RSI {} out of range", rsi);
            }
        }
    }

    #[test]
    fn rsi_wilder_smoothing_step() {
        // One loss after 14 straight gains: the smoothed averages keep
        // 13/14 of their previous weight.
        let mut closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        closes.push(closes[14] - 7.0);
        let bars = make_bars(&closes);
        let series = calculate_rsi(&bars, 14);

        let avg_gain = (1.0 * 13.0) / 14.0;
        let avg_loss = 7.0 / 14.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!((simple(&series.values[15]) - expected).abs() < 1e-10);
    }

    #[test]
    fn rsi_too_short_all_undefined() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        let series = calculate_rsi(&bars, 14);
        assert_eq!(series.values.len(), 3);
        assert!(series.values.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn rsi_indicator_type() {
        let bars = make_bars(&[100.0]);
        let series = calculate_rsi(&bars, 14);
        assert_eq!(series.indicator_type, IndicatorType::Rsi(14));
    }
}
