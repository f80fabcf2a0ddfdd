//! Volume-Weighted Average Price.
//!
//! Cumulative Σ(typical_price × volume) / Σ(volume) from the start of the
//! series; a position stays undefined while the cumulative volume is zero.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_vwap(bars: &[OhlcvBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut pv_sum = 0.0;
    let mut volume_sum: i64 = 0;

    for bar in bars {
        pv_sum += bar.typical_price() * bar.volume as f64;
        volume_sum += bar.volume;

        let value = if volume_sum > 0 {
            Some(IndicatorValue::Simple(pv_sum / volume_sum as f64))
        } else {
            None
        };
        values.push(IndicatorPoint {
            date: bar.date,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Vwap,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bar(day: u32, high: f64, low: f64, close: f64, volume: i64) -> OhlcvBar {
        OhlcvBar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high,
            low,
            close,
            volume,
        }
    }

    fn simple(point: &IndicatorPoint) -> f64 {
        match point.value {
            Some(IndicatorValue::Simple(v)) => v,
            _ => panic!("expected defined simple value"),
        }
    }

    #[test]
    fn vwap_first_bar_is_typical_price() {
        let bars = vec![make_bar(1, 110.0, 90.0, 100.0, 500)];
        let series = calculate_vwap(&bars);

        let expected = (110.0 + 90.0 + 100.0) / 3.0;
        assert!((simple(&series.values[0]) - expected).abs() < 1e-10);
    }

    #[test]
    fn vwap_weights_by_volume() {
        let bars = vec![
            make_bar(1, 100.0, 100.0, 100.0, 100),
            make_bar(2, 200.0, 200.0, 200.0, 300),
        ];
        let series = calculate_vwap(&bars);

        // (100*100 + 200*300) / 400 = 175
        assert!((simple(&series.values[1]) - 175.0).abs() < 1e-10);
    }

    #[test]
    fn vwap_zero_volume_prefix_undefined() {
        let bars = vec![
            make_bar(1, 100.0, 100.0, 100.0, 0),
            make_bar(2, 100.0, 100.0, 100.0, 0),
            make_bar(3, 120.0, 120.0, 120.0, 500),
        ];
        let series = calculate_vwap(&bars);

        assert!(series.values[0].value.is_none());
        assert!(series.values[1].value.is_none());
        assert!((simple(&series.values[2]) - 120.0).abs() < 1e-10);
    }

    #[test]
    fn vwap_all_zero_volume_all_undefined() {
        let bars = vec![
            make_bar(1, 100.0, 100.0, 100.0, 0),
            make_bar(2, 110.0, 110.0, 110.0, 0),
        ];
        let series = calculate_vwap(&bars);
        assert!(series.values.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn vwap_zero_volume_bar_keeps_previous_average() {
        let bars = vec![
            make_bar(1, 100.0, 100.0, 100.0, 500),
            make_bar(2, 300.0, 300.0, 300.0, 0),
        ];
        let series = calculate_vwap(&bars);

        // The zero-volume bar contributes nothing to either sum.
        assert!((simple(&series.values[1]) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn vwap_length_matches_input() {
        let bars: Vec<OhlcvBar> = (1..=10)
            .map(|i| make_bar(i, 100.0, 90.0, 95.0, 1000))
            .collect();
        let series = calculate_vwap(&bars);
        assert_eq!(series.values.len(), 10);
        assert_eq!(series.indicator_type, IndicatorType::Vwap);
    }
}
