//! Chart assembly: from bars plus computed indicators to a declarative,
//! renderer-agnostic chart specification.
//!
//! Panel ordering is part of the contract: price panel first, then RSI if
//! toggled, then MACD if toggled. Overlay traces draw in a fixed order
//! (bands, then moving averages, then VWAP, then implied volatility) so the
//! band region renders underneath the line overlays regardless of how the
//! caller ordered its selection.

use crate::domain::engine::{IndicatorSet, RSI_PERIOD};
use crate::domain::error::ChartsmithError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::selection::overlay_indicator;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub symbol: String,
    pub price_panel: PricePanel,
    pub oscillator_panels: Vec<OscillatorPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePanel {
    pub candles: Vec<Candle>,
    pub overlays: Vec<OverlayTrace>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayTrace {
    pub label: String,
    pub kind: OverlayKind,
    pub points: Vec<TracePoint>,
}

/// Band traces belong to one logical overlay; renderers may shade the
/// region between `BandUpper` and `BandLower`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    BandUpper,
    BandMiddle,
    BandLower,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OscillatorPanel {
    pub name: String,
    pub traces: Vec<OscillatorTrace>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OscillatorTrace {
    pub label: String,
    pub style: OscillatorStyle,
    pub points: Vec<TracePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OscillatorStyle {
    Line,
    Histogram,
}

/// Fixed draw order for price-panel overlays.
const OVERLAY_ORDER: [&str; 7] = [
    "Bollinger Bands",
    "20-Day SMA",
    "50-Day SMA",
    "20-Day EMA",
    "50-Day EMA",
    "VWAP",
    "Implied Volatility",
];

/// Build the chart specification for one request.
///
/// Fails with [`ChartsmithError::UnknownIndicator`] if any selected name is
/// unrecognized or absent from `indicators`; a partially correct chart is
/// never produced.
pub fn assemble(
    bars: &[OhlcvBar],
    indicators: &IndicatorSet,
    selected: &[String],
    show_rsi: bool,
    show_macd: bool,
) -> Result<ChartSpec, ChartsmithError> {
    for name in selected {
        let indicator_type =
            overlay_indicator(name).ok_or_else(|| ChartsmithError::UnknownIndicator {
                name: name.clone(),
            })?;
        if !indicators.contains(&indicator_type) {
            return Err(ChartsmithError::UnknownIndicator { name: name.clone() });
        }
    }

    let mut overlays = Vec::new();
    for name in OVERLAY_ORDER {
        if !selected.iter().any(|s| s == name) {
            continue;
        }
        // Checked above, so both lookups succeed.
        let Some(series) = overlay_indicator(name).and_then(|t| indicators.get(&t)) else {
            continue;
        };
        push_overlay_traces(&mut overlays, name, series);
    }

    let symbol = bars.first().map(|b| b.symbol.clone()).unwrap_or_default();
    let candles = bars
        .iter()
        .map(|b| Candle {
            date: b.date,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: b.volume,
        })
        .collect();

    let mut oscillator_panels = Vec::new();
    if show_rsi {
        oscillator_panels.push(rsi_panel(indicators));
    }
    if show_macd {
        oscillator_panels.push(macd_panel(indicators));
    }

    Ok(ChartSpec {
        symbol,
        price_panel: PricePanel { candles, overlays },
        oscillator_panels,
    })
}

fn push_overlay_traces(overlays: &mut Vec<OverlayTrace>, name: &str, series: &IndicatorSeries) {
    if matches!(series.indicator_type, IndicatorType::Bollinger { .. }) {
        let band = |pick: fn(f64, f64, f64) -> f64| -> Vec<TracePoint> {
            series
                .values
                .iter()
                .filter_map(|p| match p.value {
                    Some(IndicatorValue::Bollinger {
                        upper,
                        middle,
                        lower,
                    }) => Some(TracePoint {
                        date: p.date,
                        value: pick(upper, middle, lower),
                    }),
                    _ => None,
                })
                .collect()
        };
        overlays.push(OverlayTrace {
            label: "BB Upper".into(),
            kind: OverlayKind::BandUpper,
            points: band(|u, _, _| u),
        });
        overlays.push(OverlayTrace {
            label: "BB Middle".into(),
            kind: OverlayKind::BandMiddle,
            points: band(|_, m, _| m),
        });
        overlays.push(OverlayTrace {
            label: "BB Lower".into(),
            kind: OverlayKind::BandLower,
            points: band(|_, _, l| l),
        });
    } else {
        overlays.push(OverlayTrace {
            label: name.to_string(),
            kind: OverlayKind::Line,
            points: series
                .simple_points()
                .map(|(date, value)| TracePoint { date, value })
                .collect(),
        });
    }
}

fn rsi_panel(indicators: &IndicatorSet) -> OscillatorPanel {
    let points = indicators
        .get(&IndicatorType::Rsi(RSI_PERIOD))
        .map(|series| {
            series
                .simple_points()
                .map(|(date, value)| TracePoint { date, value })
                .collect()
        })
        .unwrap_or_default();

    OscillatorPanel {
        name: "RSI".into(),
        traces: vec![OscillatorTrace {
            label: "RSI(14)".into(),
            style: OscillatorStyle::Line,
            points,
        }],
    }
}

fn macd_panel(indicators: &IndicatorSet) -> OscillatorPanel {
    let macd_type = IndicatorType::Macd {
        fast: DEFAULT_FAST,
        slow: DEFAULT_SLOW,
        signal: DEFAULT_SIGNAL,
    };

    let component = |pick: fn(f64, f64, f64) -> f64| -> Vec<TracePoint> {
        indicators
            .get(&macd_type)
            .map(|series| {
                series
                    .values
                    .iter()
                    .filter_map(|p| match p.value {
                        Some(IndicatorValue::Macd {
                            line,
                            signal,
                            histogram,
                        }) => Some(TracePoint {
                            date: p.date,
                            value: pick(line, signal, histogram),
                        }),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    OscillatorPanel {
        name: "MACD".into(),
        traces: vec![
            OscillatorTrace {
                label: "MACD".into(),
                style: OscillatorStyle::Line,
                points: component(|l, _, _| l),
            },
            OscillatorTrace {
                label: "Signal".into(),
                style: OscillatorStyle::Line,
                points: component(|_, s, _| s),
            },
            OscillatorTrace {
                label: "Histogram".into(),
                style: OscillatorStyle::Histogram,
                points: component(|_, _, h| h),
            },
        ],
    }
}
