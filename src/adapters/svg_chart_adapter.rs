//! SVG chart writer.
//!
//! A minimal static rendering of the chart specification: candlesticks plus
//! overlay polylines on the price panel, oscillator panels stacked below.
//! Meant for report embedding, not interactivity.

use crate::domain::chart::{
    ChartSpec, OscillatorPanel, OscillatorStyle, OverlayKind, PricePanel, TracePoint,
};
use crate::domain::error::ChartsmithError;
use crate::ports::render_port::RenderPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Write;

const WIDTH: f64 = 800.0;
const PRICE_HEIGHT: f64 = 320.0;
const PANEL_HEIGHT: f64 = 160.0;
const PADDING: f64 = 40.0;

const LINE_COLORS: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd", "#17becf"];

pub struct SvgChartAdapter;

impl RenderPort for SvgChartAdapter {
    fn render(&self, spec: &ChartSpec) -> Result<String, ChartsmithError> {
        if spec.price_panel.candles.is_empty() {
            return Err(ChartsmithError::Render {
                reason: "no candles to render".to_string(),
            });
        }

        let height = PRICE_HEIGHT + spec.oscillator_panels.len() as f64 * PANEL_HEIGHT;
        let x_index: HashMap<NaiveDate, usize> = spec
            .price_panel
            .candles
            .iter()
            .enumerate()
            .map(|(i, c)| (c.date, i))
            .collect();
        let x_scale = XScale::new(spec.price_panel.candles.len());

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            WIDTH, height, WIDTH, height
        );
        let _ = write!(
            svg,
            r#"<rect width="{:.0}" height="{:.0}" fill="white"/>"#,
            WIDTH, height
        );

        price_panel_svg(&mut svg, &spec.price_panel, &x_scale, &x_index);

        let mut offset = PRICE_HEIGHT;
        for panel in &spec.oscillator_panels {
            oscillator_panel_svg(&mut svg, panel, &x_scale, &x_index, offset);
            offset += PANEL_HEIGHT;
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    fn file_extension(&self) -> &'static str {
        "svg"
    }
}

struct XScale {
    step: f64,
}

impl XScale {
    fn new(count: usize) -> Self {
        let plot_width = WIDTH - 2.0 * PADDING;
        let step = if count > 1 {
            plot_width / (count - 1) as f64
        } else {
            0.0
        };
        Self { step }
    }

    fn x(&self, index: usize) -> f64 {
        PADDING + index as f64 * self.step
    }
}

struct YScale {
    top: f64,
    plot_height: f64,
    min: f64,
    range: f64,
}

impl YScale {
    fn new(top: f64, panel_height: f64, min: f64, max: f64) -> Self {
        let range = max - min;
        Self {
            top,
            plot_height: panel_height - 2.0 * PADDING,
            min,
            range: if range > 0.0 { range } else { 1.0 },
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + PADDING + self.plot_height * (1.0 - (value - self.min) / self.range)
    }
}

fn price_panel_svg(
    svg: &mut String,
    panel: &PricePanel,
    x_scale: &XScale,
    x_index: &HashMap<NaiveDate, usize>,
) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for candle in &panel.candles {
        min = min.min(candle.low);
        max = max.max(candle.high);
    }
    for overlay in &panel.overlays {
        for point in &overlay.points {
            min = min.min(point.value);
            max = max.max(point.value);
        }
    }
    let y_scale = YScale::new(0.0, PRICE_HEIGHT, min, max);

    for (i, candle) in panel.candles.iter().enumerate() {
        let x = x_scale.x(i);
        let color = if candle.close >= candle.open {
            "#2ca02c"
        } else {
            "#d62728"
        };
        let body_top = y_scale.y(candle.open.max(candle.close));
        let body_bottom = y_scale.y(candle.open.min(candle.close));
        let _ = write!(
            svg,
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{color}" stroke-width="1"/>"#,
            y_scale.y(candle.high),
            y_scale.y(candle.low),
        );
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="3" height="{:.1}" fill="{color}"/>"#,
            x - 1.5,
            body_top,
            (body_bottom - body_top).max(0.5),
        );
    }

    for (i, overlay) in panel.overlays.iter().enumerate() {
        let color = match overlay.kind {
            OverlayKind::BandUpper | OverlayKind::BandMiddle | OverlayKind::BandLower => "#7f7f7f",
            OverlayKind::Line => LINE_COLORS[i % LINE_COLORS.len()],
        };
        polyline(svg, &overlay.points, x_scale, &y_scale, x_index, color);
    }
}

fn oscillator_panel_svg(
    svg: &mut String,
    panel: &OscillatorPanel,
    x_scale: &XScale,
    x_index: &HashMap<NaiveDate, usize>,
    top: f64,
) {
    let values = panel
        .traces
        .iter()
        .flat_map(|t| t.points.iter().map(|p| p.value));
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return;
    }
    // Histograms need the zero line inside the scale.
    let min = min.min(0.0);
    let max = max.max(0.0);
    let y_scale = YScale::new(top, PANEL_HEIGHT, min, max);

    let _ = write!(
        svg,
        r##"<text x="{:.1}" y="{:.1}" font-size="12" fill="#333">{}</text>"##,
        PADDING,
        top + PADDING - 8.0,
        panel.name,
    );

    for (i, trace) in panel.traces.iter().enumerate() {
        match trace.style {
            OscillatorStyle::Line => {
                let color = LINE_COLORS[i % LINE_COLORS.len()];
                polyline(svg, &trace.points, x_scale, &y_scale, x_index, color);
            }
            OscillatorStyle::Histogram => {
                let zero = y_scale.y(0.0);
                for point in &trace.points {
                    let Some(&idx) = x_index.get(&point.date) else {
                        continue;
                    };
                    let y = y_scale.y(point.value);
                    let _ = write!(
                        svg,
                        r##"<rect x="{:.1}" y="{:.1}" width="2" height="{:.1}" fill="#8c564b"/>"##,
                        x_scale.x(idx) - 1.0,
                        y.min(zero),
                        (y - zero).abs().max(0.5),
                    );
                }
            }
        }
    }
}

fn polyline(
    svg: &mut String,
    points: &[TracePoint],
    x_scale: &XScale,
    y_scale: &YScale,
    x_index: &HashMap<NaiveDate, usize>,
    color: &str,
) {
    if points.is_empty() {
        return;
    }
    let coords: Vec<String> = points
        .iter()
        .filter_map(|p| {
            x_index
                .get(&p.date)
                .map(|&idx| format!("{:.1},{:.1}", x_scale.x(idx), y_scale.y(p.value)))
        })
        .collect();
    let _ = write!(
        svg,
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
        coords.join(" "),
        color,
    );
}
