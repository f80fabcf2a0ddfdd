//! JSON chart writer.
//!
//! Serializes the chart specification for downstream consumers (plotting
//! front ends, the AI-analysis hand-off, report tooling).

use crate::domain::chart::ChartSpec;
use crate::domain::error::ChartsmithError;
use crate::ports::render_port::RenderPort;

pub struct JsonChartAdapter;

impl RenderPort for JsonChartAdapter {
    fn render(&self, spec: &ChartSpec) -> Result<String, ChartsmithError> {
        serde_json::to_string_pretty(spec).map_err(|e| ChartsmithError::Render {
            reason: format!("JSON serialization failed: {}", e),
        })
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
