//! Chart rendering port trait.
//!
//! The outbound collaborator contract: a renderer consumes the chart
//! specification and produces an artifact. The core knows nothing about
//! pixels, colors, or interactivity.

use crate::domain::chart::ChartSpec;
use crate::domain::error::ChartsmithError;

pub trait RenderPort {
    fn render(&self, spec: &ChartSpec) -> Result<String, ChartsmithError>;

    /// File extension for artifacts this renderer produces, without the dot.
    fn file_extension(&self) -> &'static str;
}
