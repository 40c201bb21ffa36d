//! Surface trait for pluggable chart drawing.
//!
//! A surface owns whatever the chart is drawn into (an SVG string, a canvas
//! element) and knows nothing about scales: it receives a finished
//! [`ChartLayout`] and paints it.

use crate::error::Result;
use crate::layout::ChartLayout;
use crate::types::RenderKey;

/// Everything a surface needs for one frame.
pub struct ChartParams<'a> {
    pub layout: &'a ChartLayout,
    /// Index of the hovered point, drawn with the active radius
    pub active: Option<usize>,
    /// Rendering context the surface was created for
    pub key: RenderKey,
}

/// Trait for chart surfaces
///
/// Implementations handle the actual drawing operations for different
/// output technologies (SVG markup, Canvas 2D).
pub trait ChartSurface {
    /// Initialize the surface
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Resize the drawing buffer to the container's CSS size
    fn resize(&mut self, width: f64, height: f64, dpr: f64);

    /// Clear and draw a full frame
    fn draw(&mut self, params: &ChartParams) -> Result<()>;

    /// Current CSS width
    fn width(&self) -> f64;

    /// Current CSS height
    fn height(&self) -> f64;
}
