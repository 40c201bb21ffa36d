//! Canvas 2D chart surface.
//!
//! The interactive view draws the chart through the HTML Canvas 2D API via
//! web-sys; the static document uses the SVG surface instead.

mod charts;
mod renderer;

pub use renderer::CanvasSurface;
