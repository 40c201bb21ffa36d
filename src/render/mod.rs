//! Rendering: chart surfaces, the HTML writer and the colour palette.
//!
//! This module provides:
//! - The surface trait shared by every chart output
//! - SVG surface (all targets, static document)
//! - Canvas 2D surface (`wasm32`, interactive view)
//! - HTML document writer

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod html;
pub mod svg;

// Re-export commonly used types
pub use backend::{ChartParams, ChartSurface};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use colors::{palette, Rgb};
pub use html::{render_document, render_fragment, DocumentParts};
pub use svg::SvgSurface;
