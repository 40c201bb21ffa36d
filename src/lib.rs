//! qiposter - a printable quality-improvement poster for the web
//!
//! Renders a static A3 landscape poster with one interactive chart, via
//! WebAssembly and Canvas 2D:
//! - Poster content, stylesheet and print rules as typed Rust
//! - Monotone-curve uptake chart with hover tooltips
//! - Chart re-layout that follows the browser's print lifecycle
//! - PNG export of the poster subtree, and print / save as PDF
//! - Static HTML output (SVG chart) for native use
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { PosterView } from 'qiposter';
//! await init();
//! const view = new PosterView(document.getElementById('app'), { export: { fileName: 'poster.png' } });
//! await view.exportImage();
//! view.destroy();
//! ```

pub mod chart;
pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod export;
pub mod layout;
pub mod logo;
pub mod page_setup;
pub mod render;
pub mod style;
pub mod sync;
pub mod telemetry;
pub mod types;

// Browser entry point (Canvas 2D)
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main viewer struct
#[cfg(target_arch = "wasm32")]
pub use viewer::PosterView;

pub use error::{PosterError, Result};
pub use types::*;

/// Render the complete standalone poster document.
///
/// `print` selects the print context (print-sized chart, print render key).
///
/// # Errors
/// Returns an error if the default options fail validation.
#[wasm_bindgen]
pub fn poster_html(print: bool) -> std::result::Result<String, JsValue> {
    document::render_static_document(
        &config::PosterOptions::default(),
        ViewContext::from_print_mode(print),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the chart geometry for a container and return it as a `JsValue`.
///
/// # Errors
/// Returns an error if the layout cannot be serialized.
#[wasm_bindgen]
pub fn chart_layout(width: f64, height: f64) -> std::result::Result<JsValue, JsValue> {
    let layout = document::chart_layout(width, height);
    serde_wasm_bindgen::to_value(&layout)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
