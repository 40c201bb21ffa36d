//! Canvas 2D chart surface.
//!
//! Implements [`ChartSurface`] on an `HtmlCanvasElement`. The drawing buffer
//! is sized in physical pixels and all drawing happens in CSS pixels under a
//! device-pixel-ratio transform.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{PosterError, Result};
use crate::render::backend::{ChartParams, ChartSurface};

pub struct CanvasSurface {
    pub(super) canvas: HtmlCanvasElement,
    pub(super) ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
}

impl CanvasSurface {
    /// Create a surface from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PosterError::dom(&e))?
            .ok_or_else(|| PosterError::Render("No 2d context available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PosterError::Render("Failed to cast to CanvasRenderingContext2d".into()))?;

        Ok(Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }
}

impl ChartSurface for CanvasSurface {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;

        // Buffer in physical pixels, element in CSS pixels
        self.canvas.set_width((width * dpr).round() as u32);
        self.canvas.set_height((height * dpr).round() as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
    }

    fn draw(&mut self, params: &ChartParams) -> Result<()> {
        // Setting the buffer size resets the context, so the transform is
        // re-applied on every frame rather than once in resize().
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(|e| PosterError::Render(crate::error::js_message(&e)))?;
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        if params.layout.is_empty() {
            return Ok(());
        }

        self.ctx.save();
        self.render_grid_and_axes(params.layout);
        self.render_series(params.layout)?;
        self.render_points(params.layout, params.active);
        self.ctx.restore();
        Ok(())
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}
