//! Chart drawing routines for the Canvas 2D surface.

use wasm_bindgen::JsValue;

use crate::error::{PosterError, Result};
use crate::layout::{ChartLayout, PathCommand};
use crate::render::colors::palette;

use super::renderer::CanvasSurface;

const TICK_FONT: &str = "500 12px Inter, system-ui, Segoe UI, Roboto, Arial, sans-serif";
const LABEL_FONT: &str = "500 11px Inter, system-ui, Segoe UI, Roboto, Arial, sans-serif";
const TITLE_FONT: &str = "600 12px Inter, system-ui, Segoe UI, Roboto, Arial, sans-serif";

impl CanvasSurface {
    /// Trace path commands onto the current path.
    fn trace(&self, commands: &[PathCommand]) {
        self.ctx.begin_path();
        for cmd in commands {
            match *cmd {
                PathCommand::MoveTo { x, y } => self.ctx.move_to(x, y),
                PathCommand::LineTo { x, y } => self.ctx.line_to(x, y),
                PathCommand::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => self.ctx.bezier_curve_to(c1x, c1y, c2x, c2y, x, y),
                PathCommand::Close => self.ctx.close_path(),
            }
        }
    }

    /// Dashed horizontal grid, the two axis lines, tick labels and the
    /// rotated axis title.
    pub(super) fn render_grid_and_axes(&self, layout: &ChartLayout) {
        let plot = layout.plot;

        self.ctx.set_line_width(1.0);
        self.ctx.set_stroke_style_str(palette::LINE);
        let dash = js_sys::Array::of2(&JsValue::from_f64(3.0), &JsValue::from_f64(6.0));
        let _ = self.ctx.set_line_dash(&dash);
        for tick in &layout.y_ticks {
            // Half-pixel offset keeps 1px lines crisp
            let y = tick.position.round() + 0.5;
            self.ctx.begin_path();
            self.ctx.move_to(plot.x, y);
            self.ctx.line_to(plot.right(), y);
            self.ctx.stroke();
        }
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());

        self.ctx.begin_path();
        self.ctx.move_to(plot.x + 0.5, plot.y);
        self.ctx.line_to(plot.x + 0.5, plot.bottom());
        self.ctx.move_to(plot.x, plot.bottom() + 0.5);
        self.ctx.line_to(plot.right(), plot.bottom() + 0.5);
        self.ctx.stroke();

        self.ctx.set_font(TICK_FONT);
        self.ctx.set_fill_style_str(palette::MUTED);
        self.ctx.set_text_align("right");
        self.ctx.set_text_baseline("middle");
        for tick in &layout.y_ticks {
            let _ = self.ctx.fill_text(&tick.label, plot.x - 14.0, tick.position);
        }
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("alphabetic");
        for tick in &layout.x_ticks {
            let _ = self.ctx.fill_text(&tick.label, tick.position, layout.x_tick_y);
        }

        self.ctx.save();
        self.ctx.set_font(TITLE_FONT);
        let _ = self
            .ctx
            .translate(plot.x - 42.0, plot.y + plot.height / 2.0);
        let _ = self.ctx.rotate(-std::f64::consts::FRAC_PI_2);
        let _ = self.ctx.fill_text(&layout.axis_title, 0.0, 0.0);
        self.ctx.restore();
    }

    /// Gradient area under the curve, then the curve itself.
    pub(super) fn render_series(&self, layout: &ChartLayout) -> Result<()> {
        let plot = layout.plot;
        let gradient = self
            .ctx
            .create_linear_gradient(0.0, plot.y, 0.0, plot.bottom());
        gradient
            .add_color_stop(0.0, &palette::ACCENT.to_rgba(0.35))
            .map_err(|e| PosterError::Render(crate::error::js_message(&e)))?;
        gradient
            .add_color_stop(1.0, &palette::ACCENT.to_rgba(0.0))
            .map_err(|e| PosterError::Render(crate::error::js_message(&e)))?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.trace(&layout.area);
        self.ctx.fill();

        self.ctx.set_stroke_style_str(&palette::ACCENT.to_hex());
        self.ctx.set_line_width(3.0);
        self.ctx.set_line_join("round");
        self.ctx.set_line_cap("round");
        self.trace(&layout.line);
        self.ctx.stroke();
        Ok(())
    }

    /// Point markers and value labels.
    pub(super) fn render_points(&self, layout: &ChartLayout, active: Option<usize>) {
        self.ctx.set_line_width(2.0);
        self.ctx.set_stroke_style_str(&palette::ACCENT.to_hex());
        self.ctx.set_fill_style_str(palette::WHITE);
        for p in &layout.points {
            let r = if active == Some(p.index) {
                layout.active_point_radius
            } else {
                layout.point_radius
            };
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(p.x, p.y, r, 0.0, std::f64::consts::TAU);
            self.ctx.fill();
            self.ctx.stroke();
        }

        self.ctx.set_font(LABEL_FONT);
        self.ctx.set_fill_style_str(palette::MUTED);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("alphabetic");
        for p in &layout.points {
            let _ = self.ctx.fill_text(&p.label, p.x, p.label_y);
        }
    }
}
