//! SVG chart surface.
//!
//! Produces a self-contained `<svg>` element for the static document. Each
//! point carries a `<title>` so the tooltip text is available without script.

use std::fmt::Write as _;

use crate::error::Result;
use crate::layout::{ChartLayout, PathCommand};
use crate::render::backend::{ChartParams, ChartSurface};
use crate::render::colors::palette;
use crate::render::html::escape;
use crate::types::format_number;

const GRADIENT_ID: &str = "uptakeGradient";

/// Chart surface that renders into an SVG string.
#[derive(Debug, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    svg: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last drawn frame.
    pub fn as_str(&self) -> &str {
        &self.svg
    }
}

impl ChartSurface for SvgSurface {
    fn resize(&mut self, width: f64, height: f64, _dpr: f64) {
        self.width = width;
        self.height = height;
    }

    fn draw(&mut self, params: &ChartParams) -> Result<()> {
        self.svg = chart_svg(params);
        Ok(())
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// Serialize path commands to SVG path data.
pub fn path_data(commands: &[PathCommand]) -> String {
    let n = format_number;
    let mut d = String::new();
    for cmd in commands {
        let _ = match *cmd {
            PathCommand::MoveTo { x, y } => write!(d, "M{},{}", n(x), n(y)),
            PathCommand::LineTo { x, y } => write!(d, "L{},{}", n(x), n(y)),
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => write!(
                d,
                "C{},{},{},{},{},{}",
                n(c1x),
                n(c1y),
                n(c2x),
                n(c2y),
                n(x),
                n(y)
            ),
            PathCommand::Close => write!(d, "Z"),
        };
    }
    d
}

/// Render a complete `<svg>` element for the given frame.
pub fn chart_svg(params: &ChartParams) -> String {
    let layout = params.layout;
    let n = format_number;
    let mut s = String::new();

    let _ = write!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="uptakeChart" data-render-key="{}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{}">"#,
        params.key.as_str(),
        escape(&layout.axis_title),
        w = n(layout.width),
        h = n(layout.height),
    );
    if layout.is_empty() {
        s.push_str("</svg>");
        return s;
    }

    let _ = write!(
        s,
        r#"<defs><linearGradient id="{GRADIENT_ID}" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="{a}" stop-opacity="0.35"/><stop offset="100%" stop-color="{a}" stop-opacity="0"/></linearGradient></defs>"#,
        a = palette::ACCENT.to_hex()
    );

    write_grid_and_axes(&mut s, layout);

    let _ = write!(
        s,
        r#"<path class="area" d="{}" fill="url(#{GRADIENT_ID})" stroke="none"/>"#,
        path_data(&layout.area)
    );
    let _ = write!(
        s,
        r#"<path class="line" d="{}" fill="none" stroke="{}" stroke-width="3"/>"#,
        path_data(&layout.line),
        palette::ACCENT.to_hex()
    );

    for p in &layout.points {
        let r = if params.active == Some(p.index) {
            layout.active_point_radius
        } else {
            layout.point_radius
        };
        let _ = write!(
            s,
            r#"<circle class="point" data-index="{}" cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="2"><title>Cycle: {}: {}</title></circle>"#,
            p.index,
            n(p.x),
            n(p.y),
            n(r),
            palette::WHITE,
            palette::ACCENT.to_hex(),
            escape(&p.cycle),
            escape(&p.label),
        );
    }
    for p in &layout.points {
        let _ = write!(
            s,
            r#"<text class="valueLabel" x="{}" y="{}" text-anchor="middle" font-size="11" font-weight="500" fill="{}">{}</text>"#,
            n(p.x),
            n(p.label_y),
            palette::MUTED,
            escape(&p.label),
        );
    }
    s.push_str("</svg>");
    s
}

fn write_grid_and_axes(s: &mut String, layout: &ChartLayout) {
    let n = format_number;
    let plot = layout.plot;

    for tick in &layout.y_ticks {
        let _ = write!(
            s,
            r#"<line class="grid" x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{}" stroke-dasharray="3 6"/>"#,
            n(plot.x),
            n(plot.right()),
            palette::LINE,
            y = n(tick.position),
        );
    }
    let _ = write!(
        s,
        r#"<line class="axis" x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{}"/>"#,
        n(plot.y),
        n(plot.bottom()),
        palette::LINE,
        x = n(plot.x),
    );
    let _ = write!(
        s,
        r#"<line class="axis" x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{}"/>"#,
        n(plot.x),
        n(plot.right()),
        palette::LINE,
        y = n(plot.bottom()),
    );

    for tick in &layout.y_ticks {
        let _ = write!(
            s,
            r#"<text class="yTick" x="{}" y="{}" dy="4" text-anchor="end" font-size="12" font-weight="500" fill="{}">{}</text>"#,
            n(plot.x - 14.0),
            n(tick.position),
            palette::MUTED,
            escape(&tick.label),
        );
    }
    for tick in &layout.x_ticks {
        let _ = write!(
            s,
            r#"<text class="xTick" x="{}" y="{}" text-anchor="middle" font-size="12" font-weight="500" fill="{}">{}</text>"#,
            n(tick.position),
            n(layout.x_tick_y),
            palette::MUTED,
            escape(&tick.label),
        );
    }

    let mid_y = plot.y + plot.height / 2.0;
    let title_x = plot.x - 42.0;
    let _ = write!(
        s,
        r#"<text class="axisTitle" transform="rotate(-90 {x} {y})" x="{x}" y="{y}" text-anchor="middle" font-size="12" font-weight="600" fill="{}">{}</text>"#,
        palette::MUTED,
        escape(&layout.axis_title),
        x = n(title_x),
        y = n(mid_y),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::uptake_dataset;
    use crate::layout::ChartStyle;
    use crate::types::RenderKey;

    #[test]
    fn test_path_data_format() {
        let d = path_data(&[
            PathCommand::MoveTo { x: 1.0, y: 2.5 },
            PathCommand::LineTo { x: 3.256, y: 4.0 },
            PathCommand::Close,
        ]);
        assert_eq!(d, "M1,2.5L3.26,4Z");
    }

    #[test]
    fn test_empty_layout_is_bare_svg() {
        let layout = ChartLayout::empty(10.0, 10.0);
        let svg = chart_svg(&ChartParams {
            layout: &layout,
            active: None,
            key: RenderKey::Screen,
        });
        assert!(svg.ends_with("></svg>"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_active_point_uses_larger_radius() {
        let layout = ChartLayout::compute(&uptake_dataset(), 584.0, 240.0, &ChartStyle::default());
        let svg = chart_svg(&ChartParams {
            layout: &layout,
            active: Some(2),
            key: RenderKey::Print,
        });
        assert!(svg.contains(r#"data-render-key="print""#));
        assert_eq!(svg.matches(r#"r="8""#).count(), 1);
        assert_eq!(svg.matches(r#"r="6""#).count(), 2);
    }
}
