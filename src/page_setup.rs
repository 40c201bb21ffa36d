//! Page geometry for screen and print.
//!
//! The poster is designed on a fixed 1984 x 1400 px canvas (A3 landscape
//! proportions). In print it is pinned to the configured paper size and
//! zoomed by `print_scale`; the chart figure switches from a viewport-relative
//! height to a fixed physical one. The static renderer uses the same numbers
//! to size the chart without a browser to measure it.

use std::fmt::Write as _;

use crate::types::{format_number, PageSetup, ViewContext};

/// Design canvas width in CSS px
pub const DESIGN_WIDTH: f64 = 1984.0;
/// Design canvas height in CSS px
pub const DESIGN_HEIGHT: f64 = 1400.0;

const CONTENT_PADDING_X: f64 = 32.0;
const COLUMN_GAP: f64 = 12.0;
const COLUMNS: f64 = 3.0;
const PANEL_PADDING_X: f64 = 14.0;
const PANEL_BORDER: f64 = 1.0;
const FIGURE_PADDING: f64 = 8.0;
const FIGURE_BORDER: f64 = 1.0;

/// Screen figure height: `clamp(200px, 16vw, 280px)`
const SCREEN_FIGURE_MIN: f64 = 200.0;
const SCREEN_FIGURE_MAX: f64 = 280.0;
const SCREEN_FIGURE_VW: f64 = 0.16;

/// Print figure height in millimetres
pub const PRINT_FIGURE_MM: f64 = 55.0;

/// CSS reference pixels per millimetre (96 dpi)
pub const PX_PER_MM: f64 = 96.0 / 25.4;

/// Width of one content grid column.
pub fn column_width() -> f64 {
    (DESIGN_WIDTH - CONTENT_PADDING_X * 2.0 - COLUMN_GAP * (COLUMNS - 1.0)) / COLUMNS
}

/// Outer height of the figure box for a context.
///
/// `viewport_width` only matters on screen, where the height tracks `16vw`.
pub fn figure_height(context: ViewContext, viewport_width: f64) -> f64 {
    match context {
        ViewContext::Screen => {
            (viewport_width * SCREEN_FIGURE_VW).clamp(SCREEN_FIGURE_MIN, SCREEN_FIGURE_MAX)
        }
        ViewContext::Print => PRINT_FIGURE_MM * PX_PER_MM,
    }
}

/// Content box (width, height) the chart is drawn into.
pub fn chart_container(context: ViewContext, viewport_width: f64) -> (f64, f64) {
    let inset = (FIGURE_PADDING + FIGURE_BORDER) * 2.0;
    let figure_width = column_width() - (PANEL_PADDING_X + PANEL_BORDER) * 2.0;
    (
        (figure_width - inset).max(0.0),
        (figure_height(context, viewport_width) - inset).max(0.0),
    )
}

/// The `@media print` block: page rule, pinned page box, zoom, hidden controls.
pub fn print_css(page: &PageSetup) -> String {
    let (page_w, page_h) = page.page_mm();
    let margin = format_number(page.margin_mm);
    let inset = format_number(page.margin_mm * 2.0);
    let mut css = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(css, "@media print{{");
    let _ = writeln!(css, "  :root{{ --print-scale:{}; }}", format_number(page.print_scale));
    let _ = writeln!(
        css,
        "  @page{{ size: {} {}; margin: {margin}mm; }}",
        page.paper_size.css_name(),
        page.orientation.css_name()
    );
    let _ = writeln!(
        css,
        "  body{{ background:#fff; margin:0; display:flex; justify-content:center; }}"
    );
    let _ = writeln!(
        css,
        "  .page{{ width: calc({}mm - {inset}mm); height: calc({}mm - {inset}mm); margin:0; \
         padding:0; display:flex; justify-content:center; align-items:flex-start; }}",
        format_number(page_w),
        format_number(page_h)
    );
    let _ = writeln!(
        css,
        "  .a3{{ width:{}px; height:{}px; margin:0; border:none; box-shadow:none; \
         overflow:visible; transform-origin: top left; zoom: var(--print-scale); }}",
        format_number(DESIGN_WIDTH),
        format_number(DESIGN_HEIGHT)
    );
    let _ = writeln!(
        css,
        "  .figure{{ height:{}mm; }}",
        format_number(PRINT_FIGURE_MM)
    );
    let _ = writeln!(css, "  .btn, .toolbar{{ display:none !important }}");
    let _ = writeln!(
        css,
        "  .panel{{ break-inside: avoid; page-break-inside: avoid; }}"
    );
    css.push_str("}\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Orientation, PaperSize};

    #[test]
    fn test_column_width() {
        assert!((column_width() - 632.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_figure_clamps() {
        assert!((figure_height(ViewContext::Screen, 800.0) - 200.0).abs() < 1e-9);
        assert!((figure_height(ViewContext::Screen, 1500.0) - 240.0).abs() < 1e-9);
        assert!((figure_height(ViewContext::Screen, 4000.0) - 280.0).abs() < 1e-9);
    }

    #[test]
    fn test_print_figure_ignores_viewport() {
        let a = figure_height(ViewContext::Print, 800.0);
        let b = figure_height(ViewContext::Print, 4000.0);
        assert!((a - b).abs() < 1e-9);
        assert!((a - 207.874).abs() < 1e-3);
    }

    #[test]
    fn test_chart_container_width() {
        let (w, _) = chart_container(ViewContext::Print, 0.0);
        assert!((w - 584.0).abs() < 1e-9);
    }

    #[test]
    fn test_print_css_default_page() {
        let css = print_css(&PageSetup::default());
        assert!(css.contains("@page{ size: A3 landscape; margin: 8mm; }"));
        assert!(css.contains("calc(420mm - 16mm)"));
        assert!(css.contains("calc(297mm - 16mm)"));
        assert!(css.contains("--print-scale:0.8;"));
        assert!(css.contains(".btn, .toolbar{ display:none !important }"));
    }

    #[test]
    fn test_print_css_portrait_a4() {
        let page = PageSetup {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 10.0,
            print_scale: 1.0,
        };
        let css = print_css(&page);
        assert!(css.contains("size: A4 portrait; margin: 10mm;"));
        assert!(css.contains("calc(210mm - 20mm)"));
    }
}
