//! Static document rendering.
//!
//! Without a browser to measure the figure, the chart container is derived
//! from the design canvas for the requested context and the chart is drawn
//! through the SVG surface.

use crate::chart::ChartRenderer;
use crate::config::PosterOptions;
use crate::content;
use crate::error::Result;
use crate::layout::{ChartLayout, ChartStyle};
use crate::logo::LogoSource;
use crate::page_setup::{chart_container, DESIGN_WIDTH};
use crate::render::html::{render_document, DocumentParts};
use crate::render::svg::SvgSurface;
use crate::style::stylesheet;
use crate::types::ViewContext;

/// Chart renderer drawing into an SVG string.
pub fn svg_chart(context: ViewContext) -> Result<ChartRenderer<SvgSurface>> {
    ChartRenderer::new(
        content::uptake_dataset(),
        ChartStyle::default(),
        context.render_key(),
        Box::new(|_| Ok(SvgSurface::new())),
    )
}

/// Chart geometry for a container of the given size.
pub fn chart_layout(width: f64, height: f64) -> ChartLayout {
    ChartLayout::compute(
        &content::uptake_dataset(),
        width,
        height,
        &ChartStyle::default(),
    )
}

/// Chart geometry for a context, sized from the design canvas.
pub fn context_layout(context: ViewContext) -> ChartLayout {
    let (width, height) = chart_container(context, DESIGN_WIDTH);
    chart_layout(width, height)
}

/// The complete standalone HTML document for a context.
pub fn render_static_document(options: &PosterOptions, context: ViewContext) -> Result<String> {
    options.validate()?;

    let mut chart = svg_chart(context)?;
    let (width, height) = chart_container(context, DESIGN_WIDTH);
    chart.resize(width, height, 1.0)?;

    let poster = content::poster(options);
    let css = stylesheet(&options.page);
    let logo = LogoSource::from_options(options);
    Ok(render_document(&DocumentParts {
        poster: &poster,
        stylesheet: &css,
        logo: &logo,
        chart: chart.surface().as_str(),
        key: context.render_key(),
    }))
}
