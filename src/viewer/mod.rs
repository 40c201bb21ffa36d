//! Main PosterView struct - the browser entry point.
//!
//! This module provides the WASM-exported `PosterView` struct that handles:
//! - Mounting the stylesheet and poster markup into a host element
//! - Drawing the uptake chart on a Canvas 2D surface sized to its figure
//! - Keeping the chart in step with print via the view-state synchronizer
//! - PNG export, print and the logo picker
//!
//! Event handlers are registered when the view is created and removed by
//! `destroy()` or when the view is dropped.

mod events;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Node, Window};

use crate::chart::{ChartRenderer, SurfaceFactory};
use crate::config::PosterOptions;
use crate::content;
use crate::error::{PosterError, Result};
use crate::export::{AnchorDownload, DomRasterizer, ExportTrigger, WindowPrint};
use crate::layout::ChartStyle;
use crate::logo::{LogoSource, LogoState};
use crate::render::canvas::CanvasSurface;
use crate::render::html::{render_fragment, DocumentParts, FIGURE_MARKER, POSTER_ID};
use crate::style::stylesheet;
use crate::sync::{PrintModeFlag, ViewStateSynchronizer, WebPrintPlatform};
use crate::types::RenderKey;

use events::DomListener;

pub(crate) type Exporter = ExportTrigger<DomRasterizer, AnchorDownload, WindowPrint>;

/// Shared state that can be accessed by event handlers
pub(crate) struct SharedState {
    pub(crate) chart: ChartRenderer<CanvasSurface>,
    pub(crate) logo: LogoState,
    pub(crate) figure: HtmlElement,
    pub(crate) tooltip: HtmlElement,
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| PosterError::Dom("no window".into()))
}

fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| PosterError::Dom("no document".into()))
}

fn select<T: JsCast>(root: &Element, selector: &str) -> Result<T> {
    root.query_selector(selector)
        .map_err(|e| PosterError::dom(&e))?
        .ok_or_else(|| PosterError::Dom(format!("missing {selector}")))?
        .dyn_into::<T>()
        .map_err(|_| PosterError::Dom(format!("{selector} has the wrong element type")))
}

/// Builds a fresh canvas inside the figure for every render key.
fn canvas_factory(figure: HtmlElement) -> SurfaceFactory<CanvasSurface> {
    Box::new(move |key: RenderKey| {
        let old: Vec<Node> = figure
            .query_selector_all("canvas")
            .map(|list| (0..list.length()).filter_map(|i| list.item(i)).collect())
            .unwrap_or_default();

        // The old canvas stays mounted until its replacement is in place
        let canvas = document()?
            .create_element("canvas")
            .map_err(|e| PosterError::dom(&e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| PosterError::Dom("canvas element has the wrong type".into()))?;
        let _ = canvas.set_attribute("data-render-key", key.as_str());
        let _ = canvas.set_attribute("role", "img");
        let _ = canvas.set_attribute("aria-label", &ChartStyle::default().axis_title);
        let surface = CanvasSurface::new(canvas)?;
        figure
            .insert_before(surface.canvas(), figure.first_child().as_ref())
            .map_err(|e| PosterError::dom(&e))?;

        for node in &old {
            let _ = figure.remove_child(node);
        }
        Ok(surface)
    })
}

/// Parse a CSS pixel length such as `"8px"`.
fn css_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Content box of the figure in CSS px.
pub(crate) fn measure_figure(figure: &HtmlElement) -> (f64, f64) {
    let (mut pad_x, mut pad_y) = (0.0, 0.0);
    if let Ok(Some(style)) = window().and_then(|w| {
        w.get_computed_style(figure)
            .map_err(|e| PosterError::dom(&e))
    }) {
        let px = |name: &str| css_px(&style.get_property_value(name).unwrap_or_default());
        pad_x = px("padding-left") + px("padding-right");
        pad_y = px("padding-top") + px("padding-bottom");
    }
    (
        (f64::from(figure.client_width()) - pad_x).max(0.0),
        (f64::from(figure.client_height()) - pad_y).max(0.0),
    )
}

pub(crate) fn device_pixel_ratio() -> f64 {
    window().map_or(1.0, |w| w.device_pixel_ratio())
}

#[wasm_bindgen]
pub struct PosterView {
    root: HtmlElement,
    poster: Option<Element>,
    state: Rc<RefCell<SharedState>>,
    flag: PrintModeFlag,
    sync: Option<ViewStateSynchronizer<WebPrintPlatform>>,
    exporter: Rc<Exporter>,
    listeners: Vec<DomListener>,
}

#[wasm_bindgen]
impl PosterView {
    /// Mount the poster into `root`.
    ///
    /// `options` is a `PosterOptions` object; `undefined` or `null` uses the
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, options: JsValue) -> std::result::Result<PosterView, JsValue> {
        console_error_panic_hook::set_once();
        let options: PosterOptions = if options.is_undefined() || options.is_null() {
            PosterOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| PosterError::Config(e.to_string()))?
        };
        options.validate()?;
        Ok(Self::mount(root, &options)?)
    }

    fn mount(root: HtmlElement, options: &PosterOptions) -> Result<PosterView> {
        let css = stylesheet(&options.page);
        let poster = content::poster(options);
        let logo = LogoState::new(LogoSource::from_options(options));
        let platform = Rc::new(WebPrintPlatform::new()?);
        // Mounted from inside a print preview: start in print mode
        let flag = PrintModeFlag::with_value(platform.print_media_matches().unwrap_or(false));

        root.set_inner_html(&render_fragment(&DocumentParts {
            poster: &poster,
            stylesheet: &css,
            logo: logo.source(),
            chart: "",
            key: flag.render_key(),
        }));

        let poster_el: Element = select(&root, &format!("#{POSTER_ID}"))?;
        let figure: HtmlElement = select(&root, &format!("[data-chart=\"{FIGURE_MARKER}\"]"))?;
        let tooltip = document()?
            .create_element("div")
            .map_err(|e| PosterError::dom(&e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PosterError::Dom("tooltip has the wrong element type".into()))?;
        tooltip.set_class_name("chartTooltip");
        let _ = tooltip.style().set_property("display", "none");
        figure
            .append_child(&tooltip)
            .map_err(|e| PosterError::dom(&e))?;

        let mut chart = ChartRenderer::new(
            content::uptake_dataset(),
            ChartStyle::default(),
            flag.render_key(),
            canvas_factory(figure.clone()),
        )?;
        let (width, height) = measure_figure(&figure);
        chart.resize(width, height, device_pixel_ratio())?;

        let state = Rc::new(RefCell::new(SharedState {
            chart,
            logo,
            figure,
            tooltip,
        }));

        let sync = ViewStateSynchronizer::attach(platform, flag.clone())?;
        {
            let weak = Rc::downgrade(&state);
            let poster_for_key = poster_el.clone();
            sync.on_mode_change(move |print_mode| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let key = RenderKey::from_print_mode(print_mode);
                let _ = poster_for_key.set_attribute("data-render-key", key.as_str());
                let mut s = state.borrow_mut();
                let _ = s.tooltip.style().set_property("display", "none");
                if let Err(e) = s.chart.rekey(key) {
                    tracing::warn!(error = %e, "chart re-key failed");
                }
            });
        }

        let exporter = Rc::new(ExportTrigger::new(
            DomRasterizer::new(css),
            AnchorDownload,
            WindowPrint,
            options.export.clone(),
        ));

        let listeners = events::bind(&root, &poster_el, &state, &exporter)?;
        debug!(
            registration = ?sync.registration(),
            listeners = listeners.len(),
            "poster view mounted"
        );

        Ok(PosterView {
            root,
            poster: Some(poster_el),
            state,
            flag,
            sync: Some(sync),
            exporter,
            listeners,
        })
    }

    /// Rasterize the poster and download it as a PNG.
    ///
    /// Resolves to `true` when a download was started. Never rejects.
    #[wasm_bindgen(js_name = "exportImage")]
    pub fn export_image(&self) -> js_sys::Promise {
        events::export_promise(&self.exporter, self.poster.clone())
    }

    /// Open the platform print dialog.
    #[wasm_bindgen]
    pub fn print(&self) {
        self.exporter.print_document();
    }

    #[wasm_bindgen(js_name = "isPrintMode")]
    pub fn is_print_mode(&self) -> bool {
        self.flag.get()
    }

    /// Current chart geometry as a plain object.
    #[wasm_bindgen(js_name = "chartLayout")]
    pub fn chart_layout(&self) -> std::result::Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(s.chart.layout())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Remove every listener and unmount. Safe to call more than once.
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        if let Some(mut sync) = self.sync.take() {
            sync.detach();
        }
        self.listeners.clear();
        if let Some(url) = self.state.borrow_mut().logo.reset() {
            let _ = web_sys::Url::revoke_object_url(&url);
        }
        if self.poster.take().is_some() {
            self.root.set_inner_html("");
        }
    }
}

impl Drop for PosterView {
    fn drop(&mut self) {
        self.destroy();
    }
}
