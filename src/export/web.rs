//! Browser export: DOM subtree rasterization through an SVG
//! `foreignObject`, anchor downloads and `window.print()`.

use std::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, Document, Element, HtmlAnchorElement,
    HtmlCanvasElement, HtmlImageElement, Url, Window, XmlSerializer,
};

use super::{cache_bust_url, DownloadSink, ExportArtifact, PrintInvoker, Rasterizer};
use crate::config::ExportOptions;
use crate::error::{PosterError, Result};

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| PosterError::Dom("no window".into()))
}

fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| PosterError::Dom("no document".into()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn create_canvas(document: &Document, width: f64, height: f64) -> Result<HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| PosterError::dom(&e))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| PosterError::Dom("canvas element has the wrong type".into()))?;
    canvas.set_width(width.round().max(1.0) as u32);
    canvas.set_height(height.round().max(1.0) as u32);
    Ok(canvas)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| PosterError::dom(&e))?
        .ok_or_else(|| PosterError::Dom("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| PosterError::Dom("2d context has the wrong type".into()))
}

/// Resolve once `image` has loaded `src`, reject on `error`.
async fn load_image(image: &HtmlImageElement, src: &str) -> Result<()> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    let loaded = JsFuture::from(promise).await;
    image.set_onload(None);
    image.set_onerror(None);
    loaded
        .map(|_| ())
        .map_err(|_| PosterError::Rasterize(format!("image failed to load: {src}")))
}

/// Rasterizes an element subtree into a PNG.
///
/// Images are re-fetched (optionally cache-busted) and inlined as data URLs,
/// canvases are snapshotted, then the clone is serialized into an SVG
/// `foreignObject` together with the stylesheet and drawn onto a canvas
/// scaled by the pixel ratio.
pub struct DomRasterizer {
    stylesheet: String,
    exports: Cell<u64>,
}

impl DomRasterizer {
    pub fn new(stylesheet: impl Into<String>) -> Self {
        Self {
            stylesheet: stylesheet.into(),
            exports: Cell::new(0),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn next_token(&self) -> String {
        let n = self.exports.get() + 1;
        self.exports.set(n);
        format!("{}-{n}", js_sys::Date::now() as u64)
    }

    /// Replace every `<img>` source in `clone` with a data URL.
    async fn inline_images(
        &self,
        document: &Document,
        clone: &Element,
        token: Option<&str>,
    ) -> Result<()> {
        let images = clone
            .query_selector_all("img")
            .map_err(|e| PosterError::dom(&e))?;
        for i in 0..images.length() {
            let Some(img) = images.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(src) = img.get_attribute("src") else {
                continue;
            };
            if src.starts_with("data:") {
                continue;
            }
            let url = match token {
                Some(token) => cache_bust_url(&src, token),
                None => src.clone(),
            };

            let loader = HtmlImageElement::new().map_err(|e| PosterError::dom(&e))?;
            if !src.starts_with("blob:") {
                loader.set_cross_origin(Some("anonymous"));
            }
            load_image(&loader, &url).await?;

            let canvas = create_canvas(
                document,
                f64::from(loader.natural_width()),
                f64::from(loader.natural_height()),
            )?;
            context_2d(&canvas)?
                .draw_image_with_html_image_element(&loader, 0.0, 0.0)
                .map_err(|e| PosterError::rasterize(&e))?;
            // Throws for tainted (cross-origin) images
            let data_url = canvas
                .to_data_url_with_type("image/png")
                .map_err(|e| PosterError::rasterize(&e))?;
            img.set_attribute("src", &data_url)
                .map_err(|e| PosterError::dom(&e))?;
        }
        Ok(())
    }

    /// Cloned canvases are blank; swap them for snapshots of the originals.
    fn snapshot_canvases(
        &self,
        document: &Document,
        original: &Element,
        clone: &Element,
    ) -> Result<()> {
        let sources = original
            .query_selector_all("canvas")
            .map_err(|e| PosterError::dom(&e))?;
        let copies = clone
            .query_selector_all("canvas")
            .map_err(|e| PosterError::dom(&e))?;
        for i in 0..sources.length().min(copies.length()) {
            let (Some(source), Some(copy)) = (
                sources
                    .item(i)
                    .and_then(|n| n.dyn_into::<HtmlCanvasElement>().ok()),
                copies.item(i).and_then(|n| n.dyn_into::<Element>().ok()),
            ) else {
                continue;
            };
            let data_url = source
                .to_data_url_with_type("image/png")
                .map_err(|e| PosterError::rasterize(&e))?;
            let img = document
                .create_element("img")
                .map_err(|e| PosterError::dom(&e))?;
            img.set_attribute("src", &data_url)
                .map_err(|e| PosterError::dom(&e))?;
            if let Some(style) = copy.get_attribute("style") {
                img.set_attribute("style", &style)
                    .map_err(|e| PosterError::dom(&e))?;
            }
            if let Some(parent) = copy.parent_node() {
                parent
                    .replace_child(&img, &copy)
                    .map_err(|e| PosterError::dom(&e))?;
            }
        }
        Ok(())
    }

    fn svg_document(&self, markup: &str, width: f64, height: f64) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\
             <foreignObject x=\"0\" y=\"0\" width=\"100%\" height=\"100%\">\
             <div xmlns=\"http://www.w3.org/1999/xhtml\"><style>{}</style>{markup}</div>\
             </foreignObject></svg>",
            crate::render::html::escape(&self.stylesheet)
        )
    }
}

impl Rasterizer for DomRasterizer {
    type Target = Element;

    async fn rasterize(&self, target: &Element, options: &ExportOptions) -> Result<ExportArtifact> {
        if !target.is_connected() {
            return Err(PosterError::Detached);
        }
        let rect = target.get_bounding_client_rect();
        let (width, height) = (rect.width(), rect.height());
        if width <= 0.0 || height <= 0.0 {
            return Err(PosterError::Detached);
        }

        let document = document()?;
        let clone = target
            .clone_node_with_deep(true)
            .map_err(|e| PosterError::dom(&e))?
            .dyn_into::<Element>()
            .map_err(|_| PosterError::Dom("cloned node is not an element".into()))?;

        self.snapshot_canvases(&document, target, &clone)?;
        let token = options.cache_bust.then(|| self.next_token());
        self.inline_images(&document, &clone, token.as_deref())
            .await?;

        let markup = XmlSerializer::new()
            .map_err(|e| PosterError::dom(&e))?
            .serialize_to_string(&clone)
            .map_err(|e| PosterError::rasterize(&e))?;
        let svg = self.svg_document(&markup, width, height);
        let svg_url = format!(
            "data:image/svg+xml;charset=utf-8,{}",
            String::from(js_sys::encode_uri_component(&svg))
        );

        let image = HtmlImageElement::new().map_err(|e| PosterError::dom(&e))?;
        load_image(&image, &svg_url).await?;

        let ratio = options.pixel_ratio;
        let canvas = create_canvas(&document, width * ratio, height * ratio)?;
        let ctx = context_2d(&canvas)?;
        ctx.scale(ratio, ratio)
            .map_err(|e| PosterError::rasterize(&e))?;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(&image, 0.0, 0.0, width, height)
            .map_err(|e| PosterError::rasterize(&e))?;
        let data_url = canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| PosterError::rasterize(&e))?;
        ExportArtifact::from_data_url(&data_url)
    }
}

/// Downloads through a temporary `<a download>` pointing at a blob URL.
#[derive(Default)]
pub struct AnchorDownload;

impl DownloadSink for AnchorDownload {
    fn deliver(&self, file_name: &str, artifact: &ExportArtifact) -> Result<()> {
        let document = document()?;
        let body = document
            .body()
            .ok_or_else(|| PosterError::Dom("no body".into()))?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(artifact.bytes()).into());
        let bag = BlobPropertyBag::new();
        bag.set_type("image/png");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
            .map_err(|e| PosterError::dom(&e))?;
        let url = Url::create_object_url_with_blob(&blob).map_err(|e| PosterError::dom(&e))?;

        let anchor = document
            .create_element("a")
            .map_err(|e| PosterError::dom(&e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| PosterError::Dom("anchor element has the wrong type".into()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        let _ = anchor.style().set_property("display", "none");

        let appended = body.append_child(&anchor);
        if appended.is_ok() {
            anchor.click();
            let _ = body.remove_child(&anchor);
        }

        // Revoke after the click has been handled
        let revoke = Closure::once_into_js(move || {
            let _ = Url::revoke_object_url(&url);
        });
        let _ = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0);

        appended.map(|_| ()).map_err(|e| PosterError::dom(&e))
    }
}

/// `window.print()`.
#[derive(Default)]
pub struct WindowPrint;

impl PrintInvoker for WindowPrint {
    fn print(&self) -> Result<()> {
        window()?
            .print()
            .map_err(|e: JsValue| PosterError::Dom(crate::error::js_message(&e)))
    }
}
