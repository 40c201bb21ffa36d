//! Browser tests for the mounted poster view.
//!
//! Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use qiposter::PosterView;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_root() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let root: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    root.style().set_property("width", "1200px").unwrap();
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn fire(name: &str) {
    let window = web_sys::window().unwrap();
    window.dispatch_event(&Event::new(name).unwrap()).unwrap();
}

#[wasm_bindgen_test]
fn test_mount_renders_poster_and_canvas() {
    let root = mount_root();
    let view = PosterView::new(root.clone(), JsValue::UNDEFINED).unwrap();

    assert!(root.query_selector(".a3").unwrap().is_some());
    let canvas = root.query_selector("canvas").unwrap().unwrap();
    assert_eq!(canvas.get_attribute("data-render-key").as_deref(), Some("screen"));
    assert!(!view.is_print_mode());
}

#[wasm_bindgen_test]
fn test_print_events_toggle_mode_and_rekey() {
    let root = mount_root();
    let view = PosterView::new(root.clone(), JsValue::UNDEFINED).unwrap();

    fire("beforeprint");
    assert!(view.is_print_mode());
    let poster = root.query_selector(".a3").unwrap().unwrap();
    assert_eq!(poster.get_attribute("data-render-key").as_deref(), Some("print"));
    let canvas = root.query_selector("canvas").unwrap().unwrap();
    assert_eq!(canvas.get_attribute("data-render-key").as_deref(), Some("print"));
    assert_eq!(root.query_selector_all("canvas").unwrap().length(), 1);

    fire("afterprint");
    assert!(!view.is_print_mode());
    let canvases = root.query_selector_all("canvas").unwrap();
    assert_eq!(canvases.length(), 1);
    let canvas: web_sys::Element = canvases.item(0).unwrap().dyn_into().unwrap();
    assert_eq!(canvas.get_attribute("data-render-key").as_deref(), Some("screen"));
}

#[wasm_bindgen_test]
fn test_destroy_unmounts_and_ignores_later_events() {
    let root = mount_root();
    let mut view = PosterView::new(root.clone(), JsValue::UNDEFINED).unwrap();

    view.destroy();
    view.destroy();
    assert_eq!(root.inner_html(), "");

    fire("beforeprint");
    assert!(!view.is_print_mode());
}

#[wasm_bindgen_test]
fn test_invalid_options_are_rejected() {
    let root = mount_root();
    let options = js_sys::JSON::parse(r#"{"export":{"pixelRatio":-1}}"#).unwrap();

    assert!(PosterView::new(root, options).is_err());
}
