//! DOM event wiring for `PosterView`.
//!
//! Every listener is owned by a [`DomListener`], which unregisters itself on
//! drop. Handlers capture weak references to the shared state so the page
//! never keeps a destroyed view alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, HtmlInputElement, MouseEvent};

use super::{device_pixel_ratio, measure_figure, Exporter, SharedState};
use crate::error::{PosterError, Result};
use crate::render::html::{escape, logo_markup, ACTION_EXPORT, ACTION_PICK_LOGO, ACTION_PRINT};

/// An event listener that is removed when dropped.
pub(crate) struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    fn add(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| PosterError::dom(&e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn action(root: &Element, name: &str) -> Result<EventTarget> {
    root.query_selector(&format!("[data-action=\"{name}\"]"))
        .map_err(|e| PosterError::dom(&e))?
        .map(EventTarget::from)
        .ok_or_else(|| PosterError::Dom(format!("missing control {name}")))
}

/// Register every listener the view needs.
pub(crate) fn bind(
    root: &Element,
    poster: &Element,
    state: &Rc<RefCell<SharedState>>,
    exporter: &Rc<Exporter>,
) -> Result<Vec<DomListener>> {
    let window: EventTarget = web_sys::window()
        .ok_or_else(|| PosterError::Dom("no window".into()))?
        .into();
    let figure: EventTarget = state.borrow().figure.clone().into();
    let mut listeners = Vec::with_capacity(6);

    // Container resize, real or synthetic: re-measure and redraw
    {
        let weak = Rc::downgrade(state);
        listeners.push(DomListener::add(&window, "resize", move |_| {
            on_resize(&weak);
        })?);
    }

    // Hover tooltip
    {
        let weak = Rc::downgrade(state);
        listeners.push(DomListener::add(&figure, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                on_hover(&weak, event);
            }
        })?);
    }
    {
        let weak = Rc::downgrade(state);
        listeners.push(DomListener::add(&figure, "mouseleave", move |_| {
            on_leave(&weak);
        })?);
    }

    // Download PNG
    {
        let exporter = Rc::downgrade(exporter);
        let target = poster.clone();
        listeners.push(DomListener::add(
            &action(root, ACTION_EXPORT)?,
            "click",
            move |_| {
                if let Some(exporter) = exporter.upgrade() {
                    let _ = export_promise(&exporter, Some(target.clone()));
                }
            },
        )?);
    }

    // Print / Save as PDF
    {
        let exporter = Rc::downgrade(exporter);
        listeners.push(DomListener::add(
            &action(root, ACTION_PRINT)?,
            "click",
            move |_| {
                if let Some(exporter) = exporter.upgrade() {
                    exporter.print_document();
                }
            },
        )?);
    }

    // Logo picker
    {
        let weak = Rc::downgrade(state);
        let picker = action(root, ACTION_PICK_LOGO)?;
        let root = root.clone();
        listeners.push(DomListener::add(
            &picker,
            "change",
            move |event| {
                if let Err(e) = on_logo_picked(&weak, &root, &event) {
                    tracing::warn!(error = %e, "logo upload failed");
                }
            },
        )?);
    }

    Ok(listeners)
}

/// Run an export in the background. The promise resolves to whether a
/// download was started and never rejects.
pub(crate) fn export_promise(exporter: &Rc<Exporter>, target: Option<Element>) -> js_sys::Promise {
    let exporter = Rc::clone(exporter);
    wasm_bindgen_futures::future_to_promise(async move {
        let outcome = exporter.export_image(target.as_ref()).await;
        Ok(JsValue::from_bool(outcome.is_downloaded()))
    })
}

fn on_resize(state: &Weak<RefCell<SharedState>>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut s = state.borrow_mut();
    let (width, height) = measure_figure(&s.figure);
    if let Err(e) = s.chart.resize(width, height, device_pixel_ratio()) {
        tracing::warn!(error = %e, "chart resize failed");
    }
}

fn on_hover(state: &Weak<RefCell<SharedState>>, event: &MouseEvent) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut s = state.borrow_mut();
    let rect = s.chart.surface().canvas().get_bounding_client_rect();
    let x = f64::from(event.client_x()) - rect.left();
    let y = f64::from(event.client_y()) - rect.top();

    let tooltip = match s.chart.hover(x, y) {
        Ok(tooltip) => tooltip,
        Err(e) => {
            tracing::warn!(error = %e, "chart hover redraw failed");
            None
        }
    };
    let style = s.tooltip.style();
    match tooltip {
        Some(t) => {
            s.tooltip.set_inner_html(&format!(
                "<div style=\"font-weight:600\">{}</div><div>{}: {}</div>",
                escape(&t.title),
                escape(&t.series),
                escape(&t.value)
            ));
            // Figure-relative: the canvas sits inside the figure padding
            let figure_rect = s.figure.get_bounding_client_rect();
            let left = rect.left() - figure_rect.left() + t.x + 12.0;
            let top = rect.top() - figure_rect.top() + t.y - 12.0;
            let _ = style.set_property("left", &format!("{left}px"));
            let _ = style.set_property("top", &format!("{top}px"));
            let _ = style.set_property("display", "block");
        }
        None => {
            let _ = style.set_property("display", "none");
        }
    }
}

fn on_leave(state: &Weak<RefCell<SharedState>>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut s = state.borrow_mut();
    let _ = s.tooltip.style().set_property("display", "none");
    if let Err(e) = s.chart.leave() {
        tracing::warn!(error = %e, "chart redraw failed");
    }
}

fn on_logo_picked(state: &Weak<RefCell<SharedState>>, root: &Element, event: &Event) -> Result<()> {
    let Some(state) = state.upgrade() else {
        return Ok(());
    };
    let Some(input) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(());
    };
    let url = web_sys::Url::create_object_url_with_blob(&file).map_err(|e| PosterError::dom(&e))?;

    let markup = {
        let mut s = state.borrow_mut();
        if let Some(previous) = s.logo.upload(url) {
            let _ = web_sys::Url::revoke_object_url(&previous);
        }
        logo_markup(s.logo.source())
    };
    if let Some(current) = root
        .query_selector(".nhsLogo")
        .map_err(|e| PosterError::dom(&e))?
    {
        current.set_outer_html(&markup);
    }
    Ok(())
}
