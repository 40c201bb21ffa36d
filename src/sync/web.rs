//! Browser print platform: window print events, `matchMedia("print")`,
//! `requestAnimationFrame` and a synthetic window `resize`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, MediaQueryList, MediaQueryListEvent, Window};

use super::platform::{
    Channel, FrameTask, MediaRegistration, PrintPlatform, PrintSignal, SignalHandler,
    SubscriptionId,
};
use crate::error::{PosterError, Result};

const PRINT_QUERY: &str = "print";

struct Listener {
    channel: Channel,
    closure: Closure<dyn FnMut(Event)>,
}

pub struct WebPrintPlatform {
    window: Window,
    media: Option<MediaQueryList>,
    registration: MediaRegistration,
    listeners: RefCell<HashMap<SubscriptionId, Listener>>,
    next_id: Cell<u64>,
}

impl WebPrintPlatform {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| PosterError::Dom("no window".into()))?;
        let media = match window.match_media(PRINT_QUERY) {
            Ok(media) => media,
            Err(e) => {
                warn!(error = %crate::error::js_message(&e), "matchMedia(print) failed");
                None
            }
        };
        let registration = media
            .as_ref()
            .map_or(MediaRegistration::Unavailable, detect_registration);
        Ok(Self {
            window,
            media,
            registration,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        })
    }

    /// Current value of the print media query, if one exists.
    pub fn print_media_matches(&self) -> Option<bool> {
        self.media.as_ref().map(MediaQueryList::matches)
    }

    fn media(&self) -> Result<&MediaQueryList> {
        self.media
            .as_ref()
            .ok_or_else(|| PosterError::Subscribe("no print media query".into()))
    }
}

fn has_method(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map(|v| v.is_function())
        .unwrap_or(false)
}

/// Modern `addEventListener` first, `addListener` as the fallback.
fn detect_registration(media: &MediaQueryList) -> MediaRegistration {
    if has_method(media.as_ref(), "addEventListener") {
        MediaRegistration::EventListener
    } else if has_method(media.as_ref(), "addListener") {
        MediaRegistration::LegacyListener
    } else {
        MediaRegistration::Unavailable
    }
}

fn subscribe_error(e: &JsValue) -> PosterError {
    PosterError::Subscribe(crate::error::js_message(e))
}

impl PrintPlatform for WebPrintPlatform {
    fn media_registration(&self) -> MediaRegistration {
        self.registration
    }

    fn subscribe(&self, channel: Channel, handler: SignalHandler) -> Result<SubscriptionId> {
        let closure = match channel {
            Channel::PrintStart => Closure::wrap(Box::new(move |_event: Event| {
                handler(PrintSignal::PrintStart);
            }) as Box<dyn FnMut(Event)>),
            Channel::PrintEnd => Closure::wrap(Box::new(move |_event: Event| {
                handler(PrintSignal::PrintEnd);
            }) as Box<dyn FnMut(Event)>),
            Channel::MediaChange | Channel::MediaListener => {
                let media = self.media()?.clone();
                Closure::wrap(Box::new(move |event: Event| {
                    let matches = event
                        .dyn_ref::<MediaQueryListEvent>()
                        .map_or_else(|| media.matches(), MediaQueryListEvent::matches);
                    handler(PrintSignal::MediaChange { matches });
                }) as Box<dyn FnMut(Event)>)
            }
        };

        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        match channel {
            Channel::PrintStart => self
                .window
                .add_event_listener_with_callback("beforeprint", callback)
                .map_err(|e| subscribe_error(&e))?,
            Channel::PrintEnd => self
                .window
                .add_event_listener_with_callback("afterprint", callback)
                .map_err(|e| subscribe_error(&e))?,
            Channel::MediaChange => self
                .media()?
                .add_event_listener_with_callback("change", callback)
                .map_err(|e| subscribe_error(&e))?,
            Channel::MediaListener => self
                .media()?
                .add_listener_with_opt_callback(Some(callback))
                .map_err(|e| subscribe_error(&e))?,
        }

        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .insert(id, Listener { channel, closure });
        Ok(id)
    }

    fn unsubscribe(&self, channel: Channel, id: SubscriptionId) {
        let Some(listener) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        debug_assert_eq!(listener.channel, channel);
        let callback: &js_sys::Function = listener.closure.as_ref().unchecked_ref();
        let removed = match channel {
            Channel::PrintStart => self
                .window
                .remove_event_listener_with_callback("beforeprint", callback),
            Channel::PrintEnd => self
                .window
                .remove_event_listener_with_callback("afterprint", callback),
            Channel::MediaChange => match &self.media {
                Some(media) => media.remove_event_listener_with_callback("change", callback),
                None => Ok(()),
            },
            Channel::MediaListener => match &self.media {
                Some(media) => media.remove_listener_with_opt_callback(Some(callback)),
                None => Ok(()),
            },
        };
        if let Err(e) = removed {
            warn!(?channel, error = %crate::error::js_message(&e), "failed to remove print listener");
        }
    }

    fn request_frame(&self, task: FrameTask) -> Result<()> {
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            warn!(error = %crate::error::js_message(&e), "requestAnimationFrame failed, deferring with a timeout");
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
                .map_err(|e| PosterError::dom(&e))?;
        }
        Ok(())
    }

    fn dispatch_resize(&self) -> Result<()> {
        let event = Event::new("resize").map_err(|e| PosterError::dom(&e))?;
        self.window
            .dispatch_event(&event)
            .map_err(|e| PosterError::dom(&e))?;
        Ok(())
    }
}

impl Drop for WebPrintPlatform {
    fn drop(&mut self) {
        let ids: Vec<(SubscriptionId, Channel)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, l)| (*id, l.channel))
            .collect();
        for (id, channel) in ids {
            self.unsubscribe(channel, id);
        }
    }
}
