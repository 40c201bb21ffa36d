//! Print/export view-state synchronization.
//!
//! The synchronizer keeps one boolean, the print-mode flag, in step with the
//! platform's print context and makes the chart re-measure after every
//! transition:
//! - print-start / print-end / media-change set the flag (last write wins)
//! - each signal schedules exactly one re-layout on the next frame, which
//!   fires a synthetic resize once print styles have been applied
//! - a flag change is reported to the observer so the chart can be re-keyed
//!
//! Handlers registered with the platform hold only weak references, so a
//! dropped synchronizer can never be revived by a late signal.

mod platform;
#[cfg(target_arch = "wasm32")]
mod web;

pub use platform::{
    Channel, FrameTask, MediaRegistration, PrintPlatform, PrintSignal, SignalHandler,
    SubscriptionId,
};
#[cfg(target_arch = "wasm32")]
pub use web::WebPrintPlatform;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::types::RenderKey;

/// Print-mode flag owned by the view root.
///
/// Clones share the value. Only this module writes it.
#[derive(Debug, Clone, Default)]
pub struct PrintModeFlag(Rc<Cell<bool>>);

impl PrintModeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag starting at `print_mode`, for views mounted while already printing.
    pub fn with_value(print_mode: bool) -> Self {
        Self(Rc::new(Cell::new(print_mode)))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    /// Chart identity token for the current value.
    pub fn render_key(&self) -> RenderKey {
        RenderKey::from_print_mode(self.get())
    }

    fn set(&self, value: bool) {
        self.0.set(value);
    }
}

type ModeObserver = Rc<dyn Fn(bool)>;

struct SyncState {
    flag: PrintModeFlag,
    attached: bool,
    observer: Option<ModeObserver>,
    relayouts_scheduled: u64,
    relayouts_fired: u64,
    relayouts_failed: u64,
}

pub struct ViewStateSynchronizer<P: PrintPlatform + 'static> {
    platform: Rc<P>,
    state: Rc<RefCell<SyncState>>,
    subscriptions: Vec<(Channel, SubscriptionId)>,
    registration: MediaRegistration,
}

impl<P: PrintPlatform + 'static> ViewStateSynchronizer<P> {
    /// Subscribe to the platform's print signals and start driving `flag`.
    ///
    /// Fails only if the print-start or print-end registration fails; any
    /// registrations made before the failure are rolled back.
    pub fn attach(platform: Rc<P>, flag: PrintModeFlag) -> Result<Self> {
        let state = Rc::new(RefCell::new(SyncState {
            flag,
            attached: true,
            observer: None,
            relayouts_scheduled: 0,
            relayouts_fired: 0,
            relayouts_failed: 0,
        }));
        let registration = platform.media_registration();
        let mut sync = Self {
            platform,
            state,
            subscriptions: Vec::with_capacity(Channel::ALL.len()),
            registration,
        };

        let handler = sync.handler();
        sync.subscribe(Channel::PrintStart, Rc::clone(&handler))?;
        sync.subscribe(Channel::PrintEnd, Rc::clone(&handler))?;

        match registration.channel() {
            Some(channel) => {
                if let Err(e) = sync.subscribe(channel, handler) {
                    warn!(?channel, error = %e, "media query registration failed, using print events only");
                    sync.registration = MediaRegistration::Unavailable;
                }
            }
            None => debug!("no media query change API, using print events only"),
        }
        Ok(sync)
    }

    fn handler(&self) -> SignalHandler {
        let weak_state = Rc::downgrade(&self.state);
        let weak_platform = Rc::downgrade(&self.platform);
        Rc::new(move |signal| {
            if let (Some(state), Some(platform)) = (weak_state.upgrade(), weak_platform.upgrade())
            {
                Self::handle_signal(&state, &platform, signal);
            }
        })
    }

    fn subscribe(&mut self, channel: Channel, handler: SignalHandler) -> Result<()> {
        let id = self.platform.subscribe(channel, handler)?;
        self.subscriptions.push((channel, id));
        Ok(())
    }

    fn handle_signal(state: &Rc<RefCell<SyncState>>, platform: &Rc<P>, signal: PrintSignal) {
        let print_mode = signal.print_mode();
        let observer = {
            let mut s = state.borrow_mut();
            if !s.attached {
                return;
            }
            let changed = s.flag.get() != print_mode;
            s.flag.set(print_mode);
            s.relayouts_scheduled += 1;
            if changed {
                s.observer.clone()
            } else {
                None
            }
        };
        debug!(?signal, print_mode, "print signal");

        // Borrow released: the observer may re-enter (e.g. read the flag)
        if let Some(observer) = observer {
            observer(print_mode);
        }

        let weak_state = Rc::downgrade(state);
        let weak_platform = Rc::downgrade(platform);
        let scheduled = platform.request_frame(Box::new(move || {
            let (Some(state), Some(platform)) = (weak_state.upgrade(), weak_platform.upgrade())
            else {
                return;
            };
            {
                let mut s = state.borrow_mut();
                if !s.attached {
                    return;
                }
                s.relayouts_fired += 1;
            }
            if let Err(e) = platform.dispatch_resize() {
                warn!(error = %e, "synthetic resize failed, chart keeps its old layout");
                state.borrow_mut().relayouts_failed += 1;
            }
        }));
        if let Err(e) = scheduled {
            warn!(error = %e, "could not schedule re-layout");
            state.borrow_mut().relayouts_failed += 1;
        }
    }

    /// Called with the new value whenever the flag actually changes.
    pub fn on_mode_change(&self, observer: impl Fn(bool) + 'static) {
        self.state.borrow_mut().observer = Some(Rc::new(observer));
    }

    pub fn print_mode(&self) -> bool {
        self.state.borrow().flag.get()
    }

    /// Another reader of the flag this synchronizer drives.
    pub fn flag(&self) -> PrintModeFlag {
        self.state.borrow().flag.clone()
    }

    /// Media registration form chosen at attach time.
    pub fn registration(&self) -> MediaRegistration {
        self.registration
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    pub fn relayouts_scheduled(&self) -> u64 {
        self.state.borrow().relayouts_scheduled
    }

    pub fn relayouts_fired(&self) -> u64 {
        self.state.borrow().relayouts_fired
    }

    /// Re-layouts lost because the platform could not schedule or dispatch them.
    pub fn relayouts_failed(&self) -> u64 {
        self.state.borrow().relayouts_failed
    }

    /// Live platform registrations.
    pub fn subscriptions(&self) -> &[(Channel, SubscriptionId)] {
        &self.subscriptions
    }

    /// Unregister everything. Idempotent; pending re-layouts are dropped.
    pub fn detach(&mut self) {
        {
            let mut s = self.state.borrow_mut();
            if !s.attached {
                return;
            }
            s.attached = false;
            s.observer = None;
        }
        for (channel, id) in self.subscriptions.drain(..) {
            self.platform.unsubscribe(channel, id);
        }
        debug!("view-state synchronizer detached");
    }
}

impl<P: PrintPlatform + 'static> Drop for ViewStateSynchronizer<P> {
    fn drop(&mut self) {
        self.detach();
    }
}
