//! Platform seam for print-lifecycle signals.
//!
//! The browser implementation lives in `web.rs`; tests drive the
//! synchronizer through an in-memory implementation of the same trait.

use std::rc::Rc;

use crate::error::Result;

/// A print-lifecycle signal as the synchronizer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSignal {
    /// `beforeprint`
    PrintStart,
    /// `afterprint`
    PrintEnd,
    /// `matchMedia("print")` changed
    MediaChange { matches: bool },
}

impl PrintSignal {
    /// Print mode this signal asks for.
    pub fn print_mode(self) -> bool {
        match self {
            Self::PrintStart => true,
            Self::PrintEnd => false,
            Self::MediaChange { matches } => matches,
        }
    }
}

/// The four places a handler can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Window `beforeprint`
    PrintStart,
    /// Window `afterprint`
    PrintEnd,
    /// Media query `addEventListener("change")`
    MediaChange,
    /// Media query `addListener` (legacy form)
    MediaListener,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::PrintStart,
        Channel::PrintEnd,
        Channel::MediaChange,
        Channel::MediaListener,
    ];
}

/// Which media-query change registration the platform supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRegistration {
    /// `MediaQueryList.addEventListener`
    EventListener,
    /// `MediaQueryList.addListener`
    LegacyListener,
    /// Neither; only `beforeprint`/`afterprint` are available
    Unavailable,
}

impl MediaRegistration {
    pub fn channel(self) -> Option<Channel> {
        match self {
            Self::EventListener => Some(Channel::MediaChange),
            Self::LegacyListener => Some(Channel::MediaListener),
            Self::Unavailable => None,
        }
    }
}

/// Handle returned by [`PrintPlatform::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub type SignalHandler = Rc<dyn Fn(PrintSignal)>;
pub type FrameTask = Box<dyn FnOnce()>;

/// Everything the synchronizer needs from its host.
pub trait PrintPlatform {
    /// Media registration form available on this platform.
    fn media_registration(&self) -> MediaRegistration;

    /// Register `handler` on `channel`.
    fn subscribe(&self, channel: Channel, handler: SignalHandler) -> Result<SubscriptionId>;

    /// Remove a registration. Unknown ids are ignored.
    fn unsubscribe(&self, channel: Channel, id: SubscriptionId);

    /// Run `task` at the next rendering opportunity, never synchronously.
    fn request_frame(&self, task: FrameTask) -> Result<()>;

    /// Emit a synthetic container-resize signal.
    fn dispatch_resize(&self) -> Result<()>;
}
