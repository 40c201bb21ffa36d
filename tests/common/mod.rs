//! Common test doubles for the platform seams.
//!
//! - `FakePlatform`: records subscriptions, queues frame tasks until the test
//!   runs them, and counts synthetic resizes
//! - `FakeRasterizer` / `RecordingSink` / `CountingPrinter`: export seams
//! - `RecordingSurface`: a chart surface that remembers what it was asked to draw
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use qiposter::config::ExportOptions;
use qiposter::error::{PosterError, Result};
use qiposter::export::{DownloadSink, ExportArtifact, PrintInvoker, Rasterizer, PNG_SIGNATURE};
use qiposter::render::{ChartParams, ChartSurface};
use qiposter::sync::{
    Channel, FrameTask, MediaRegistration, PrintPlatform, PrintSignal, SignalHandler,
    SubscriptionId,
};
use qiposter::types::RenderKey;

// ============================================================================
// Print platform
// ============================================================================

pub struct FakePlatform {
    registration: MediaRegistration,
    fail_on: Option<Channel>,
    fail_frames: bool,
    fail_resize: bool,
    handlers: RefCell<Vec<(SubscriptionId, Channel, SignalHandler)>>,
    frames: RefCell<VecDeque<FrameTask>>,
    next_id: Cell<u64>,
    resizes: Cell<u32>,
    removed: RefCell<Vec<Channel>>,
}

impl FakePlatform {
    pub fn new(registration: MediaRegistration) -> Rc<Self> {
        Rc::new(Self {
            registration,
            fail_on: None,
            fail_frames: false,
            fail_resize: false,
            handlers: RefCell::new(Vec::new()),
            frames: RefCell::new(VecDeque::new()),
            next_id: Cell::new(1),
            resizes: Cell::new(0),
            removed: RefCell::new(Vec::new()),
        })
    }

    /// A platform whose `subscribe` fails for `channel`.
    pub fn failing(registration: MediaRegistration, channel: Channel) -> Rc<Self> {
        let mut platform = Self::new(registration);
        Rc::get_mut(&mut platform).unwrap().fail_on = Some(channel);
        platform
    }

    /// A platform that cannot schedule frame tasks.
    pub fn without_frames(registration: MediaRegistration) -> Rc<Self> {
        let mut platform = Self::new(registration);
        Rc::get_mut(&mut platform).unwrap().fail_frames = true;
        platform
    }

    /// A platform whose synthetic resize dispatch fails.
    pub fn without_resize(registration: MediaRegistration) -> Rc<Self> {
        let mut platform = Self::new(registration);
        Rc::get_mut(&mut platform).unwrap().fail_resize = true;
        platform
    }

    /// Deliver `signal` to every handler on `channel`. Returns how many ran.
    pub fn emit(&self, channel: Channel, signal: PrintSignal) -> usize {
        let handlers: Vec<SignalHandler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(_, c, _)| *c == channel)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in &handlers {
            handler(signal);
        }
        handlers.len()
    }

    pub fn print_start(&self) -> usize {
        self.emit(Channel::PrintStart, PrintSignal::PrintStart)
    }

    pub fn print_end(&self) -> usize {
        self.emit(Channel::PrintEnd, PrintSignal::PrintEnd)
    }

    /// Media change on whichever media channel this platform offers.
    pub fn media_change(&self, matches: bool) -> usize {
        match self.registration.channel() {
            Some(channel) => self.emit(channel, PrintSignal::MediaChange { matches }),
            None => 0,
        }
    }

    /// A handler registered on `channel`, kept past its removal.
    pub fn handler_for(&self, channel: Channel) -> Option<SignalHandler> {
        self.handlers
            .borrow()
            .iter()
            .find(|(_, c, _)| *c == channel)
            .map(|(_, _, h)| Rc::clone(h))
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Run queued frame tasks, including any they queue. Returns how many ran.
    pub fn run_frames(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.frames.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }

    pub fn resizes(&self) -> u32 {
        self.resizes.get()
    }

    /// Channels with a live registration, in registration order.
    pub fn live(&self) -> Vec<Channel> {
        self.handlers.borrow().iter().map(|(_, c, _)| *c).collect()
    }

    pub fn removed(&self) -> Vec<Channel> {
        self.removed.borrow().clone()
    }
}

impl PrintPlatform for FakePlatform {
    fn media_registration(&self) -> MediaRegistration {
        self.registration
    }

    fn subscribe(&self, channel: Channel, handler: SignalHandler) -> Result<SubscriptionId> {
        if self.fail_on == Some(channel) {
            return Err(PosterError::Subscribe(format!("{channel:?} refused")));
        }
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, channel, handler));
        Ok(id)
    }

    fn unsubscribe(&self, channel: Channel, id: SubscriptionId) {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(i, _, _)| *i != id);
        if handlers.len() != before {
            self.removed.borrow_mut().push(channel);
        }
    }

    fn request_frame(&self, task: FrameTask) -> Result<()> {
        if self.fail_frames {
            return Err(PosterError::Dom("requestAnimationFrame unavailable".into()));
        }
        self.frames.borrow_mut().push_back(task);
        Ok(())
    }

    fn dispatch_resize(&self) -> Result<()> {
        if self.fail_resize {
            return Err(PosterError::Dom("dispatchEvent refused".into()));
        }
        self.resizes.set(self.resizes.get() + 1);
        Ok(())
    }
}

// ============================================================================
// Export
// ============================================================================

/// Stand-in for the poster root element.
#[derive(Debug, Clone)]
pub struct FakeTarget {
    pub attached: bool,
    pub width: u32,
    pub height: u32,
}

impl FakeTarget {
    pub fn poster() -> Self {
        Self {
            attached: true,
            width: 1984,
            height: 1400,
        }
    }

    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::poster()
        }
    }
}

/// Minimal PNG: signature, IHDR header, and a trailing byte that tells
/// artifacts from different calls apart.
pub fn fake_png(width: u32, height: u32, nonce: u8) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.push(nonce);
    bytes
}

#[derive(Default)]
pub struct FakeRasterizer {
    pub calls: Cell<u32>,
    pub last_options: RefCell<Option<ExportOptions>>,
    /// Fail every call with this message, e.g. a tainted canvas
    pub fail: Option<String>,
}

impl Rasterizer for FakeRasterizer {
    type Target = FakeTarget;

    async fn rasterize(&self, target: &FakeTarget, options: &ExportOptions) -> Result<ExportArtifact> {
        self.calls.set(self.calls.get() + 1);
        *self.last_options.borrow_mut() = Some(options.clone());
        if let Some(message) = &self.fail {
            return Err(PosterError::Rasterize(message.clone()));
        }
        if !target.attached || target.width == 0 || target.height == 0 {
            return Err(PosterError::Detached);
        }
        let scale = |v: u32| (f64::from(v) * options.pixel_ratio).round() as u32;
        ExportArtifact::from_png(fake_png(
            scale(target.width),
            scale(target.height),
            self.calls.get() as u8,
        ))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub downloads: RefCell<Vec<(String, Vec<u8>)>>,
    pub fail: bool,
}

impl DownloadSink for RecordingSink {
    fn deliver(&self, file_name: &str, artifact: &ExportArtifact) -> Result<()> {
        if self.fail {
            return Err(PosterError::Dom("download blocked".into()));
        }
        self.downloads
            .borrow_mut()
            .push((file_name.to_string(), artifact.bytes().to_vec()));
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingPrinter {
    pub calls: Cell<u32>,
    pub fail: bool,
}

impl PrintInvoker for CountingPrinter {
    fn print(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(PosterError::Dom("print unavailable".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Chart surface
// ============================================================================

/// One recorded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub key: RenderKey,
    pub active: Option<usize>,
    pub points: usize,
    pub width: f64,
    pub height: f64,
}

#[derive(Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub frames: Rc<RefCell<Vec<Frame>>>,
}

impl ChartSurface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64, _dpr: f64) {
        self.width = width;
        self.height = height;
    }

    fn draw(&mut self, params: &ChartParams) -> Result<()> {
        self.frames.borrow_mut().push(Frame {
            key: params.key,
            active: params.active,
            points: params.layout.points.len(),
            width: self.width,
            height: self.height,
        });
        Ok(())
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}
