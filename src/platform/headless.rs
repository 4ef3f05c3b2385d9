//! Headless host
//!
//! Frames and events are driven by the caller: `advance` fires the pending
//! frame, `emit` delivers an event only if a matching listener is attached.

use std::collections::BTreeMap;

use crate::bridge::{EventKind, InputEvent};
use crate::error::MountError;
use crate::lifecycle::{FrameHandle, Host, ListenerHandle, Starfield};
use crate::surface::{RecordingSurface, Viewport};

/// In-memory host with a recording surface
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    viewport: Viewport,
    seed: u64,
    context_available: bool,
    /// Listener kinds that refuse registration
    failing: Vec<EventKind>,
    pending_frame: Option<FrameHandle>,
    next_frame: i32,
    listeners: BTreeMap<ListenerHandle, EventKind>,
    next_listener: u32,
    frames_requested: u64,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            seed: crate::platform::clock_seed(),
            context_available: true,
            failing: Vec::new(),
            pending_frame: None,
            next_frame: 1,
            listeners: BTreeMap::new(),
            next_listener: 1,
            frames_requested: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Host whose drawing context can never be acquired
    pub fn without_context(mut self) -> Self {
        self.context_available = false;
        self
    }

    /// Host that fails to register listeners of `kind`
    pub fn failing_listener(mut self, kind: EventKind) -> Self {
        self.failing.push(kind);
        self
    }

    /// Change the viewport; callers emit the matching resize event
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }
}

impl Host for HeadlessHost {
    type Surface = RecordingSurface;

    fn acquire_surface(&mut self) -> Result<RecordingSurface, MountError> {
        if self.context_available {
            Ok(RecordingSurface::new(self.viewport))
        } else {
            Err(MountError::ContextUnavailable)
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_frame);
        self.next_frame = self.next_frame.wrapping_add(1);
        self.pending_frame = Some(handle);
        self.frames_requested += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
    }

    fn listen(&mut self, kind: EventKind) -> Result<ListenerHandle, MountError> {
        if self.failing.contains(&kind) {
            return Err(MountError::ListenerFailed(kind.dom_name()));
        }
        let handle = ListenerHandle(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(handle, kind);
        Ok(handle)
    }

    fn unlisten(&mut self, handle: ListenerHandle) {
        if self.listeners.remove(&handle).is_none() {
            log::warn!("Removing unknown listener {:?}", handle);
        }
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

impl Starfield<HeadlessHost> {
    /// Fire the pending frame, if any. Returns whether a frame ran.
    pub fn advance(&mut self, time_ms: f64) -> bool {
        if self.host_mut().take_pending_frame().is_none() {
            return false;
        }
        self.frame(time_ms);
        true
    }

    /// Deliver an event the way a host would: only through an attached listener
    pub fn emit(&mut self, event: InputEvent) -> bool {
        if !self.host().is_listening(event.kind()) {
            return false;
        }
        if let InputEvent::Resize(viewport) = event {
            self.host_mut().set_viewport(viewport);
        }
        self.dispatch(event);
        true
    }
}
