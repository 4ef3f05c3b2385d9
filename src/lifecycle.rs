//! Mount/unmount controller
//!
//! Owns the simulation and drawing surface for one mounted instance, keeps at
//! most one animation frame pending, and registers each listener exactly once
//! per mount.

use crate::bridge::{EventKind, InputEvent, handle_event};
use crate::config::StarfieldConfig;
use crate::error::MountError;
use crate::sim::{Simulation, step};
use crate::surface::{Surface, Viewport};

/// Opaque id of a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Opaque id of a registered event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u32);

/// Environment the animation is mounted into
pub trait Host {
    type Surface: Surface;

    /// Obtain a 2D drawing surface
    fn acquire_surface(&mut self) -> Result<Self::Surface, MountError>;
    /// Current viewport size
    fn viewport(&self) -> Viewport;
    /// Ask for `Starfield::frame` to be called once, on the next frame
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Start delivering `kind` events to `Starfield::dispatch`
    fn listen(&mut self, kind: EventKind) -> Result<ListenerHandle, MountError>;
    fn unlisten(&mut self, handle: ListenerHandle);
    /// RNG seed for a fresh simulation
    fn seed(&self) -> u64;
}

struct Mounted<S> {
    sim: Simulation,
    surface: S,
    pending_frame: Option<FrameHandle>,
    listeners: Vec<ListenerHandle>,
}

/// The mountable starfield component
pub struct Starfield<H: Host> {
    host: H,
    config: StarfieldConfig,
    mounted: Option<Mounted<H::Surface>>,
}

impl<H: Host> Starfield<H> {
    pub fn new(host: H, config: StarfieldConfig) -> Self {
        Self {
            host,
            config: config.sanitized(),
            mounted: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Live simulation, while mounted
    pub fn simulation(&self) -> Option<&Simulation> {
        self.mounted.as_ref().map(|m| &m.sim)
    }

    /// Drawing surface, while mounted
    pub fn surface(&self) -> Option<&H::Surface> {
        self.mounted.as_ref().map(|m| &m.surface)
    }

    /// Whether a frame is scheduled
    pub fn has_pending_frame(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.pending_frame.is_some())
    }

    /// Acquire the surface, build the stars, attach listeners and start the
    /// frame loop. Mounting twice is a no-op.
    pub fn mount(&mut self) -> Result<(), MountError> {
        if self.mounted.is_some() {
            log::debug!("Starfield already mounted");
            return Ok(());
        }

        let mut surface = match self.host.acquire_surface() {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("Starfield not mounted: {}", e);
                return Err(e);
            }
        };

        let viewport = self.host.viewport();
        surface.set_size(viewport);
        let sim = Simulation::new(self.config.clone(), viewport, self.host.seed());

        let mut listeners = Vec::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            match self.host.listen(kind) {
                Ok(handle) => listeners.push(handle),
                Err(e) => {
                    // Roll back what was attached so far
                    for handle in listeners {
                        self.host.unlisten(handle);
                    }
                    log::warn!("Starfield not mounted: {}", e);
                    return Err(e);
                }
            }
        }

        let pending_frame = self.host.request_frame();
        if pending_frame.is_none() {
            log::error!("Failed to schedule first animation frame");
        }

        log::info!(
            "Starfield mounted at {}x{} with {} stars",
            viewport.width,
            viewport.height,
            sim.stars.len()
        );

        self.mounted = Some(Mounted {
            sim,
            surface,
            pending_frame,
            listeners,
        });
        Ok(())
    }

    /// Run one frame and schedule the next. Ignored when unmounted or when no
    /// frame was requested.
    pub fn frame(&mut self, time_ms: f64) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        if m.pending_frame.take().is_none() {
            return;
        }

        let stats = step(&mut m.sim, &mut m.surface, time_ms);
        log::trace!(
            "frame t={:.0}ms stars={} bursts={} expired={}",
            time_ms,
            stats.stars,
            stats.bursts_drawn,
            stats.bursts_expired
        );

        m.pending_frame = self.host.request_frame();
        if m.pending_frame.is_none() {
            log::error!("Failed to schedule animation frame, loop stopped");
        }
    }

    /// Deliver a host event. Ignored when unmounted.
    pub fn dispatch(&mut self, event: InputEvent) {
        if let Some(m) = self.mounted.as_mut() {
            handle_event(&mut m.sim, &mut m.surface, event);
        }
    }

    /// Stop the frame loop, detach every listener and drop all state. Safe to
    /// call when not mounted.
    pub fn unmount(&mut self) {
        let Some(m) = self.mounted.take() else {
            return;
        };

        if let Some(frame) = m.pending_frame {
            self.host.cancel_frame(frame);
        }
        for handle in m.listeners {
            self.host.unlisten(handle);
        }

        log::info!("Starfield unmounted");
    }
}

impl<H: Host> Drop for Starfield<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
