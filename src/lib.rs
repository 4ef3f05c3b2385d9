//! Starfield - a drifting, twinkling parallax starfield with pointer bursts
//!
//! Core modules:
//! - `sim`: Simulation state, entity factories and the per-frame step
//! - `bridge`: Pointer/touch/resize events mapped onto simulation mutations
//! - `lifecycle`: Mount/unmount controller driving the frame loop
//! - `platform`: Browser (Canvas 2D) and headless hosts
//! - `config`: Tunable options, loadable from JSON

pub mod bridge;
pub mod color;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod platform;
pub mod random;
pub mod sim;
pub mod surface;

pub use bridge::{EventKind, InputEvent, PointerInput};
pub use color::{Rgb, Rgba};
pub use config::{ShapeMode, StarfieldConfig};
pub use error::{ConfigError, MountError};
pub use lifecycle::{FrameHandle, Host, ListenerHandle, Starfield};
pub use surface::{Glow, RecordingSurface, Surface, Viewport};

use glam::Vec2;

/// Animation constants
pub mod consts {
    /// Stars per surface
    pub const STAR_COUNT: usize = 200;
    /// Depth layers the stars are split across
    pub const LAYERS: usize = 4;
    /// Particles spawned per click/tap
    pub const BURST_SIZE: usize = 15;
    /// Largest accepted `starCount`
    pub const MAX_STAR_COUNT: usize = 10_000;
    /// Largest accepted `burstSize`
    pub const MAX_BURST_SIZE: usize = 1_000;

    /// Parallax shift per pixel of pointer displacement, per layer
    pub const PARALLAX_STRENGTH: f32 = 0.008;
    /// Divisor applied to the frame timestamp (ms) inside the twinkle sine
    pub const TWINKLE_PERIOD_MS: f64 = 500.0;

    /// Star radius range at layer 0, and growth per layer
    pub const STAR_RADIUS_MIN: f32 = 0.5;
    pub const STAR_RADIUS_MAX: f32 = 1.5;
    pub const STAR_RADIUS_MIN_PER_LAYER: f32 = 0.2;
    pub const STAR_RADIUS_MAX_PER_LAYER: f32 = 0.5;
    /// Star base opacity band
    pub const STAR_ALPHA_MIN: f32 = 0.4;
    pub const STAR_ALPHA_MAX: f32 = 1.0;
    /// Horizontal drift (pixels/frame) of the nearest and farthest layer
    pub const DRIFT_SPEED_MIN: f32 = 0.1;
    pub const DRIFT_SPEED_MAX: f32 = 0.25;

    /// Burst particle launch speed (pixels/frame)
    pub const BURST_SPEED_MIN: f32 = 1.0;
    pub const BURST_SPEED_MAX: f32 = 3.0;
    /// Burst particle initial radius
    pub const BURST_RADIUS_MIN: f32 = 1.0;
    pub const BURST_RADIUS_MAX: f32 = 3.0;
    /// Per-frame multiplicative decay
    pub const BURST_RADIUS_DECAY: f32 = 0.95;
    pub const BURST_ALPHA_DECAY: f32 = 0.92;
    /// A burst particle survives only while strictly above both thresholds
    pub const BURST_MIN_ALPHA: f32 = 0.03;
    pub const BURST_MIN_RADIUS: f32 = 0.1;

    /// Glow gradient reaches this many radii from the center
    pub const GLOW_SCALE: f32 = 4.0;
    /// Gradient offset of the entity-colored middle stop
    pub const GLOW_COLOR_STOP: f32 = 0.3;
}

/// Unit vector pointing at `angle` radians
#[inline]
pub fn unit_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
