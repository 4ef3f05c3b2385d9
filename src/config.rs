//! Starfield configuration
//!
//! Every option has a default, so an empty JSON object (or no config at all)
//! reproduces the stock animation.

use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_PALETTE, Rgb};
use crate::consts::*;
use crate::error::ConfigError;

/// Shapes used for burst particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    /// Round glows only
    #[default]
    Circles,
    /// Circles and diamonds, picked at random per particle
    Mixed,
}

/// Animation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarfieldConfig {
    /// Total number of background stars
    pub star_count: usize,
    /// Depth layers (parallax weight, size and speed grow with layer)
    pub layers: usize,
    /// Particles per click/tap
    pub burst_size: usize,
    /// Colors for stars and bursts
    pub palette: Vec<Rgb>,
    /// Drift speed of layer 0 and of the last layer (pixels/frame)
    pub drift_speed_range: (f32, f32),
    /// Parallax shift per pixel of pointer displacement, per layer
    pub parallax_strength: f32,
    /// Twinkle time divisor in milliseconds
    pub twinkle_period_ms: f64,
    /// Cap on live burst particles; oldest are evicted first. `None` = unbounded
    pub max_bursts: Option<usize>,
    /// Burst particle shapes
    pub burst_shapes: ShapeMode,
    /// CSS background painted behind the canvas
    pub backdrop: String,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            layers: LAYERS,
            burst_size: BURST_SIZE,
            palette: DEFAULT_PALETTE.to_vec(),
            drift_speed_range: (DRIFT_SPEED_MIN, DRIFT_SPEED_MAX),
            parallax_strength: PARALLAX_STRENGTH,
            twinkle_period_ms: TWINKLE_PERIOD_MS,
            max_bursts: None,
            burst_shapes: ShapeMode::Circles,
            backdrop: "black".to_string(),
        }
    }
}

impl StarfieldConfig {
    /// Parse a (possibly partial) JSON config and sanitize it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Read a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Repair values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        if self.star_count > MAX_STAR_COUNT {
            log::warn!("starCount {} too large, using {}", self.star_count, MAX_STAR_COUNT);
            self.star_count = MAX_STAR_COUNT;
        }
        if self.burst_size > MAX_BURST_SIZE {
            log::warn!("burstSize {} too large, using {}", self.burst_size, MAX_BURST_SIZE);
            self.burst_size = MAX_BURST_SIZE;
        }
        if self.layers == 0 {
            log::warn!("layers must be at least 1, using 1");
            self.layers = 1;
        }
        if self.palette.is_empty() {
            log::warn!("empty palette, using default");
            self.palette = DEFAULT_PALETTE.to_vec();
        }

        let (lo, hi) = self.drift_speed_range;
        if !lo.is_finite() || !hi.is_finite() {
            self.drift_speed_range = (DRIFT_SPEED_MIN, DRIFT_SPEED_MAX);
        } else if lo > hi {
            self.drift_speed_range = (hi, lo);
        }

        if !self.parallax_strength.is_finite() {
            self.parallax_strength = PARALLAX_STRENGTH;
        }
        if !self.twinkle_period_ms.is_finite() || self.twinkle_period_ms <= 0.0 {
            self.twinkle_period_ms = TWINKLE_PERIOD_MS;
        }
        self
    }

    /// Drift speed for `layer`, linear from the range start to its end
    pub fn drift_speed(&self, layer: usize) -> f32 {
        let (lo, hi) = self.drift_speed_range;
        if self.layers <= 1 {
            return lo;
        }
        let t = layer.min(self.layers - 1) as f32 / (self.layers - 1) as f32;
        lo + (hi - lo) * t
    }
}
