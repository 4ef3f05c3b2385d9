//! Bounded random sampling
//!
//! Every helper is total: degenerate ranges and empty palettes produce a
//! fallback value instead of panicking.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::color::Rgb;
use crate::unit_vector;

/// Glow outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Circle,
    Diamond,
}

/// Uniform sample in `[low, high)`; returns `low` when the range is empty
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if low < high {
        rng.random_range(low..high)
    } else {
        low
    }
}

/// Uniformly pick one palette entry
pub fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[Rgb]) -> Rgb {
    if palette.is_empty() {
        return Rgb::WHITE;
    }
    palette[rng.random_range(0..palette.len())]
}

/// Circle or diamond, equally likely
pub fn pick_shape<R: Rng + ?Sized>(rng: &mut R) -> Shape {
    if rng.random_bool(0.5) {
        Shape::Circle
    } else {
        Shape::Diamond
    }
}

/// Unit vector with a uniformly random heading in `[0, 2π)`
pub fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    unit_vector(uniform(rng, 0.0, TAU))
}
