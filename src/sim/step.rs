//! Per-frame simulation step
//!
//! Clears the surface, paints every star and burst particle, then advances
//! them by one frame. Bursts are advanced, painted and expired in a single
//! pass.

use glam::Vec2;

use super::state::Simulation;
use crate::random::Shape;
use crate::surface::{Glow, Surface};

/// What one frame painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub stars: usize,
    pub bursts_drawn: usize,
    pub bursts_expired: usize,
}

/// Depth shift of a star on `layer` for the given pointer displacement
#[inline]
pub fn parallax_offset(pointer: Vec2, center: Vec2, strength: f32, layer: usize) -> Vec2 {
    (pointer - center) * strength * (layer as f32 + 1.0)
}

/// Twinkle intensity in `[0, 1]`, periodic in `time_ms` with period `2π·period_ms`
#[inline]
pub fn twinkle(time_ms: f64, period_ms: f64, phase: f32) -> f32 {
    (0.5 + 0.5 * (time_ms / period_ms + phase as f64).sin()) as f32
}

/// Advance the animation by one frame, painting onto `surface`
pub fn step<S: Surface + ?Sized>(
    sim: &mut Simulation,
    surface: &mut S,
    time_ms: f64,
) -> FrameStats {
    surface.clear();

    let viewport = sim.viewport();
    let center = viewport.center();
    let pointer = sim.pointer();
    let strength = sim.config().parallax_strength;
    let period = sim.config().twinkle_period_ms;

    let (stars, bursts, rng) = sim.parts_mut();

    for star in stars.iter_mut() {
        let offset = parallax_offset(pointer, center, strength, star.layer);
        let alpha = star.alpha * twinkle(time_ms, period, star.twinkle_phase);
        surface.fill_glow(&Glow {
            center: star.pos + offset,
            radius: star.radius,
            alpha,
            color: star.color,
            shape: Shape::Circle,
        });

        star.drift(rng, viewport);
    }

    let live_before = bursts.len();
    bursts.retain_mut(|p| {
        p.advance();
        if p.is_visible() {
            surface.fill_glow(&p.glow());
            true
        } else {
            false
        }
    });

    FrameStats {
        stars: stars.len(),
        bursts_drawn: bursts.len(),
        bursts_expired: live_before - bursts.len(),
    }
}
