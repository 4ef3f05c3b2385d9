//! Stars, burst particles and their factories

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::color::Rgb;
use crate::config::{ShapeMode, StarfieldConfig};
use crate::consts::*;
use crate::random::{Shape, pick_color, pick_shape, uniform, unit_direction};
use crate::surface::{Glow, Viewport};

/// A background star
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Opacity before twinkle modulation
    pub alpha: f32,
    /// Horizontal drift (pixels/frame)
    pub speed: f32,
    pub twinkle_phase: f32,
    /// Depth layer, 0 = farthest
    pub layer: usize,
    pub color: Rgb,
}

impl Star {
    /// Distance past either edge at which the star is fully off-surface
    pub fn halo(&self) -> f32 {
        self.radius * GLOW_SCALE
    }

    /// Move right by one frame of drift; once past the right edge, re-enter
    /// from the left at a fresh height
    pub fn drift<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport) {
        self.pos.x += self.speed;
        if self.pos.x > viewport.width + self.halo() {
            self.pos.x = -self.halo();
            self.pos.y = uniform(rng, 0.0, viewport.height);
        }
    }
}

/// A short-lived particle spawned by a click or tap
#[derive(Debug, Clone, PartialEq)]
pub struct BurstParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: Rgb,
    pub shape: Shape,
    /// Frames lived; informational only
    pub age: u32,
}

impl BurstParticle {
    /// Constant-velocity move plus exponential shrink and fade
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.radius *= BURST_RADIUS_DECAY;
        self.alpha *= BURST_ALPHA_DECAY;
        self.age += 1;
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > BURST_MIN_ALPHA && self.radius > BURST_MIN_RADIUS
    }

    pub fn glow(&self) -> Glow {
        Glow {
            center: self.pos,
            radius: self.radius,
            alpha: self.alpha,
            color: self.color,
            shape: self.shape,
        }
    }
}

/// Random star on `layer`; deeper layers are smaller and slower
pub fn make_star<R: Rng + ?Sized>(
    rng: &mut R,
    layer: usize,
    viewport: Viewport,
    config: &StarfieldConfig,
) -> Star {
    let l = layer as f32;
    Star {
        pos: Vec2::new(
            uniform(rng, 0.0, viewport.width),
            uniform(rng, 0.0, viewport.height),
        ),
        radius: uniform(
            rng,
            STAR_RADIUS_MIN + l * STAR_RADIUS_MIN_PER_LAYER,
            STAR_RADIUS_MAX + l * STAR_RADIUS_MAX_PER_LAYER,
        ),
        alpha: uniform(rng, STAR_ALPHA_MIN, STAR_ALPHA_MAX),
        speed: config.drift_speed(layer),
        twinkle_phase: uniform(rng, 0.0, TAU),
        layer,
        color: pick_color(rng, &config.palette),
    }
}

/// Exactly `star_count` stars, split across layers as evenly as possible
pub fn make_stars<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: Viewport,
    config: &StarfieldConfig,
) -> Vec<Star> {
    let layers = config.layers.max(1);
    let per_layer = config.star_count / layers;
    let remainder = config.star_count % layers;

    let mut stars = Vec::with_capacity(config.star_count);
    for layer in 0..layers {
        let count = per_layer + usize::from(layer < remainder);
        for _ in 0..count {
            stars.push(make_star(rng, layer, viewport, config));
        }
    }
    stars
}

/// Random burst particle leaving `origin` at full opacity
pub fn make_burst_particle<R: Rng + ?Sized>(
    rng: &mut R,
    origin: Vec2,
    config: &StarfieldConfig,
) -> BurstParticle {
    let speed = uniform(rng, BURST_SPEED_MIN, BURST_SPEED_MAX);
    BurstParticle {
        pos: origin,
        vel: unit_direction(rng) * speed,
        radius: uniform(rng, BURST_RADIUS_MIN, BURST_RADIUS_MAX),
        alpha: 1.0,
        color: pick_color(rng, &config.palette),
        shape: match config.burst_shapes {
            ShapeMode::Circles => Shape::Circle,
            ShapeMode::Mixed => pick_shape(rng),
        },
        age: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_star_attributes_in_bands() {
        let mut rng = Pcg32::seed_from_u64(42);
        let config = StarfieldConfig::default();
        let vp = Viewport::new(800.0, 600.0);

        for layer in 0..4 {
            for _ in 0..50 {
                let star = make_star(&mut rng, layer, vp, &config);
                let l = layer as f32;
                assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
                assert!(star.pos.y >= 0.0 && star.pos.y < 600.0);
                assert!(star.radius >= 0.5 + 0.2 * l && star.radius < 1.5 + 0.5 * l);
                assert!(star.alpha >= 0.4 && star.alpha < 1.0);
                assert!(star.twinkle_phase >= 0.0 && star.twinkle_phase < TAU);
                assert!(config.palette.contains(&star.color));
                assert_eq!(star.layer, layer);
            }
        }
    }

    #[test]
    fn test_speed_grows_with_layer() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = StarfieldConfig::default();
        let vp = Viewport::new(100.0, 100.0);
        let speeds: Vec<f32> = (0..4)
            .map(|layer| make_star(&mut rng, layer, vp, &config).speed)
            .collect();
        assert!(speeds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_make_stars_uneven_split() {
        let mut rng = Pcg32::seed_from_u64(5);
        let config = StarfieldConfig {
            star_count: 10,
            layers: 4,
            ..Default::default()
        };
        let stars = make_stars(&mut rng, Viewport::new(50.0, 50.0), &config);
        assert_eq!(stars.len(), 10);

        let counts: Vec<usize> = (0..4)
            .map(|l| stars.iter().filter(|s| s.layer == l).count())
            .collect();
        assert_eq!(counts, vec![3, 3, 2, 2]);
    }

    #[test]
    fn test_burst_particle_initial_state() {
        let mut rng = Pcg32::seed_from_u64(9);
        let config = StarfieldConfig::default();
        for _ in 0..100 {
            let p = make_burst_particle(&mut rng, Vec2::new(100.0, 100.0), &config);
            let speed = p.vel.length();
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
            assert!(speed >= 1.0 - 1e-4 && speed < 3.0 + 1e-4);
            assert!(p.radius >= 1.0 && p.radius < 3.0);
            assert_eq!(p.alpha, 1.0);
            assert_eq!(p.age, 0);
            assert_eq!(p.shape, Shape::Circle);
        }
    }

    #[test]
    fn test_mixed_shapes() {
        let mut rng = Pcg32::seed_from_u64(9);
        let config = StarfieldConfig {
            burst_shapes: ShapeMode::Mixed,
            ..Default::default()
        };
        let shapes: Vec<Shape> = (0..60)
            .map(|_| make_burst_particle(&mut rng, Vec2::ZERO, &config).shape)
            .collect();
        assert!(shapes.contains(&Shape::Diamond));
        assert!(shapes.contains(&Shape::Circle));
    }

    #[test]
    fn test_drift_wraps_to_left_edge() {
        let mut rng = Pcg32::seed_from_u64(2);
        let vp = Viewport::new(100.0, 80.0);
        let mut star = Star {
            pos: Vec2::new(107.9, 10.0),
            radius: 2.0,
            alpha: 1.0,
            speed: 0.2,
            twinkle_phase: 0.0,
            layer: 0,
            color: Rgb::WHITE,
        };

        star.drift(&mut rng, vp);
        assert_eq!(star.pos.x, -8.0);
        assert!(star.pos.y >= 0.0 && star.pos.y < 80.0);
    }

    #[test]
    fn test_burst_expires_on_either_threshold() {
        let mut p = BurstParticle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            alpha: 0.031,
            color: Rgb::WHITE,
            shape: Shape::Circle,
            age: 0,
        };
        assert!(p.is_visible());
        p.alpha = 0.03;
        assert!(!p.is_visible());
        p.alpha = 1.0;
        p.radius = 0.1;
        assert!(!p.is_visible());
    }
}
