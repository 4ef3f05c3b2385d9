//! Simulation state
//!
//! Everything the animation mutates between frames lives here, owned by one
//! mounted controller. Nothing in this module performs I/O.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{BurstParticle, Star, make_burst_particle, make_stars};
use crate::config::StarfieldConfig;
use crate::surface::Viewport;

/// Live stars, bursts and pointer for one mounted surface
#[derive(Debug, Clone)]
pub struct Simulation {
    config: StarfieldConfig,
    viewport: Viewport,
    /// Background stars, `config.star_count` of them
    pub stars: Vec<Star>,
    /// Live burst particles, oldest first
    pub bursts: Vec<BurstParticle>,
    /// Latest pointer/touch position
    pointer: Vec2,
    rng: Pcg32,
}

impl Simulation {
    /// Build the initial star population with the pointer at the center.
    /// `config` is used as given; see `StarfieldConfig::sanitized`.
    pub fn new(config: StarfieldConfig, viewport: Viewport, seed: u64) -> Self {
        let mut sim = Self {
            config,
            viewport,
            stars: Vec::new(),
            bursts: Vec::new(),
            pointer: viewport.center(),
            rng: Pcg32::seed_from_u64(seed),
        };
        sim.populate_stars();
        sim
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Replace every star with a fresh population sized to the viewport
    pub fn populate_stars(&mut self) {
        self.stars = make_stars(&mut self.rng, self.viewport, &self.config);
    }

    /// New surface size; stars are regenerated, bursts keep aging untouched
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.populate_stars();
        log::debug!(
            "Starfield resized to {}x{}, {} stars",
            viewport.width,
            viewport.height,
            self.stars.len()
        );
    }

    /// Overwrite the parallax target
    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Append a batch of `burst_size` particles at `origin`
    pub fn spawn_burst(&mut self, origin: Vec2) {
        let count = match self.config.max_bursts {
            Some(cap) => self.config.burst_size.min(cap),
            None => self.config.burst_size,
        };
        self.bursts.reserve(count);
        for _ in 0..count {
            let particle = make_burst_particle(&mut self.rng, origin, &self.config);
            self.bursts.push(particle);
        }

        if let Some(cap) = self.config.max_bursts {
            if self.bursts.len() > cap {
                // Remove oldest particles to make room
                let excess = self.bursts.len() - cap;
                self.bursts.drain(..excess);
            }
        }

        log::debug!(
            "Burst at ({:.0}, {:.0}), {} live particles",
            origin.x,
            origin.y,
            self.bursts.len()
        );
    }

    /// Split borrow used by the frame step
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut Vec<Star>, &mut Vec<BurstParticle>, &mut Pcg32) {
        (&mut self.stars, &mut self.bursts, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_BURST_SIZE;
    use proptest::prelude::*;

    fn sim(config: StarfieldConfig) -> Simulation {
        Simulation::new(config, Viewport::new(800.0, 600.0), 12345)
    }

    #[test]
    fn test_new_populates_and_centers_pointer() {
        let sim = sim(StarfieldConfig::default());
        assert_eq!(sim.stars.len(), 200);
        assert!(sim.bursts.is_empty());
        assert_eq!(sim.pointer(), Vec2::new(400.0, 300.0));
        for layer in 0..4 {
            assert_eq!(sim.stars.iter().filter(|s| s.layer == layer).count(), 50);
        }
    }

    #[test]
    fn test_spawn_burst_appends_batch() {
        let mut sim = sim(StarfieldConfig::default());
        sim.spawn_burst(Vec2::new(10.0, 20.0));
        sim.spawn_burst(Vec2::new(30.0, 40.0));
        assert_eq!(sim.bursts.len(), 30);
        assert!(sim.bursts[..15].iter().all(|p| p.pos == Vec2::new(10.0, 20.0)));
        assert!(sim.bursts[15..].iter().all(|p| p.pos == Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn test_burst_cap_evicts_oldest() {
        let mut sim = sim(StarfieldConfig {
            max_bursts: Some(20),
            ..Default::default()
        });
        sim.spawn_burst(Vec2::new(1.0, 1.0));
        sim.spawn_burst(Vec2::new(2.0, 2.0));
        assert_eq!(sim.bursts.len(), 20);
        // Ten oldest evicted: 5 of the first burst remain, all 15 of the second
        assert_eq!(
            sim.bursts.iter().filter(|p| p.pos == Vec2::new(1.0, 1.0)).count(),
            5
        );
        assert_eq!(
            sim.bursts.iter().filter(|p| p.pos == Vec2::new(2.0, 2.0)).count(),
            15
        );
    }

    #[test]
    fn test_resize_replaces_stars_keeps_bursts_and_pointer() {
        let mut sim = sim(StarfieldConfig::default());
        sim.set_pointer(Vec2::new(5.0, 6.0));
        sim.spawn_burst(Vec2::new(100.0, 100.0));
        let bursts_before = sim.bursts.clone();

        sim.resize(Viewport::new(400.0, 300.0));

        assert_eq!(sim.viewport(), Viewport::new(400.0, 300.0));
        assert_eq!(sim.stars.len(), 200);
        assert!(
            sim.stars
                .iter()
                .all(|s| s.pos.x >= 0.0 && s.pos.x < 400.0 && s.pos.y >= 0.0 && s.pos.y < 300.0)
        );
        assert_eq!(sim.bursts, bursts_before);
        assert_eq!(sim.pointer(), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_huge_burst_size_is_bounded() {
        let config =
            StarfieldConfig::from_json(r#"{"burstSize": 18446744073709551615, "maxBursts": 10}"#)
                .unwrap();
        let mut capped = sim(config);
        capped.spawn_burst(Vec2::new(1.0, 1.0));
        assert_eq!(capped.bursts.len(), 10);

        // Without a cap the configured size is still clamped on load
        let config = StarfieldConfig::from_json(r#"{"burstSize": 18446744073709551615}"#).unwrap();
        let mut uncapped = sim(config);
        uncapped.spawn_burst(Vec2::new(1.0, 1.0));
        assert_eq!(uncapped.bursts.len(), MAX_BURST_SIZE);
    }

    #[test]
    fn test_cap_limits_particles_created_per_burst() {
        // Never sanitized: the cap alone bounds the batch
        let mut sim = sim(StarfieldConfig {
            burst_size: usize::MAX,
            max_bursts: Some(25),
            ..Default::default()
        });
        sim.spawn_burst(Vec2::ZERO);
        assert_eq!(sim.bursts.len(), 25);
        assert!(sim.bursts.capacity() < 1_000);
    }

    #[test]
    fn test_new_takes_config_as_given() {
        let config = StarfieldConfig {
            layers: 0,
            star_count: 7,
            ..Default::default()
        };
        let sim = sim(config.clone());
        assert_eq!(sim.config(), &config);
        assert_eq!(sim.stars.len(), 7);
        assert!(sim.stars.iter().all(|s| s.layer == 0));
    }

    #[test]
    fn test_zero_burst_size_spawns_nothing() {
        let mut sim = sim(StarfieldConfig {
            burst_size: 0,
            ..Default::default()
        });
        sim.spawn_burst(Vec2::ZERO);
        assert!(sim.bursts.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn resize_keeps_count_and_even_layers(
            seed in any::<u64>(),
            star_count in 0usize..600,
            layers in 1usize..12,
            width in 1.0f32..2000.0,
            height in 1.0f32..2000.0,
        ) {
            let config = StarfieldConfig { star_count, layers, ..Default::default() };
            let mut sim = Simulation::new(config, Viewport::new(800.0, 600.0), seed);
            sim.resize(Viewport::new(width, height));

            prop_assert_eq!(sim.stars.len(), star_count);
            let per_layer: Vec<usize> = (0..layers)
                .map(|l| sim.stars.iter().filter(|s| s.layer == l).count())
                .collect();
            let (min, max) = (per_layer.iter().min(), per_layer.iter().max());
            prop_assert!(max.zip(min).is_some_and(|(max, min)| max - min <= 1));
            for star in &sim.stars {
                prop_assert!(star.pos.x >= 0.0 && star.pos.x < width);
                prop_assert!(star.pos.y >= 0.0 && star.pos.y < height);
            }
        }
    }
}
