//! Starfield simulation
//!
//! Pure in-memory state and the per-frame step:
//! - No platform dependencies; painting goes through the `Surface` trait
//! - One RNG per simulation, owned by the state
//! - Mutated only by the frame step and the event bridge

pub mod entity;
pub mod state;
pub mod step;

pub use entity::{BurstParticle, Star, make_burst_particle, make_star, make_stars};
pub use state::Simulation;
pub use step::{FrameStats, parallax_offset, step, twinkle};
