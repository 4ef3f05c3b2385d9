//! Drawing surface abstraction
//!
//! The frame step only ever clears the surface and paints glows, so that is
//! all a host has to implement.

use glam::Vec2;

use crate::color::{Rgb, Rgba};
use crate::consts::{GLOW_COLOR_STOP, GLOW_SCALE};
use crate::random::Shape;

/// Surface dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Backing-store size in whole pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}

/// One color stop of a radial gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// A glowing dot: a radial gradient filling a small shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub center: Vec2,
    /// Radius of the filled shape
    pub radius: f32,
    /// Alpha of the white core
    pub alpha: f32,
    pub color: Rgb,
    pub shape: Shape,
}

impl Glow {
    /// Outer radius of the gradient
    pub fn halo_radius(&self) -> f32 {
        self.radius * GLOW_SCALE
    }

    /// White core, entity color, transparent rim
    pub fn stops(&self) -> [GradientStop; 3] {
        [
            GradientStop {
                offset: 0.0,
                color: Rgb::WHITE.with_alpha(self.alpha),
            },
            GradientStop {
                offset: GLOW_COLOR_STOP,
                color: self.color.with_alpha(1.0),
            },
            GradientStop {
                offset: 1.0,
                color: Rgb::WHITE.with_alpha(0.0),
            },
        ]
    }
}

/// Immediate-mode 2D target
pub trait Surface {
    fn size(&self) -> Viewport;
    /// Resize the backing store
    fn set_size(&mut self, viewport: Viewport);
    /// Erase everything painted so far
    fn clear(&mut self);
    fn fill_glow(&mut self, glow: &Glow);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Glow(Glow),
}

/// In-memory surface holding the draw calls since the last clear
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Viewport,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Glows painted since the last clear
    pub fn glows(&self) -> impl Iterator<Item = &Glow> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Glow(g) => Some(g),
            DrawCommand::Clear => None,
        })
    }

    /// Number of clears seen, one per frame
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn set_size(&mut self, viewport: Viewport) {
        self.size = viewport;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_glow(&mut self, glow: &Glow) {
        self.commands.push(DrawCommand::Glow(*glow));
    }
}
