//! Per-frame draw lists
//!
//! Reads particle state only. Each particle becomes an optional glow disc
//! followed by its body disc, in store order.

use glam::Vec2;

use super::palette::{Glow, HeatPalette, Rgb};
use super::shapes::{push_disc, segments_for_radius};
use super::vertex::{Vertex, rgba};
use crate::error::Result;
use crate::sim::Particle;

/// Consumer of the particle collection once per tick
pub trait Presenter {
    fn present(&mut self, particles: &[Particle]) -> Result<()>;
}

/// Derived draw parameters for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleVisual {
    pub center: Vec2,
    pub body_radius: u32,
    pub color: Rgb,
    pub glow: Glow,
}

impl ParticleVisual {
    pub fn new(particle: &Particle, palette: &HeatPalette) -> Self {
        Self {
            center: particle.pos.as_vec2(),
            body_radius: particle.body_radius(),
            color: palette.color(particle.heat),
            glow: palette.glow(particle.heat),
        }
    }

    /// Glow disc radius; the glow surrounds the body
    pub fn glow_radius(&self) -> Option<u32> {
        (self.glow.radius > 0).then_some(self.glow.radius + self.body_radius)
    }
}

/// Counters for the last built frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub glowing: usize,
    pub vertices: usize,
}

/// CPU-side frame builder, reusing its vertex buffer between frames
#[derive(Debug, Default)]
pub struct FrameBuilder {
    pub palette: HeatPalette,
    vertices: Vec<Vertex>,
    stats: FrameStats,
}

impl FrameBuilder {
    pub fn new(palette: HeatPalette) -> Self {
        Self {
            palette,
            ..Default::default()
        }
    }

    /// Rebuild the draw list for `particles`
    pub fn build(&mut self, particles: &[Particle]) -> &[Vertex] {
        self.vertices.clear();
        let mut glowing = 0;
        for particle in particles {
            let visual = ParticleVisual::new(particle, &self.palette);
            if let Some(radius) = visual.glow_radius() {
                let radius = radius as f32;
                push_disc(
                    &mut self.vertices,
                    visual.center,
                    radius,
                    rgba(visual.color, visual.glow.alpha),
                    segments_for_radius(radius),
                );
                glowing += 1;
            }
            let body = visual.body_radius as f32;
            push_disc(
                &mut self.vertices,
                visual.center,
                body,
                rgba(visual.color, u8::MAX),
                segments_for_radius(body),
            );
        }
        self.stats = FrameStats {
            particles: particles.len(),
            glowing,
            vertices: self.vertices.len(),
        };
        &self.vertices
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex buffer contents ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

impl Presenter for FrameBuilder {
    fn present(&mut self, particles: &[Particle]) -> Result<()> {
        self.build(particles);
        Ok(())
    }
}
