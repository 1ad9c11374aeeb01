//! Forward-Euler integration with friction and toroidal wraparound

use glam::DVec2;

use super::particle::Particle;
use crate::settings::SimConfig;
use crate::wrap_coord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    /// Velocity multiplier per tick
    pub friction: f64,
    pub width: f64,
    pub height: f64,
}

impl Integrator {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            friction: config.friction,
            width: config.width,
            height: config.height,
        }
    }

    /// Wrap a point into the field
    #[inline]
    pub fn wrap(&self, pos: DVec2) -> DVec2 {
        DVec2::new(wrap_coord(pos.x, self.width), wrap_coord(pos.y, self.height))
    }

    /// Advance one tick using forces from a completed force pass
    pub fn apply(&self, particles: &mut [Particle], forces: &[DVec2]) {
        debug_assert_eq!(particles.len(), forces.len());
        for (p, &force) in particles.iter_mut().zip(forces) {
            p.vel += force / p.mass();
            p.vel *= self.friction;
            p.pos = self.wrap(p.pos + p.vel);
        }
    }
}
