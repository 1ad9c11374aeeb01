//! Particle records and the append-only store that owns them

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// A massive, heat-carrying point in the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Fixed at creation
    mass: f64,
    /// Non-negative, drives color and glow only
    pub heat: f64,
}

impl Particle {
    /// Create a cold particle. Mass must be finite and strictly positive.
    pub fn new(pos: DVec2, vel: DVec2, mass: f64) -> Result<Self> {
        let particle = Self {
            pos,
            vel,
            mass,
            heat: 0.0,
        };
        particle.validate()?;
        Ok(particle)
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Body radius used by the presentation layer
    pub fn body_radius(&self) -> u32 {
        (self.mass.sqrt() / 50.0) as u32
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite() && self.heat.is_finite()
    }

    /// Finite state, positive mass, non-negative heat
    fn validate(&self) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::config(format!(
                "particle mass must be positive, got {}",
                self.mass
            )));
        }
        if !(self.heat.is_finite() && self.heat >= 0.0) {
            return Err(SimError::config(format!(
                "particle heat must be non-negative, got {}",
                self.heat
            )));
        }
        if !(self.pos.is_finite() && self.vel.is_finite()) {
            return Err(SimError::config(format!(
                "particle state must be finite, got pos {} vel {}",
                self.pos,
                self.vel
            )));
        }
        Ok(())
    }
}

/// Contiguous, ordered, growth-only particle collection
///
/// Indices are stable for the lifetime of the store since nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Append a particle, returning its index
    pub fn append(&mut self, particle: Particle) -> Result<usize> {
        // Public fields and deserialization both bypass `Particle::new`
        particle.validate()?;
        self.particles.push(particle);
        Ok(self.particles.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Immutable snapshot for the force pass
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view for the tick pipeline only
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sum of heat across all particles
    pub fn total_heat(&self) -> f64 {
        self.particles.iter().map(|p| p.heat).sum()
    }

    pub fn max_heat(&self) -> f64 {
        self.particles.iter().map(|p| p.heat).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_rejects_bad_mass() {
        assert!(Particle::new(DVec2::ZERO, DVec2::ZERO, 0.0).is_err());
        assert!(Particle::new(DVec2::ZERO, DVec2::ZERO, -3.0).is_err());
        assert!(Particle::new(DVec2::ZERO, DVec2::ZERO, f64::NAN).is_err());
        assert!(Particle::new(DVec2::new(f64::NAN, 0.0), DVec2::ZERO, 1.0).is_err());
        assert!(Particle::new(DVec2::ZERO, DVec2::new(0.0, f64::INFINITY), 1.0).is_err());
        let p = Particle::new(DVec2::new(1.0, 2.0), DVec2::ZERO, 5.0).unwrap();
        assert_eq!(p.mass(), 5.0);
        assert_eq!(p.heat, 0.0);
    }

    #[test]
    fn test_body_radius() {
        let p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1e5).unwrap();
        // sqrt(1e5) / 50 = 6.32
        assert_eq!(p.body_radius(), 6);
        let p = Particle::new(DVec2::ZERO, DVec2::ZERO, 4e3).unwrap();
        assert_eq!(p.body_radius(), 1);
    }

    #[test]
    fn test_append_returns_index_and_grows() {
        let mut store = ParticleStore::new();
        assert!(store.is_empty());
        for i in 0..3 {
            let p = Particle::new(DVec2::splat(i as f64), DVec2::ZERO, 1.0).unwrap();
            assert_eq!(store.append(p).unwrap(), i);
        }
        assert_eq!(store.count(), 3);
        assert_eq!(store.get(1).unwrap().pos, DVec2::splat(1.0));
        assert!(store.get(3).is_none());
    }

    #[test]
    fn test_append_rejects_deserialized_zero_mass() {
        let json = r#"{"pos":[0.0,0.0],"vel":[0.0,0.0],"mass":0.0,"heat":0.0}"#;
        let p: Particle = serde_json::from_str(json).unwrap();
        let mut store = ParticleStore::new();
        assert!(matches!(store.append(p), Err(SimError::Config(_))));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_append_rejects_bad_heat_and_state() {
        let mut store = ParticleStore::new();
        let negative = r#"{"pos":[0.0,0.0],"vel":[0.0,0.0],"mass":1e4,"heat":-1.0}"#;
        let p: Particle = serde_json::from_str(negative).unwrap();
        assert!(matches!(store.append(p), Err(SimError::Config(_))));

        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1e4).unwrap();
        p.heat = f64::INFINITY;
        assert!(matches!(store.append(p), Err(SimError::Config(_))));
        p.heat = 0.0;
        p.pos.x = f64::NAN;
        assert!(matches!(store.append(p), Err(SimError::Config(_))));
        p.pos.x = 0.0;
        p.vel.y = f64::NEG_INFINITY;
        assert!(matches!(store.append(p), Err(SimError::Config(_))));

        assert_eq!(store.count(), 0);
        p.vel.y = 0.0;
        assert_eq!(store.append(p).unwrap(), 0);
    }

    #[test]
    fn test_heat_stats() {
        let mut store = ParticleStore::new();
        for heat in [0.5, 2.0, 1.0] {
            let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0).unwrap();
            p.heat = heat;
            store.append(p).unwrap();
        }
        assert_eq!(store.total_heat(), 3.5);
        assert_eq!(store.max_heat(), 2.0);
    }
}
