//! Simulation state
//!
//! Owns the particle store for the lifetime of a run together with the solver,
//! integrator and seeded RNG derived from the validated configuration.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::integrator::Integrator;
use super::particle::{Particle, ParticleStore};
use super::solver::ForceFieldSolver;
use super::tick::SpawnRequest;
use crate::error::Result;
use crate::settings::SimConfig;

#[derive(Debug, Clone)]
pub struct SimState {
    /// Configuration the state was built from (read-only after construction)
    config: SimConfig,
    /// All particles, in spawn order
    pub store: ParticleStore,
    /// Simulation tick counter
    pub time_ticks: u64,
    solver: ForceFieldSolver,
    integrator: Integrator,
    rng: Pcg32,
}

impl SimState {
    /// Validate the configuration and seed the initial population
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut state = Self::empty(config)?;

        let count = state.config.initial_particles;
        let (width, height) = (state.config.width, state.config.height);
        let speed = state.config.initial_speed;
        for _ in 0..count {
            let pos = DVec2::new(
                state.rng.random_range(0.0..width),
                state.rng.random_range(0.0..height),
            );
            let mass = state.random_mass();
            let vel = if speed > 0.0 {
                DVec2::new(
                    state.rng.random_range(-speed..speed),
                    state.rng.random_range(-speed..speed),
                )
            } else {
                DVec2::ZERO
            };
            state.store.append(Particle::new(pos, vel, mass)?)?;
        }

        log::info!(
            "Seeded {} particles on a {}x{} field (seed {})",
            count,
            width,
            height,
            state.config.seed
        );
        Ok(state)
    }

    /// Build a state from explicit particles, ignoring `initial_particles`
    pub fn with_particles(
        config: SimConfig,
        particles: impl IntoIterator<Item = Particle>,
    ) -> Result<Self> {
        let mut state = Self::empty(config)?;
        for mut particle in particles {
            particle.pos = state.integrator.wrap(particle.pos);
            state.store.append(particle)?;
        }
        Ok(state)
    }

    fn empty(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: ParticleStore::with_capacity(config.initial_particles),
            time_ticks: 0,
            solver: ForceFieldSolver::from_config(&config),
            integrator: Integrator::from_config(&config),
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn solver(&self) -> &ForceFieldSolver {
        &self.solver
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    /// Draw a mass from the configured range
    pub fn random_mass(&mut self) -> f64 {
        let range = self.config.mass_range;
        self.rng.random_range(range.min..range.max)
    }

    /// Append a particle for a pointer spawn request, returning its index
    pub fn spawn(&mut self, request: SpawnRequest) -> Result<usize> {
        let pos = self.integrator.wrap(request.position);
        let vel = request.velocity_hint * self.config.spawn_velocity_scale;
        let mass = self.random_mass();
        let index = self.store.append(Particle::new(pos, vel, mass)?)?;
        log::debug!(
            "Spawned particle {} at ({:.1}, {:.1}) mass {:.0}",
            index,
            pos.x,
            pos.y,
            mass
        );
        Ok(index)
    }

    /// Split borrow for the tick pipeline
    pub(crate) fn pipeline(&mut self) -> (&ForceFieldSolver, &Integrator, &mut [Particle]) {
        (&self.solver, &self.integrator, self.store.as_mut_slice())
    }
}
