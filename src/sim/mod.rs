//! Simulation core
//!
//! Everything that moves particles lives here. This module must stay
//! display-free:
//! - One tick per call, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (store order)
//! - No rendering or platform dependencies

pub mod integrator;
pub mod particle;
pub mod solver;
pub mod state;
pub mod tick;

pub use integrator::Integrator;
pub use particle::{Particle, ParticleStore};
pub use solver::{FieldSample, ForceFieldSolver, ForceParams, HeatModel, PairForce};
pub use state::SimState;
pub use tick::{SpawnRequest, TickInput, TickReport, check_finite, tick};
