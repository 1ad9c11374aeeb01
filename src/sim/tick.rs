//! Fixed simulation tick
//!
//! One tick is a strict sequence of phases:
//! pending spawn → force pass on a snapshot → heat → integration → finite check.
//! Nothing from a later phase is visible to an earlier one.

use glam::DVec2;

use super::state::SimState;
use crate::error::{Result, SimError};

/// Request to inject a particle at the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// Field position (wrapped on append)
    pub position: DVec2,
    /// Pointer displacement since the previous frame
    pub velocity_hint: DVec2,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Particle to append before the force pass
    pub spawn: Option<SpawnRequest>,
}

impl TickInput {
    pub fn with_spawn(request: SpawnRequest) -> Self {
        Self {
            spawn: Some(request),
        }
    }
}

/// Summary of a completed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Index of the particle appended this tick
    pub spawned: Option<usize>,
    pub particles: usize,
    pub total_heat: f64,
    pub max_heat: f64,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimState, input: &TickInput) -> Result<TickReport> {
    // Appends land before the snapshot, never during the force pass
    let spawned = match input.spawn {
        Some(request) => Some(state.spawn(request)?),
        None => None,
    };

    state.time_ticks += 1;

    {
        let (solver, integrator, particles) = state.pipeline();
        let sample = solver.solve(particles);
        integrator.apply(particles, &sample.forces);
    }

    if cfg!(debug_assertions) {
        check_finite(state)?;
    }

    let report = TickReport {
        tick: state.time_ticks,
        spawned,
        particles: state.store.count(),
        total_heat: state.store.total_heat(),
        max_heat: state.store.max_heat(),
    };
    log::trace!(
        "tick {}: {} particles, total heat {:.3}, max heat {:.3}",
        report.tick,
        report.particles,
        report.total_heat,
        report.max_heat
    );
    Ok(report)
}

/// Fail on the first particle holding a non-finite value
pub fn check_finite(state: &SimState) -> Result<()> {
    for (index, p) in state.particles().iter().enumerate() {
        if p.is_finite() {
            continue;
        }
        let quantity = if !p.pos.is_finite() {
            "position"
        } else if !p.vel.is_finite() {
            "velocity"
        } else {
            "heat"
        };
        log::error!(
            "Particle {} went non-finite ({}) at tick {}",
            index,
            quantity,
            state.time_ticks
        );
        return Err(SimError::NumericInstability {
            tick: state.time_ticks,
            index,
            quantity,
        });
    }
    Ok(())
}
