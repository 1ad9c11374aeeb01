//! Ember Field - a toroidal N-body particle field
//!
//! Core modules:
//! - `sim`: Force/heat solver, integrator and the fixed tick pipeline
//! - `runner`: One-tick-per-frame pacing and stop signal
//! - `platform`: Pointer input translated into spawn requests
//! - `renderer`: Heat palette, glow and CPU-side draw lists
//! - `settings`: Simulation configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::SimConfig;

/// Simulation configuration defaults
pub mod consts {
    /// Field dimensions (toroidal)
    pub const FIELD_WIDTH: f64 = 1024.0;
    pub const FIELD_HEIGHT: f64 = 768.0;

    /// Gravitational constant in field units
    pub const GRAVITY: f64 = 6.674e-5;
    /// Softening length added in quadrature to every separation
    pub const SOFTENING: f64 = 35.0;
    /// Per-tick velocity decay
    pub const FRICTION: f64 = 0.9995;

    /// Heat gain threshold and rate
    pub const HEAT_GAIN_RATE: f64 = 0.05;
    /// Heat multiplier on ticks without gain
    pub const COOLING_FACTOR: f64 = 0.8;
    /// Heat kept after a gain tick (1% passive loss)
    pub const PASSIVE_HEAT_RETENTION: f64 = 0.99;

    /// Initial population
    pub const INITIAL_PARTICLES: usize = 500;
    pub const MASS_MIN: f64 = 4e3;
    pub const MASS_MAX: f64 = 1e5;
    /// Initial velocity range per axis is [-INITIAL_SPEED, INITIAL_SPEED)
    pub const INITIAL_SPEED: f64 = 0.1;
    /// Pointer displacement to spawn velocity
    pub const SPAWN_VELOCITY_SCALE: f64 = 0.1;

    /// Ticks per second
    pub const TICK_RATE: f64 = 60.0;
    /// Population at which the force pass switches to rayon
    pub const PARALLEL_THRESHOLD: usize = 64;
}

/// Wrap a coordinate into `[0, extent)`
///
/// Uses euclidean remainder so negative coordinates wrap from the far edge.
#[inline]
pub fn wrap_coord(value: f64, extent: f64) -> f64 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Shortest signed displacement along a periodic axis (minimum image)
#[inline]
pub fn min_image(delta: f64, extent: f64) -> f64 {
    delta - extent * (delta / extent).round_ties_even()
}
