//! Simulation configuration
//!
//! Fixed at start. Loaded from JSON or built from defaults, then validated
//! before the first tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Half-open mass range `[min, max)` for new particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassRange {
    pub min: f64,
    pub max: f64,
}

impl Default for MassRange {
    fn default() -> Self {
        Self {
            min: MASS_MIN,
            max: MASS_MAX,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Field ===
    /// Field width (x wraps at this value)
    pub width: f64,
    /// Field height (y wraps at this value)
    pub height: f64,

    // === Physics ===
    /// Gravitational constant
    pub gravity: f64,
    /// Softening length
    pub softening: f64,
    /// Velocity multiplier per tick, in (0, 1]
    pub friction: f64,

    // === Heat ===
    /// Heat effect threshold and gain rate
    pub heat_gain_rate: f64,
    /// Heat multiplier on non-gain ticks, in (0, 1]
    pub cooling_factor: f64,

    // === Population ===
    pub initial_particles: usize,
    pub mass_range: MassRange,
    /// Initial velocity bound per axis
    pub initial_speed: f64,
    /// Pointer displacement to velocity
    pub spawn_velocity_scale: f64,

    // === Scheduling ===
    /// Ticks per second
    pub tick_rate: f64,
    /// RNG seed for the initial population and spawn masses
    pub seed: u64,
    /// Population at which the force pass runs on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,

            gravity: GRAVITY,
            softening: SOFTENING,
            friction: FRICTION,

            heat_gain_rate: HEAT_GAIN_RATE,
            cooling_factor: COOLING_FACTOR,

            initial_particles: INITIAL_PARTICLES,
            mass_range: MassRange::default(),
            initial_speed: INITIAL_SPEED,
            spawn_velocity_scale: SPAWN_VELOCITY_SCALE,

            tick_rate: TICK_RATE,
            seed: 0,
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

fn require(ok: bool, msg: impl FnOnce() -> String) -> Result<()> {
    if ok { Ok(()) } else { Err(SimError::config(msg())) }
}

impl SimConfig {
    /// Empty field with the given seed (no initial population)
    pub fn empty(seed: u64) -> Self {
        Self {
            initial_particles: 0,
            seed,
            ..Self::default()
        }
    }

    /// Fixed timestep in seconds
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate
    }

    /// Reject configurations that would make a tick undefined
    pub fn validate(&self) -> Result<()> {
        require(self.width.is_finite() && self.width > 0.0, || {
            format!("field width must be positive, got {}", self.width)
        })?;
        require(self.height.is_finite() && self.height > 0.0, || {
            format!("field height must be positive, got {}", self.height)
        })?;
        require(self.gravity.is_finite(), || {
            format!("gravity must be finite, got {}", self.gravity)
        })?;
        require(self.softening.is_finite() && self.softening > 0.0, || {
            format!("softening must be positive, got {}", self.softening)
        })?;
        require(self.friction > 0.0 && self.friction <= 1.0, || {
            format!("friction must be in (0, 1], got {}", self.friction)
        })?;
        require(self.heat_gain_rate.is_finite() && self.heat_gain_rate >= 0.0, || {
            format!("heat gain rate must be non-negative, got {}", self.heat_gain_rate)
        })?;
        require(self.cooling_factor > 0.0 && self.cooling_factor <= 1.0, || {
            format!("cooling factor must be in (0, 1], got {}", self.cooling_factor)
        })?;
        let MassRange { min, max } = self.mass_range;
        require(min.is_finite() && max.is_finite() && min > 0.0 && max > min, || {
            format!("mass range must satisfy 0 < min < max, got [{min}, {max})")
        })?;
        require(self.initial_speed.is_finite() && self.initial_speed >= 0.0, || {
            format!("initial speed must be non-negative, got {}", self.initial_speed)
        })?;
        require(self.spawn_velocity_scale.is_finite(), || {
            format!("spawn velocity scale must be finite, got {}", self.spawn_velocity_scale)
        })?;
        require(self.tick_rate.is_finite() && self.tick_rate > 0.0, || {
            format!("tick rate must be positive, got {}", self.tick_rate)
        })?;
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
