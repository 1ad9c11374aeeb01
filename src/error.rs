//! Error types for the simulation core
//!
//! Every failure here is a configuration or programming error. Nothing is
//! retried: callers are expected to halt.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid field dimensions, masses or rate constants.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A particle left the finite domain after a tick.
    #[error("non-finite {quantity} on particle {index} at tick {tick}")]
    NumericInstability {
        tick: u64,
        index: usize,
        quantity: &'static str,
    },

    /// Reading a configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid JSON for `SimConfig`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::Config(msg.into())
    }
}
