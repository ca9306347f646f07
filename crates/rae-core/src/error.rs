//! Error Types
//!
//! Configuration errors are rejected before a run starts; invariant
//! violations abort a run. Degenerate states (empty cohorts, empty clusters,
//! agents never chosen as supplier) are handled in place and never surface here.

use thiserror::Error;

use rae_events::AgentId;

use crate::config::ConfigError;

/// A simulation parameter violates a constraint.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("strategic agent count {strategic} exceeds total agent count {total}")]
    StrategicExceedsTotal { strategic: usize, total: usize },

    #[error("honest agent count {honest} exceeds total agent count {total}")]
    HonestExceedsTotal { honest: usize, total: usize },

    #[error("min_suppliers ({min}) is greater than max_suppliers ({max})")]
    SupplierBoundsInverted { min: usize, max: usize },

    #[error("max_suppliers ({max}) must be smaller than the population size ({population})")]
    SupplierBoundExceedsPopulation { max: usize, population: usize },

    #[error("shape exponent {name} must be positive and finite, got {value}")]
    NonPositiveExponent { name: &'static str, value: f64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("runs must be at least 1")]
    ZeroRuns,
}

/// Errors surfaced by the engine and its output collaborators.
#[derive(Debug, Error)]
pub enum RaeError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("config file error: {0}")]
    Config(#[from] ConfigError),

    /// The three statistics series must always have equal length.
    #[error(
        "statistics series length mismatch: honest={honest}, strategic={strategic}, influence={influence}"
    )]
    SeriesLengthMismatch {
        honest: usize,
        strategic: usize,
        influence: usize,
    },

    /// Ids are dense; an entry naming an agent outside the population means
    /// the round and the population have come apart.
    #[error("{id} is not in the population of {population} agents")]
    UnknownAgent { id: AgentId, population: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
