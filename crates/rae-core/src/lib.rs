//! Reputation/trust Assessment Engine.
//!
//! Simulates trust dynamics in a population of honest and strategic agents
//! exchanging services. Each iteration every agent samples suppliers, rates
//! the service it gets, and the resulting reception estimates are split by
//! 2-means clustering into a fully trusted set and a deflated set.
//!
//! # Modules
//!
//! - [`components`]: Agents, their parameters, and the service/reception policies
//! - [`systems`]: Noise, service exchange, trust aggregation, bisection
//! - [`setup`]: Population construction
//! - [`engine`]: The iteration loop and multi-run averaging
//! - [`output`]: Statistics series, CSV rows, JSON reports
//! - [`sweep`]: The x/y/z goodwill grid
//! - [`config`]: TOML configuration

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod setup;
pub mod sweep;
pub mod systems;

pub use components::{Agent, AgentConfig};
pub use config::{ConfigError, SimulationConfig};
pub use engine::{run_averaged, EngineState, IterationOutcome, SimulationEngine, SimulationOutcome};
pub use error::{ConfigurationError, RaeError};
pub use output::{SimulationReport, SimulationStatistics};
pub use sweep::{run_sweep, SweepCell};
pub use systems::Bisection;
