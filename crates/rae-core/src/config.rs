//! Configuration System
//!
//! Loads simulation parameters from a TOML file for easy adjustment without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::components::agent::AgentConfig;
use crate::error::ConfigurationError;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "rae.toml";

/// Goodwill values swept for each of x, y and z
pub const DEFAULT_SWEEP_VALUES: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    #[serde(default)]
    pub simulation: RunConfig,
    #[serde(default)]
    pub agents: AgentConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Population size and run length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub total_agents: usize,
    pub strategic_agents: usize,
    pub iterations: usize,
    pub seed: u64,
    /// Independent repetitions averaged into one series
    pub runs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_agents: 1000,
            strategic_agents: 0,
            iterations: 8,
            seed: 42,
            runs: 1,
        }
    }
}

/// Grid of goodwill values for the x/y/z sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub values: Vec<f64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            values: DEFAULT_SWEEP_VALUES.to_vec(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn honest_agents(&self) -> usize {
        self.simulation
            .total_agents
            .saturating_sub(self.simulation.strategic_agents)
    }

    /// The immutable per-agent parameter template.
    pub fn agent_config(&self) -> AgentConfig {
        self.agents.clone()
    }

    /// Copy of this config with the three goodwill values replaced.
    pub fn with_goodwill(&self, x: f64, y: f64, z: f64) -> Self {
        let mut config = self.clone();
        config.agents.goodwill_honest_x = x;
        config.agents.goodwill_probability_y = y;
        config.agents.goodwill_reception_z = z;
        config
    }

    /// Human-readable parameter summary, used for titles and file names.
    pub fn label(&self) -> String {
        format!(
            "N={}, S={}, expoA={}, expoG={}, x={}, y={}, z={}, V_0={}",
            self.simulation.total_agents,
            self.simulation.strategic_agents,
            self.agents.expo_a,
            self.agents.expo_g,
            self.agents.goodwill_honest_x,
            self.agents.goodwill_probability_y,
            self.agents.goodwill_reception_z,
            self.agents.start_trust_level,
        )
    }

    /// [`label`](Self::label) flattened into a file-name-safe token string.
    pub fn file_stem(&self) -> String {
        self.label().replace(", ", "_").replace('=', "-")
    }

    /// Check every constraint a run depends on.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let run = &self.simulation;
        if run.strategic_agents > run.total_agents {
            return Err(ConfigurationError::StrategicExceedsTotal {
                strategic: run.strategic_agents,
                total: run.total_agents,
            });
        }
        if run.runs == 0 {
            return Err(ConfigurationError::ZeroRuns);
        }
        self.agents.validate(run.total_agents)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.simulation.total_agents, 1000);
        assert_eq!(config.simulation.iterations, 8);
        assert_eq!(config.agents.min_suppliers, 1);
        assert_eq!(config.sweep.values.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimulationConfig::from_str(
            r#"
            [simulation]
            total_agents = 10
            strategic_agents = 4

            [agents]
            max_suppliers = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.total_agents, 10);
        assert_eq!(config.honest_agents(), 6);
        assert_eq!(config.simulation.iterations, 8);
        assert_eq!(config.agents.max_suppliers, 3);
        assert_eq!(config.agents.goodwill_honest_x, 0.5);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SimulationConfig::default().with_goodwill(0.2, 0.4, 0.6);
        let text = config.to_toml().unwrap();
        let back = SimulationConfig::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_label_and_file_stem() {
        let mut config = SimulationConfig::default();
        config.simulation.strategic_agents = 300;
        assert_eq!(
            config.label(),
            "N=1000, S=300, expoA=1, expoG=1, x=0.5, y=0.5, z=0.5, V_0=1"
        );
        assert_eq!(
            config.file_stem(),
            "N-1000_S-300_expoA-1_expoG-1_x-0.5_y-0.5_z-0.5_V_0-1"
        );
    }

    #[test]
    fn test_validate_rejects_too_many_strategic() {
        let mut config = SimulationConfig::default();
        config.simulation.strategic_agents = 1001;
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::StrategicExceedsTotal {
                strategic: 1001,
                total: 1000
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_runs() {
        let mut config = SimulationConfig::default();
        config.simulation.runs = 0;
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroRuns));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = SimulationConfig::from_str("[simulation]\ntotal_agents = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config = SimulationConfig::from_str(include_str!("../../../rae.toml")).unwrap();
        assert_eq!(config.simulation.strategic_agents, 300);
        assert_eq!(config.agents, AgentConfig::default());
        assert!(config.validate().is_ok());
    }
}
