//! Snapshot Types
//!
//! Serialization structs for statistics rows and end-of-run population state.

use serde::{Deserialize, Serialize};

use crate::{AgentId, AgentMode};

/// One iteration of the trust time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRow {
    pub iteration: usize,
    pub avg_honest_trust: f64,
    pub avg_strategic_trust: f64,
    /// Cross-group influence metric F
    pub influence: f64,
}

impl IterationRow {
    /// Formats the row as `iteration;avgHonest;avgStrategic;avgF`.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{};{};{};{}",
            self.iteration, self.avg_honest_trust, self.avg_strategic_trust, self.influence
        )
    }

    pub fn is_finite(&self) -> bool {
        self.avg_honest_trust.is_finite()
            && self.avg_strategic_trust.is_finite()
            && self.influence.is_finite()
    }
}

/// Agent state at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: AgentId,
    pub mode: AgentMode,
    pub trust_level: f64,
    /// Estimate the last trust update was derived from
    #[serde(default)]
    pub reception_estimate: f64,
}

/// Final trust levels of the whole population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub iterations_completed: usize,
    #[serde(default)]
    pub agents: Vec<AgentSnapshot>,
}

impl PopulationSnapshot {
    pub fn new(iterations_completed: usize) -> Self {
        Self {
            iterations_completed,
            agents: Vec::new(),
        }
    }

    /// Number of agents at full trust (exactly 1.0).
    pub fn fully_trusted_count(&self) -> usize {
        self.agents.iter().filter(|a| a.trust_level >= 1.0).count()
    }

    pub fn count_by_mode(&self, mode: AgentMode) -> usize {
        self.agents.iter().filter(|a| a.mode == mode).count()
    }
}
