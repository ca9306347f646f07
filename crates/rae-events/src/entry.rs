//! Exchange Types
//!
//! Identity, behavioral mode, and the per-exchange report entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an agent.
///
/// Ids are dense: agent `n` sits at index `n` of the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub usize);

impl AgentId {
    /// Position of the agent in the population vector.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{:04}", self.0)
    }
}

/// Behavioral mode of an agent - fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    /// Serves and evaluates everyone by the same honesty gate
    #[default]
    Honest,
    /// Honest toward other strategic agents, capped toward honest ones
    Strategic,
}

impl AgentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentMode::Honest => "honest",
            AgentMode::Strategic => "strategic",
        }
    }
}

/// Record of one supplier -> receiver exchange within a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub supplier_id: AgentId,
    pub receiver_id: AgentId,
    /// Raw service quality signal offered by the supplier (>= 0)
    pub service_answer: f64,
    /// Trust contribution the receiver derived from the exchange (>= 0)
    pub reception_rate: f64,
}

impl ReportEntry {
    pub fn new(
        supplier_id: AgentId,
        receiver_id: AgentId,
        service_answer: f64,
        reception_rate: f64,
    ) -> Self {
        Self {
            supplier_id,
            receiver_id,
            service_answer,
            reception_rate,
        }
    }
}
