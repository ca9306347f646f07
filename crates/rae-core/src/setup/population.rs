//! Population Setup
//!
//! Builds the agent list from two cohort counts and one parameter template.

use rae_events::{AgentId, AgentMode};

use crate::components::agent::{Agent, AgentConfig};
use crate::error::ConfigurationError;

/// Create `honest` honest agents followed by `total - honest` strategic ones.
///
/// Ids are assigned densely from 0, so `population[n].id == AgentId(n)`.
pub fn create_population(
    honest: usize,
    total: usize,
    template: &AgentConfig,
) -> Result<Vec<Agent>, ConfigurationError> {
    if honest > total {
        return Err(ConfigurationError::HonestExceedsTotal { honest, total });
    }

    let population = (0..total)
        .map(|i| {
            let mode = if i < honest {
                AgentMode::Honest
            } else {
                AgentMode::Strategic
            };
            Agent::new(AgentId(i), mode, template)
        })
        .collect();
    Ok(population)
}

/// Cohort sizes of a population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopulationSummary {
    pub total_agents: usize,
    pub honest: usize,
    pub strategic: usize,
}

pub fn summarize(population: &[Agent]) -> PopulationSummary {
    let honest = population
        .iter()
        .filter(|a| a.mode() == AgentMode::Honest)
        .count();
    PopulationSummary {
        total_agents: population.len(),
        honest,
        strategic: population.len() - honest,
    }
}
