//! Trust Aggregation
//!
//! Reduces a round's pooled entries into one reception estimate per agent.
//! An agent's estimate is the mean, over the entries where it acted as
//! supplier, of `receiver trust * reception rate`, using trust levels from
//! before this iteration's update.
//!
//! Every entry must name agents of the population; an unknown supplier or
//! receiver aborts with [`RaeError::UnknownAgent`].

use rae_events::{AgentId, ReportEntry};

use crate::components::agent::{find_agent, Agent};
use crate::error::RaeError;

/// Estimate for a single agent.
///
/// Returns 0 when the agent was never chosen as a supplier this round.
/// Validates the whole round, so it fails exactly when [`reception_estimates`] does.
pub fn new_reception_estimate(
    agent: AgentId,
    entries: &[ReportEntry],
    population: &[Agent],
) -> Result<f64, RaeError> {
    find_agent(population, agent)?;
    let tallies = tally_suppliers(entries, population)?;
    Ok(tallies[agent.index()].mean())
}

/// Estimates for every agent, indexed like `population`.
pub fn reception_estimates(
    entries: &[ReportEntry],
    population: &[Agent],
) -> Result<Vec<f64>, RaeError> {
    let tallies = tally_suppliers(entries, population)?;

    let unselected = tallies.iter().filter(|t| t.count == 0).count();
    if unselected > 0 {
        tracing::debug!(unselected, "agents never chosen as supplier; estimate set to 0");
    }

    Ok(tallies.iter().map(Tally::mean).collect())
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: f64,
    count: usize,
}

impl Tally {
    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

fn tally_suppliers(entries: &[ReportEntry], population: &[Agent]) -> Result<Vec<Tally>, RaeError> {
    let mut tallies = vec![Tally::default(); population.len()];
    for entry in entries {
        let receiver = find_agent(population, entry.receiver_id)?;
        find_agent(population, entry.supplier_id)?;
        let tally = &mut tallies[entry.supplier_id.index()];
        tally.sum += receiver.trust_level * entry.reception_rate;
        tally.count += 1;
    }
    Ok(tallies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentConfig;
    use rae_events::AgentMode;

    fn population(trust: &[f64]) -> Vec<Agent> {
        let config = AgentConfig::default();
        trust
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let mut agent = Agent::new(AgentId(i), AgentMode::Honest, &config);
                agent.trust_level = t;
                agent
            })
            .collect()
    }

    #[test]
    fn test_weighted_mean_over_supplier_entries() {
        let agents = population(&[1.0, 0.5, 0.25]);
        let entries = vec![
            ReportEntry::new(AgentId(0), AgentId(1), 0.9, 0.8),
            ReportEntry::new(AgentId(0), AgentId(2), 0.9, 0.4),
            // agent 0 as receiver does not count toward its own estimate
            ReportEntry::new(AgentId(1), AgentId(0), 0.9, 0.6),
        ];

        // (0.5 * 0.8 + 0.25 * 0.4) / 2 = 0.25
        let estimate = new_reception_estimate(AgentId(0), &entries, &agents).unwrap();
        assert!((estimate - 0.25).abs() < 1e-12);

        let estimate = new_reception_estimate(AgentId(1), &entries, &agents).unwrap();
        assert!((estimate - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_never_selected_is_zero() {
        let agents = population(&[1.0, 1.0, 1.0]);
        let entries = vec![ReportEntry::new(AgentId(0), AgentId(1), 0.5, 0.5)];
        assert_eq!(new_reception_estimate(AgentId(2), &entries, &agents).unwrap(), 0.0);
        assert_eq!(new_reception_estimate(AgentId(2), &[], &agents).unwrap(), 0.0);
    }

    #[test]
    fn test_bulk_matches_single() {
        let agents = population(&[1.0, 0.3, 0.7, 0.0]);
        let entries = vec![
            ReportEntry::new(AgentId(0), AgentId(1), 0.9, 0.8),
            ReportEntry::new(AgentId(0), AgentId(3), 0.9, 0.5),
            ReportEntry::new(AgentId(2), AgentId(0), 0.4, 0.2),
            ReportEntry::new(AgentId(2), AgentId(1), 0.4, 0.1),
            ReportEntry::new(AgentId(3), AgentId(2), 0.6, 0.6),
        ];

        let bulk = reception_estimates(&entries, &agents).unwrap();
        assert_eq!(bulk.len(), 4);
        for (i, value) in bulk.iter().enumerate() {
            let single = new_reception_estimate(AgentId(i), &entries, &agents).unwrap();
            assert_eq!(*value, single, "agent {} differs", i);
        }
        assert_eq!(bulk[1], 0.0);
    }

    #[test]
    fn test_unknown_receiver_rejected_by_both() {
        let agents = population(&[1.0, 0.5]);
        let entries = vec![
            ReportEntry::new(AgentId(0), AgentId(1), 0.5, 0.5),
            ReportEntry::new(AgentId(0), AgentId(5), 0.5, 0.5),
        ];

        let single = new_reception_estimate(AgentId(0), &entries, &agents);
        let bulk = reception_estimates(&entries, &agents);
        for result in [single.map(|v| vec![v]), bulk] {
            assert!(matches!(
                result,
                Err(RaeError::UnknownAgent { id: AgentId(5), population: 2 })
            ));
        }
    }

    #[test]
    fn test_unknown_supplier_and_agent_rejected() {
        let agents = population(&[1.0, 1.0]);
        let entries = vec![ReportEntry::new(AgentId(3), AgentId(0), 0.5, 0.5)];
        assert!(matches!(
            reception_estimates(&entries, &agents),
            Err(RaeError::UnknownAgent { id: AgentId(3), .. })
        ));
        assert!(matches!(
            new_reception_estimate(AgentId(9), &[], &agents),
            Err(RaeError::UnknownAgent { id: AgentId(9), .. })
        ));
    }
}
