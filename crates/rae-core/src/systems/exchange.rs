//! Service Exchange
//!
//! One agent's round: pick suppliers, ask each for service, rate what came
//! back, and record an entry per exchange. Nothing here mutates an agent.

use rand::seq::index;
use rand::Rng;

use rae_events::{AgentId, ReportEntry};

use crate::components::agent::{find_agent, Agent};
use crate::error::RaeError;

/// Run `receiver`'s round against `population`.
///
/// `population[n]` must be the agent with id `n`; a receiver outside the
/// population is an [`RaeError::UnknownAgent`]. Suppliers are distinct and
/// never include the receiver.
pub fn run_round<R: Rng + ?Sized>(
    receiver: &Agent,
    population: &[Agent],
    rng: &mut R,
) -> Result<Vec<ReportEntry>, RaeError> {
    find_agent(population, receiver.id)?;
    let config = receiver.config();
    let suppliers = sample_suppliers(
        receiver.id.index(),
        population.len(),
        config.min_suppliers,
        config.max_suppliers,
        rng,
    );
    tracing::trace!(receiver = %receiver.id, suppliers = suppliers.len(), "round");

    let mut entries = Vec::with_capacity(suppliers.len());
    for supplier_index in suppliers {
        let supplier = find_agent(population, AgentId(supplier_index))?;
        let service_answer = supplier.offer_service(receiver, rng);
        let reception_rate = receiver.reception_rate(supplier, service_answer, rng);
        entries.push(ReportEntry::new(
            supplier.id,
            receiver.id,
            service_answer,
            reception_rate,
        ));
    }
    Ok(entries)
}

/// Choose `k ~ uniform[min, max]` distinct indices from `0..population`, skipping `own`.
///
/// `k` is clamped to the `population - 1` candidates available.
pub fn sample_suppliers<R: Rng + ?Sized>(
    own: usize,
    population: usize,
    min: usize,
    max: usize,
    rng: &mut R,
) -> Vec<usize> {
    let pool = population.saturating_sub(1);
    let k = if min >= max { min } else { rng.gen_range(min..=max) };
    let k = k.min(pool);

    // Sample over the pool with `own` removed, then shift indices past it back up.
    index::sample(rng, pool, k)
        .into_iter()
        .map(|i| if i >= own { i + 1 } else { i })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentConfig;
    use rae_events::AgentMode;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn population(size: usize, config: &AgentConfig) -> Vec<Agent> {
        (0..size)
            .map(|i| Agent::new(AgentId(i), AgentMode::Honest, config))
            .collect()
    }

    #[test]
    fn test_sample_excludes_self_and_is_distinct() {
        let mut rng = SmallRng::seed_from_u64(42);
        for own in 0..6 {
            for _ in 0..100 {
                let chosen = sample_suppliers(own, 6, 1, 5, &mut rng);
                let unique: HashSet<_> = chosen.iter().copied().collect();
                assert_eq!(unique.len(), chosen.len());
                assert!(!chosen.contains(&own));
                assert!(chosen.iter().all(|&i| i < 6));
                assert!((1..=5).contains(&chosen.len()));
            }
        }
    }

    #[test]
    fn test_sample_clamps_to_pool() {
        let mut rng = SmallRng::seed_from_u64(1);
        let chosen = sample_suppliers(2, 4, 10, 10, &mut rng);
        let mut sorted = chosen.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 3]);
    }

    #[test]
    fn test_sample_from_lone_agent_is_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(sample_suppliers(0, 1, 0, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_size_covers_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        let sizes: HashSet<usize> = (0..500)
            .map(|_| sample_suppliers(0, 10, 2, 4, &mut rng).len())
            .collect();
        assert_eq!(sizes, HashSet::from([2, 3, 4]));
    }

    #[test]
    fn test_round_entries_name_receiver() {
        let config = AgentConfig {
            min_suppliers: 3,
            max_suppliers: 3,
            ..AgentConfig::default()
        };
        let agents = population(4, &config);
        let mut rng = SmallRng::seed_from_u64(5);
        let entries = run_round(&agents[1], &agents, &mut rng).unwrap();

        assert_eq!(entries.len(), 3);
        for entry in &entries {
            assert_eq!(entry.receiver_id, AgentId(1));
            assert_ne!(entry.supplier_id, AgentId(1));
            assert!(entry.service_answer >= 0.0);
            assert!(entry.reception_rate >= 0.0);
            assert!(entry.reception_rate <= entry.service_answer);
        }
    }

    #[test]
    fn test_round_leaves_agents_untouched() {
        let config = AgentConfig {
            max_suppliers: 2,
            ..AgentConfig::default()
        };
        let agents = population(3, &config);
        let before: Vec<f64> = agents.iter().map(|a| a.trust_level).collect();
        let mut rng = SmallRng::seed_from_u64(9);
        run_round(&agents[0], &agents, &mut rng).unwrap();
        let after: Vec<f64> = agents.iter().map(|a| a.trust_level).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_round_rejects_receiver_outside_population() {
        let config = AgentConfig::default();
        let agents = population(2, &config);
        let stranger = Agent::new(AgentId(4), AgentMode::Honest, &config);
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(matches!(
            run_round(&stranger, &agents, &mut rng),
            Err(RaeError::UnknownAgent { id: AgentId(4), population: 2 })
        ));
    }
}
