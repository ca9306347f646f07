//! Simulation Engine
//!
//! Owns the population and drives the iteration loop. Each iteration runs,
//! strictly in order:
//!
//! 1. every agent's service round against the trust levels frozen at the
//!    start of the iteration,
//! 2. pooling of all entries,
//! 3. trust aggregation into one reception estimate per agent,
//! 4. bisection and commit of every agent's next trust level,
//! 5. statistics over the pooled entries and the updated trust levels.
//!
//! Each agent's round gets its own generator, seeded from the engine's master
//! generator in agent-id order, so a round depends only on its seed and the
//! frozen trust levels.
//!
//! An entry naming an agent outside the population aborts the iteration with
//! [`RaeError::UnknownAgent`] before anything is committed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rae_events::{IterationRow, PopulationSnapshot, ReportEntry};

use crate::components::agent::{Agent, AgentConfig};
use crate::config::SimulationConfig;
use crate::error::RaeError;
use crate::output::stats::SimulationStatistics;
use crate::setup::population::{create_population, summarize};
use crate::systems::aggregate::reception_estimates;
use crate::systems::bisect::Bisection;
use crate::systems::exchange::run_round;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Done,
}

/// Everything produced by a single iteration
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    pub row: IterationRow,
    pub bisection: Bisection,
    /// Pooled entries of the round, in agent-id order of the receivers
    pub entries: Vec<ReportEntry>,
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub statistics: SimulationStatistics,
    pub population: PopulationSnapshot,
}

/// One simulation run over a fixed number of iterations.
#[derive(Debug)]
pub struct SimulationEngine {
    agents: Vec<Agent>,
    iterations: usize,
    completed: usize,
    rng: SmallRng,
    statistics: SimulationStatistics,
}

impl SimulationEngine {
    /// Build a run of `iterations` over `honest` honest and `total - honest` strategic agents.
    pub fn new(
        honest: usize,
        total: usize,
        template: &AgentConfig,
        iterations: usize,
        seed: u64,
    ) -> Result<Self, RaeError> {
        template.validate(total)?;
        let agents = create_population(honest, total, template)?;

        Ok(Self {
            agents,
            iterations,
            completed: 0,
            rng: SmallRng::seed_from_u64(seed),
            statistics: SimulationStatistics::new(),
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, RaeError> {
        config.validate()?;
        Self::new(
            config.honest_agents(),
            config.simulation.total_agents,
            &config.agent_config(),
            config.simulation.iterations,
            config.simulation.seed,
        )
    }

    pub fn state(&self) -> EngineState {
        if self.completed < self.iterations {
            EngineState::Running
        } else {
            EngineState::Done
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn statistics(&self) -> &SimulationStatistics {
        &self.statistics
    }

    pub fn iterations_completed(&self) -> usize {
        self.completed
    }

    /// Run one iteration. Returns `None` once the run is done.
    pub fn step(&mut self) -> Result<Option<IterationOutcome>, RaeError> {
        if self.state() == EngineState::Done {
            return Ok(None);
        }

        // Rounds read the population immutably; trust changes only at commit.
        let round_seeds: Vec<u64> = (0..self.agents.len()).map(|_| self.rng.gen()).collect();
        let mut entries: Vec<ReportEntry> = Vec::new();
        for (agent, seed) in self.agents.iter().zip(round_seeds) {
            let mut round_rng = SmallRng::seed_from_u64(seed);
            entries.extend(run_round(agent, &self.agents, &mut round_rng)?);
        }

        // Rejects unknown ids before any trust changes
        let estimates = reception_estimates(&entries, &self.agents)?;
        let bisection = Bisection::compute(&estimates);
        if bisection.is_degenerate() && !estimates.is_empty() {
            tracing::warn!(
                iteration = self.completed,
                boundary = bisection.boundary,
                "degenerate clustering: all estimates in one set, low trust set to 0"
            );
        }

        for (agent, estimate) in self.agents.iter_mut().zip(&estimates) {
            agent.trust_level = bisection.next_trust(*estimate);
            agent.reception_estimate = *estimate;
        }

        let row = self.statistics.record_iteration(&self.agents, &entries)?;

        tracing::debug!(
            iteration = self.completed,
            entries = entries.len(),
            c0 = bisection.low_centroid,
            c1 = bisection.high_centroid,
            boundary = bisection.boundary,
            low = bisection.low_count,
            high = bisection.high_count,
            low_trust = bisection.low_trust,
            "iteration complete"
        );

        self.completed += 1;
        Ok(Some(IterationOutcome {
            row,
            bisection,
            entries,
        }))
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        let mut snapshot = PopulationSnapshot::new(self.completed);
        snapshot.agents = self.agents.iter().map(Agent::snapshot).collect();
        snapshot
    }

    /// Run every remaining iteration and hand back the results.
    pub fn run(mut self) -> Result<SimulationOutcome, RaeError> {
        let summary = summarize(&self.agents);
        tracing::info!(
            agents = summary.total_agents,
            honest = summary.honest,
            strategic = summary.strategic,
            iterations = self.iterations,
            "simulation starting"
        );
        while self.step()?.is_some() {}

        let recorded = self.statistics.len()?;
        tracing::info!(iterations = recorded, "simulation complete");

        let population = self.snapshot();
        Ok(SimulationOutcome {
            statistics: self.statistics,
            population,
        })
    }
}

/// Run `config.simulation.runs` independent engines and average their statistics.
///
/// Run `r` is seeded with `seed + r`.
pub fn run_averaged(config: &SimulationConfig) -> Result<SimulationStatistics, RaeError> {
    config.validate()?;
    let mut runs = Vec::with_capacity(config.simulation.runs);
    for r in 0..config.simulation.runs {
        let mut run_config = config.clone();
        run_config.simulation.seed = config.simulation.seed.wrapping_add(r as u64);
        let outcome = SimulationEngine::from_config(&run_config)?.run()?;
        runs.push(outcome.statistics);
    }
    SimulationStatistics::average(&runs)
}
