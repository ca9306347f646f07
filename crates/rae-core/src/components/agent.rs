//! Agent Components
//!
//! Agent identity, per-cohort parameters, and the service and reception
//! policies that depend on the agent's mode.

use rand::Rng;
use serde::{Deserialize, Serialize};

use rae_events::{AgentId, AgentMode, AgentSnapshot};

use crate::error::{ConfigurationError, RaeError};
use crate::systems::noise::power_draw;

/// Parameter bundle shared by a cohort.
///
/// Agents take their own copy at construction, so nothing done to a template
/// afterwards reaches an agent that already exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Initial trust value, in [0, 1]
    pub start_trust_level: f64,
    /// Honesty threshold x: counterpart trust must be >= 1 - x
    pub goodwill_honest_x: f64,
    /// Cap y a strategic supplier applies when serving an honest receiver
    pub goodwill_probability_y: f64,
    /// Cap z a strategic receiver applies when rating an honest supplier
    pub goodwill_reception_z: f64,
    /// Shape exponent for service answer noise
    pub expo_a: f64,
    /// Shape exponent for reception rate noise
    pub expo_g: f64,
    /// Inclusive bounds on suppliers sampled per round
    pub min_suppliers: usize,
    pub max_suppliers: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start_trust_level: 1.0,
            goodwill_honest_x: 0.5,
            goodwill_probability_y: 0.5,
            goodwill_reception_z: 0.5,
            expo_a: 1.0,
            expo_g: 1.0,
            min_suppliers: 1,
            max_suppliers: 1,
        }
    }
}

impl AgentConfig {
    /// Check parameter ranges against a population of `population` agents.
    pub fn validate(&self, population: usize) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("start_trust_level", self.start_trust_level),
            ("goodwill_honest_x", self.goodwill_honest_x),
            ("goodwill_probability_y", self.goodwill_probability_y),
            ("goodwill_reception_z", self.goodwill_reception_z),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::OutOfUnitRange { name, value });
            }
        }
        for (name, value) in [("expo_a", self.expo_a), ("expo_g", self.expo_g)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::NonPositiveExponent { name, value });
            }
        }
        if self.min_suppliers > self.max_suppliers {
            return Err(ConfigurationError::SupplierBoundsInverted {
                min: self.min_suppliers,
                max: self.max_suppliers,
            });
        }
        if self.max_suppliers >= population {
            return Err(ConfigurationError::SupplierBoundExceedsPopulation {
                max: self.max_suppliers,
                population,
            });
        }
        Ok(())
    }

    /// Trust a counterpart needs to pass the honesty gate.
    pub fn honesty_threshold(&self) -> f64 {
        1.0 - self.goodwill_honest_x
    }
}

/// A member of the simulated population.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    mode: AgentMode,
    config: AgentConfig,
    /// Current belief in [0, 1], replaced once per iteration by the engine
    pub trust_level: f64,
    /// Estimate committed alongside the last trust update
    pub reception_estimate: f64,
}

impl Agent {
    pub fn new(id: AgentId, mode: AgentMode, config: &AgentConfig) -> Self {
        Self {
            id,
            mode,
            config: config.clone(),
            trust_level: config.start_trust_level,
            reception_estimate: 0.0,
        }
    }

    pub fn mode(&self) -> AgentMode {
        self.mode
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Quality of service this agent offers to `requester`.
    pub fn offer_service<R: Rng + ?Sized>(&self, requester: &Agent, rng: &mut R) -> f64 {
        let honest = gated_draw(
            rng,
            requester.trust_level,
            self.config.honesty_threshold(),
            self.config.expo_a,
            1.0,
        );
        cap_out_group(self.mode, requester.mode, self.config.goodwill_probability_y, honest)
    }

    /// Trust credit this agent derives from `service_answer` given by `supplier`.
    pub fn reception_rate<R: Rng + ?Sized>(
        &self,
        supplier: &Agent,
        service_answer: f64,
        rng: &mut R,
    ) -> f64 {
        let honest = gated_draw(
            rng,
            self.trust_level,
            self.config.honesty_threshold(),
            self.config.expo_g,
            service_answer,
        );
        cap_out_group(self.mode, supplier.mode, self.config.goodwill_reception_z, honest)
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            agent_id: self.id,
            mode: self.mode,
            trust_level: self.trust_level,
            reception_estimate: self.reception_estimate,
        }
    }
}

/// The agent with `id`, relying on ids being dense population indices.
pub fn find_agent(population: &[Agent], id: AgentId) -> Result<&Agent, RaeError> {
    population.get(id.index()).ok_or(RaeError::UnknownAgent {
        id,
        population: population.len(),
    })
}

/// Gate by trust threshold, then randomize.
///
/// Returns `power_draw(exponent) * scale` when `gate_trust >= threshold`,
/// otherwise 0 without consuming a draw.
fn gated_draw<R: Rng + ?Sized>(
    rng: &mut R,
    gate_trust: f64,
    threshold: f64,
    exponent: f64,
    scale: f64,
) -> f64 {
    if gate_trust >= threshold {
        power_draw(rng, exponent) * scale
    } else {
        0.0
    }
}

/// Strategic agents cap what crosses to or from honest agents.
fn cap_out_group(own: AgentMode, counterpart: AgentMode, cap: f64, honest_value: f64) -> f64 {
    match (own, counterpart) {
        (AgentMode::Honest, _) => honest_value,
        (AgentMode::Strategic, AgentMode::Strategic) => honest_value,
        (AgentMode::Strategic, AgentMode::Honest) => cap.min(honest_value),
    }
}
