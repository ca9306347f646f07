//! Statistics Output
//!
//! Per-iteration aggregate metrics: average trust per cohort and the
//! cross-group influence metric F.

use serde::{Deserialize, Serialize};

use rae_events::{AgentMode, IterationRow, ReportEntry};

use crate::components::agent::{find_agent, Agent};
use crate::error::RaeError;

/// Append-only time series, one element per iteration in each series.
///
/// The three series always have equal length; this is checked again at every
/// point of use, since a deserialized value may not honor it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    avg_honest_trust: Vec<f64>,
    avg_strategic_trust: Vec<f64>,
    influence: Vec<f64>,
}

impl SimulationStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from three series, rejecting unequal lengths.
    pub fn from_series(
        avg_honest_trust: Vec<f64>,
        avg_strategic_trust: Vec<f64>,
        influence: Vec<f64>,
    ) -> Result<Self, RaeError> {
        let stats = Self {
            avg_honest_trust,
            avg_strategic_trust,
            influence,
        };
        stats.len()?;
        Ok(stats)
    }

    /// Record one iteration from the updated population and the round's pooled entries.
    ///
    /// Nothing is recorded when an entry names an agent outside `population`.
    pub fn record_iteration(
        &mut self,
        population: &[Agent],
        entries: &[ReportEntry],
    ) -> Result<IterationRow, RaeError> {
        let row = IterationRow {
            iteration: self.avg_honest_trust.len(),
            avg_honest_trust: average_trust(population, AgentMode::Honest),
            avg_strategic_trust: average_trust(population, AgentMode::Strategic),
            influence: influence_metric(entries, population)?,
        };
        self.push_row(&row);
        Ok(row)
    }

    pub fn push_row(&mut self, row: &IterationRow) {
        self.avg_honest_trust.push(row.avg_honest_trust);
        self.avg_strategic_trust.push(row.avg_strategic_trust);
        self.influence.push(row.influence);
    }

    /// Number of recorded iterations.
    pub fn len(&self) -> Result<usize, RaeError> {
        let honest = self.avg_honest_trust.len();
        let strategic = self.avg_strategic_trust.len();
        let influence = self.influence.len();
        if honest != strategic || honest != influence {
            return Err(RaeError::SeriesLengthMismatch {
                honest,
                strategic,
                influence,
            });
        }
        Ok(honest)
    }

    pub fn is_empty(&self) -> bool {
        self.avg_honest_trust.is_empty()
            && self.avg_strategic_trust.is_empty()
            && self.influence.is_empty()
    }

    pub fn avg_honest_trust(&self) -> &[f64] {
        &self.avg_honest_trust
    }

    pub fn avg_strategic_trust(&self) -> &[f64] {
        &self.avg_strategic_trust
    }

    pub fn influence(&self) -> &[f64] {
        &self.influence
    }

    /// The series zipped into rows.
    pub fn rows(&self) -> Result<Vec<IterationRow>, RaeError> {
        self.len()?;
        Ok(self
            .avg_honest_trust
            .iter()
            .zip(&self.avg_strategic_trust)
            .zip(&self.influence)
            .enumerate()
            .map(|(iteration, ((&honest, &strategic), &influence))| IterationRow {
                iteration,
                avg_honest_trust: honest,
                avg_strategic_trust: strategic,
                influence,
            })
            .collect())
    }

    /// Element-wise mean across runs of equal length.
    pub fn average(runs: &[SimulationStatistics]) -> Result<Self, RaeError> {
        let Some(first) = runs.first() else {
            return Ok(Self::new());
        };
        let len = first.len()?;

        let mut sums = Self::from_series(vec![0.0; len], vec![0.0; len], vec![0.0; len])?;
        for run in runs {
            let run_len = run.len()?;
            if run_len != len {
                return Err(RaeError::SeriesLengthMismatch {
                    honest: len,
                    strategic: run_len,
                    influence: run_len,
                });
            }
            add_assign(&mut sums.avg_honest_trust, &run.avg_honest_trust);
            add_assign(&mut sums.avg_strategic_trust, &run.avg_strategic_trust);
            add_assign(&mut sums.influence, &run.influence);
        }

        let n = runs.len() as f64;
        for series in [
            &mut sums.avg_honest_trust,
            &mut sums.avg_strategic_trust,
            &mut sums.influence,
        ] {
            for value in series.iter_mut() {
                *value /= n;
            }
        }
        Ok(sums)
    }
}

fn add_assign(acc: &mut [f64], values: &[f64]) {
    for (a, v) in acc.iter_mut().zip(values) {
        *a += v;
    }
}

/// Mean trust of one cohort; 0 for an empty cohort.
pub fn average_trust(population: &[Agent], mode: AgentMode) -> f64 {
    let (sum, count) = population
        .iter()
        .filter(|a| a.mode() == mode)
        .fold((0.0, 0usize), |(sum, count), a| (sum + a.trust_level, count + 1));
    mean(sum, count)
}

/// Influence metric F.
///
/// Mean honest -> strategic service answer minus mean strategic -> honest
/// service answer over `entries`, with modes read from `population`. An empty
/// direction contributes 0.
pub fn influence_metric(entries: &[ReportEntry], population: &[Agent]) -> Result<f64, RaeError> {
    let mut honest_to_strategic = (0.0, 0usize);
    let mut strategic_to_honest = (0.0, 0usize);

    for entry in entries {
        let supplier = find_agent(population, entry.supplier_id)?.mode();
        let receiver = find_agent(population, entry.receiver_id)?.mode();
        match (supplier, receiver) {
            (AgentMode::Honest, AgentMode::Strategic) => {
                honest_to_strategic.0 += entry.service_answer;
                honest_to_strategic.1 += 1;
            }
            (AgentMode::Strategic, AgentMode::Honest) => {
                strategic_to_honest.0 += entry.service_answer;
                strategic_to_honest.1 += 1;
            }
            (AgentMode::Honest, AgentMode::Honest) | (AgentMode::Strategic, AgentMode::Strategic) => {}
        }
    }

    Ok(mean(honest_to_strategic.0, honest_to_strategic.1)
        - mean(strategic_to_honest.0, strategic_to_honest.1))
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
