//! Output Systems
//!
//! Statistics collection, CSV rows, and JSON run reports.

pub mod csv;
pub mod stats;

pub use csv::{write_csv, write_csv_file};
pub use stats::{average_trust, influence_metric, SimulationStatistics};

use serde::Serialize;
use std::fs;
use std::path::Path;

use rae_events::{IterationRow, PopulationSnapshot};

use crate::config::SimulationConfig;
use crate::error::RaeError;

/// Everything a caller needs to chart or archive one configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub label: String,
    pub config: SimulationConfig,
    pub rows: Vec<IterationRow>,
    /// Final population of the last run; absent for averaged results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<PopulationSnapshot>,
}

impl SimulationReport {
    pub fn new(
        config: &SimulationConfig,
        stats: &SimulationStatistics,
        population: Option<PopulationSnapshot>,
    ) -> Result<Self, RaeError> {
        Ok(Self {
            label: config.label(),
            config: config.clone(),
            rows: stats.rows()?,
            population,
        })
    }
}

/// Write a report as pretty JSON, creating parent directories.
pub fn write_report_json(report: &SimulationReport, path: impl AsRef<Path>) -> Result<(), RaeError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
