//! Goodwill Sweep
//!
//! Re-runs the engine over every (x, y, z) combination of the configured
//! goodwill values, x outermost and z innermost.

use crate::config::SimulationConfig;
use crate::engine::run_averaged;
use crate::error::RaeError;
use crate::output::stats::SimulationStatistics;

/// Averaged result for one grid point
#[derive(Debug, Clone)]
pub struct SweepCell {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub config: SimulationConfig,
    pub statistics: SimulationStatistics,
}

/// Grid points in visiting order.
pub fn sweep_grid(values: &[f64]) -> Vec<(f64, f64, f64)> {
    let mut grid = Vec::with_capacity(values.len().pow(3));
    for &x in values {
        for &y in values {
            for &z in values {
                grid.push((x, y, z));
            }
        }
    }
    grid
}

/// Run the whole grid, handing each cell to `visit` as soon as it finishes.
///
/// Every cell is validated before anything runs, so a bad grid value fails
/// fast. Returns the number of cells visited.
pub fn run_sweep<F>(config: &SimulationConfig, mut visit: F) -> Result<usize, RaeError>
where
    F: FnMut(SweepCell) -> Result<(), RaeError>,
{
    let grid = sweep_grid(&config.sweep.values);
    let cells: Vec<SimulationConfig> = grid
        .iter()
        .map(|&(x, y, z)| config.with_goodwill(x, y, z))
        .collect();
    for cell in &cells {
        cell.validate()?;
    }

    tracing::info!(cells = cells.len(), runs = config.simulation.runs, "sweep starting");
    for ((x, y, z), cell_config) in grid.into_iter().zip(cells) {
        tracing::info!("{}", cell_config.label());
        let statistics = run_averaged(&cell_config)?;
        visit(SweepCell {
            x,
            y,
            z,
            config: cell_config,
            statistics,
        })?;
    }
    Ok(config.sweep.values.len().pow(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_order() {
        let grid = sweep_grid(&[0.2, 0.4]);
        assert_eq!(grid.len(), 8);
        assert_eq!(grid[0], (0.2, 0.2, 0.2));
        assert_eq!(grid[1], (0.2, 0.2, 0.4));
        assert_eq!(grid[2], (0.2, 0.4, 0.2));
        assert_eq!(grid[7], (0.4, 0.4, 0.4));
    }

    #[test]
    fn test_default_grid_has_125_cells() {
        assert_eq!(sweep_grid(&SimulationConfig::default().sweep.values).len(), 125);
    }

    #[test]
    fn test_sweep_visits_every_cell() {
        let mut config = SimulationConfig::default();
        config.simulation.total_agents = 6;
        config.simulation.strategic_agents = 2;
        config.simulation.iterations = 2;
        config.sweep.values = vec![0.5, 1.0];

        let mut seen = Vec::new();
        let visited = run_sweep(&config, |cell| {
            assert_eq!(cell.config.agents.goodwill_honest_x, cell.x);
            assert_eq!(cell.config.agents.goodwill_reception_z, cell.z);
            assert_eq!(cell.statistics.len()?, 2);
            seen.push((cell.x, cell.y, cell.z));
            Ok(())
        })
        .unwrap();

        assert_eq!(visited, 8);
        assert_eq!(seen, sweep_grid(&[0.5, 1.0]));
    }

    #[test]
    fn test_sweep_rejects_out_of_range_value() {
        let mut config = SimulationConfig::default();
        config.simulation.total_agents = 4;
        config.sweep.values = vec![0.5, 1.5];
        let mut calls = 0;
        let result = run_sweep(&config, |_| {
            calls += 1;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(calls, 0);
    }
}
