//! Trust Simulation Driver
//!
//! Runs the reputation engine for one configuration, or sweeps the goodwill
//! grid, and writes the resulting series as CSV (and optionally JSON).

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rae_core::output::{write_csv_file, write_report_json, SimulationReport};
use rae_core::{
    run_averaged, run_sweep, RaeError, SimulationConfig, SimulationEngine, SimulationStatistics,
};
use rae_events::{AgentMode, PopulationSnapshot};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "rae_sim")]
#[command(about = "Trust dynamics among honest and strategic agents")]
struct Args {
    /// TOML configuration file (falls back to ./rae.toml, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of iterations per run
    #[arg(long)]
    iterations: Option<usize>,

    /// Total number of agents
    #[arg(long)]
    agents: Option<usize>,

    /// Number of strategic agents (must not exceed the total)
    #[arg(long)]
    strategic: Option<usize>,

    /// Independent runs averaged per configuration
    #[arg(long)]
    runs: Option<usize>,

    /// Directory for CSV and JSON output
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Sweep x, y and z over the configured grid instead of a single run
    #[arg(long)]
    sweep: bool,

    /// Also write a JSON report per configuration
    #[arg(long)]
    json: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<SimulationConfig, RaeError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::load_or_default(),
        };
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(iterations) = self.iterations {
            config.simulation.iterations = iterations;
        }
        if let Some(agents) = self.agents {
            config.simulation.total_agents = agents;
        }
        if let Some(strategic) = self.strategic {
            config.simulation.strategic_agents = strategic;
        }
        if let Some(runs) = self.runs {
            config.simulation.runs = runs;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), RaeError> {
    let config = args.resolve_config()?;

    println!("Trust Assessment Simulation");
    println!("===========================");
    println!("{}", config.label());
    println!("Iterations: {}", config.simulation.iterations);
    println!("Runs per configuration: {}", config.simulation.runs);
    println!("Seed: {}", config.simulation.seed);
    println!();

    if args.sweep {
        let cells = run_sweep(&config, |cell| {
            write_outputs(&args.output_dir, &cell.config, &cell.statistics, None, args.json)
        })?;
        println!("Sweep complete: {} configurations written to {}", cells, args.output_dir.display());
        return Ok(());
    }

    if config.simulation.runs == 1 {
        let outcome = SimulationEngine::from_config(&config)?.run()?;
        for row in outcome.statistics.rows()? {
            println!(
                "[Iter {:>3}] honest {:.4}  strategic {:.4}  F {:+.4}",
                row.iteration, row.avg_honest_trust, row.avg_strategic_trust, row.influence
            );
        }
        println!(
            "Fully trusted at end: {} / {}",
            outcome.population.fully_trusted_count(),
            outcome.population.agents.len()
        );
        for mode in [AgentMode::Honest, AgentMode::Strategic] {
            println!(
                "  {:<9} {}",
                mode.as_str(),
                outcome.population.count_by_mode(mode)
            );
        }
        write_outputs(
            &args.output_dir,
            &config,
            &outcome.statistics,
            Some(outcome.population),
            args.json,
        )?;
    } else {
        let statistics = run_averaged(&config)?;
        write_outputs(&args.output_dir, &config, &statistics, None, args.json)?;
    }
    Ok(())
}

fn write_outputs(
    dir: &Path,
    config: &SimulationConfig,
    statistics: &SimulationStatistics,
    population: Option<PopulationSnapshot>,
    json: bool,
) -> Result<(), RaeError> {
    let csv_path = write_csv_file(statistics, dir, config)?;
    tracing::info!("Wrote {}", csv_path.display());

    if json {
        let report = SimulationReport::new(config, statistics, population)?;
        let json_path = dir.join(format!("report_{}.json", config.file_stem()));
        write_report_json(&report, &json_path)?;
        tracing::info!("Wrote {}", json_path.display());
    }
    Ok(())
}
