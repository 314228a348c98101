//! sim-runner: headless runner for the labor-market simulation.
//!
//! Usage:
//!   sim-runner --seed 12345 --steps 20 --db run.db
//!   sim-runner --seed 7 --individuals 500 --firms 40 --regions 12 --export out.json
//!   sim-runner --config sim.json --population people.json

use anyhow::{bail, Result};
use labormarket_core::{
    collector::{AgentSample, ModelSample},
    config::{ModelConfig, SimConfig},
    engine::SimEngine,
    generator::PopulationGenerator,
    population::PopulationData,
    store::SimStore,
};
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::BufWriter;

#[derive(Serialize)]
struct RunExport<'a> {
    run_id:        &'a str,
    seed:          u64,
    started_at:    &'a str,
    config:        &'a SimConfig,
    model_samples: &'a [ModelSample],
    agent_samples: &'a [AgentSample],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let steps = parse_arg(&args, "--steps", 10u64);
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let export = flag_value(&args, "--export");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default_test(),
    };

    let data = match flag_value(&args, "--population") {
        Some(path) => {
            let data = PopulationData::load(path)?;
            config.model.n_regions = data.regions.len();
            config.model.n_firms = data.firms.len();
            config.model.n_individuals = data.individuals.len();
            Some(data)
        }
        None => None,
    };
    apply_count_flags(&args, &mut config.model, data.is_some())?;

    println!("Labor market simulation — sim-runner");
    println!("  seed:         {seed}");
    println!("  steps:        {steps}");
    println!("  db:           {db}");
    println!(
        "  population:   {} individuals, {} firms, {} regions, {} governments",
        config.model.n_individuals,
        config.model.n_firms,
        config.model.n_regions,
        config.model.n_governments
    );
    println!();

    let store = SimStore::open(db)?;
    store.migrate()?;

    let run_id = format!("run-{}", uuid::Uuid::new_v4());
    let started_at = chrono::Utc::now().to_rfc3339();
    store.insert_run(&run_id, seed, env!("CARGO_PKG_VERSION"), &started_at)?;

    let data = data.unwrap_or_else(|| PopulationGenerator::new(seed).generate(&config.model));
    let mut engine = SimEngine::new(run_id.clone(), seed, &config, data, store)?;

    engine.run_steps(steps)?;
    print_summary(&engine, steps)?;

    if let Some(path) = export {
        let collector = engine.collector();
        let payload = RunExport {
            run_id: &run_id,
            seed,
            started_at: &started_at,
            config: &config,
            model_samples: &collector.model_samples,
            agent_samples: &collector.agent_samples,
        };
        let file = File::create(path)
            .map_err(|e| anyhow::anyhow!("Cannot write {path}: {e}"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &payload)?;
        log::info!("exported {} step samples to {path}", collector.model_samples.len());
        println!("  exported to:    {path}");
    }

    Ok(())
}

fn print_summary(engine: &SimEngine, steps: u64) -> Result<()> {
    let sample = engine.sample();
    let hired = engine.store_event_count("hired")?;
    let laid_off = engine.store_event_count("laid_off")?;
    let migrated = engine.store_event_count("migrated")?;
    let failures = engine.store_event_count("agent_step_failed")?;

    println!("=== RUN SUMMARY ===");
    println!("  run_id:            {}", engine.run_id);
    println!("  steps run:         {steps}");
    println!("  final step:        {}", engine.current_step());
    println!("  employed:          {}", sample.employed);
    println!("  unemployed:        {}", sample.unemployed);
    println!("  unemployment rate: {:.3}", sample.unemployment_rate());
    println!("  hires:             {hired}");
    println!("  layoffs:           {laid_off}");
    println!("  migrations:        {migrated}");
    println!("  resolution misses: {}", sample.resolution_misses);
    println!("  agent failures:    {failures}");

    println!();
    println!("=== EMPLOYMENT BY STEP ===");
    let summaries = engine.store_step_summaries()?;
    if summaries.is_empty() {
        println!("  (No steps completed yet)");
    }
    for s in &summaries {
        println!(
            "  step {:>4}: employed {:>6}  unemployed {:>6}  open vacancies {:>4}",
            s.step, s.employed, s.unemployed, s.open_vacancies
        );
    }
    Ok(())
}

/// A population file fixes the individual, firm and region counts, so
/// only `--governments` may be combined with `--population`.
fn apply_count_flags(args: &[String], model: &mut ModelConfig, from_file: bool) -> Result<()> {
    const FILE_COUNTS: [&str; 3] = ["--individuals", "--firms", "--regions"];
    if from_file {
        let given: Vec<&str> = FILE_COUNTS
            .into_iter()
            .filter(|flag| args.iter().any(|a| a == flag))
            .collect();
        if !given.is_empty() {
            bail!(
                "{} cannot be combined with --population; counts come from the population file",
                given.join(", ")
            );
        }
    }

    model.n_individuals = parse_arg(args, "--individuals", model.n_individuals);
    model.n_firms = parse_arg(args, "--firms", model.n_firms);
    model.n_regions = parse_arg(args, "--regions", model.n_regions);
    model.n_governments = parse_arg(args, "--governments", model.n_governments);
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn file_counts() -> ModelConfig {
        ModelConfig {
            n_individuals: 7,
            n_firms:       3,
            n_regions:     2,
            n_governments: 2,
        }
    }

    #[test]
    fn count_flags_conflict_with_population_file() {
        let mut model = file_counts();
        let args = args(&["sim-runner", "--population", "p.json", "--firms", "40", "--regions", "9"]);

        let err = apply_count_flags(&args, &mut model, true).unwrap_err().to_string();
        assert!(err.contains("--firms, --regions"), "{err}");
        assert!(err.contains("--population"), "{err}");
        assert_eq!(model, file_counts());
    }

    #[test]
    fn governments_flag_is_allowed_with_population_file() {
        let mut model = file_counts();
        let args = args(&["sim-runner", "--population", "p.json", "--governments", "4"]);

        apply_count_flags(&args, &mut model, true).unwrap();
        assert_eq!(model, ModelConfig { n_governments: 4, ..file_counts() });
    }

    #[test]
    fn count_flags_apply_without_population_file() {
        let mut model = file_counts();
        let args = args(&["sim-runner", "--individuals", "500", "--firms", "40"]);

        apply_count_flags(&args, &mut model, false).unwrap();
        assert_eq!(model.n_individuals, 500);
        assert_eq!(model.n_firms, 40);
        assert_eq!(model.n_regions, 2);
    }
}
