use clap::Parser;
use pitch_simulator::{scenario, SteeringStrategy};
use pitch_tools::{load_config, run_seed, RunSummary};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap()]
struct Arguments {
    scenario: String,

    #[clap(short, long, default_value_t = 1)]
    seeds: u32,

    #[clap(short, long)]
    ticks: Option<u32>,

    #[clap(long)]
    strategy: Option<SteeringStrategy>,

    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Print the final snapshot of every seed as JSON.
    #[clap(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("headless=info"))
        .init();

    let args = Arguments::parse();
    let scenario = match scenario::load_safe(&args.scenario) {
        Some(scenario) => scenario,
        None => anyhow::bail!(
            "Unknown scenario {:?}, expected one of {}",
            args.scenario,
            scenario::list().join(", ")
        ),
    };

    let mut config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => scenario.controller_config(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    log::info!(
        "Running {} for {} seeds with strategy {}",
        scenario.human_name(),
        args.seeds,
        config.strategy
    );

    let results = (0..args.seeds)
        .into_par_iter()
        .map(|seed| run_seed(&args.scenario, seed, Some(&config), args.ticks))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if args.json {
        let snapshots: Vec<_> = results.iter().map(|(_, snapshot)| snapshot).collect();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    for (summary, _) in results.iter() {
        print_summary(summary);
    }
    let errors: Vec<f64> = results
        .iter()
        .filter_map(|(summary, _)| summary.final_heading_error)
        .collect();
    if !errors.is_empty() {
        let mean = errors.iter().sum::<f64>() / errors.len() as f64;
        let worst = errors.iter().cloned().fold(0.0, f64::max);
        log::info!(
            "Final heading error over {} seeds: mean {:.4} rad, worst {:.4} rad",
            errors.len(),
            mean,
            worst
        );
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let format_error = |e: Option<f64>| match e {
        Some(e) => format!("{e:.4}"),
        None => "-".to_string(),
    };
    println!(
        "seed {:>3}: ticks {:>5} error {} (worst {}) touches {} wall hits {} anomalies {} {:016x}",
        summary.seed,
        summary.ticks,
        format_error(summary.final_heading_error),
        format_error(summary.worst_heading_error),
        summary.touches,
        summary.ball_wall_hits,
        summary.anomalies,
        summary.hash
    );
}
