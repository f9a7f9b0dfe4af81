use anyhow::Context;
use pitch_simulator::scenario::Status;
use pitch_simulator::snapshot::Snapshot;
use pitch_simulator::{ControllerConfig, Game};
use serde::Serialize;
use std::path::Path;

pub fn load_config(path: &Path) -> anyhow::Result<ControllerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ControllerConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[derive(Serialize, Debug, Clone)]
pub struct RunSummary {
    pub seed: u32,
    pub ticks: u32,
    pub final_heading_error: Option<f64>,
    pub worst_heading_error: Option<f64>,
    pub touches: usize,
    pub ball_wall_hits: u32,
    pub anomalies: usize,
    pub hash: u64,
}

/// Runs one seed until the scenario finishes or `max_ticks` is reached.
pub fn run_seed(
    scenario_name: &str,
    seed: u32,
    config: Option<&ControllerConfig>,
    max_ticks: Option<u32>,
) -> anyhow::Result<(RunSummary, Snapshot)> {
    let mut game = match config {
        Some(config) => Game::with_config(scenario_name, seed, config)?,
        None => Game::new(scenario_name, seed)?,
    };
    let limit = max_ticks.unwrap_or(u32::MAX);
    let mut worst: Option<f64> = None;
    let mut touches = 0;
    let mut ball_wall_hits = 0;
    let mut anomalies = 0;
    while game.status() == Status::Running && game.simulation().tick() < limit {
        game.tick();
        let report = game.last_report();
        if let Some(error) = report.mean_heading_error {
            worst = Some(worst.map_or(error, |w: f64| w.max(error)));
        }
        anomalies += report.anomalies.len();
        let events = game.simulation().events();
        touches += events.touches.len();
        ball_wall_hits += events.ball_wall_hits;
    }
    let snapshot = game.snapshot();
    let summary = RunSummary {
        seed,
        ticks: snapshot.tick,
        final_heading_error: snapshot.mean_heading_error,
        worst_heading_error: worst,
        touches,
        ball_wall_hits,
        anomalies,
        hash: game.hash(),
    };
    Ok((summary, snapshot))
}
