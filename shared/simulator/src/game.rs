use crate::controller::ControllerConfig;
use crate::debug;
use crate::engine::PhysicsEngine;
use crate::error::{Error, Result};
use crate::math::{angle_between, heading_vector};
use crate::orchestrator::{Orchestrator, TickReport};
use crate::scenario::{self, Scenario, Status};
use crate::simulation::Simulation;
use crate::snapshot::{BallSnapshot, PlayerSnapshot, Snapshot};
use instant::Instant;

/// A scenario, its world and the controllers steering it.
pub struct Game {
    scenario: Box<dyn Scenario>,
    sim: Box<Simulation>,
    orchestrator: Orchestrator,
    seed: u32,
    last_report: TickReport,
}

impl Game {
    /// Uses the scenario's own controller configuration.
    pub fn new(scenario_name: &str, seed: u32) -> Result<Game> {
        let scenario = load(scenario_name)?;
        let config = scenario.controller_config();
        Game::build(scenario, seed, &config)
    }

    pub fn with_config(scenario_name: &str, seed: u32, config: &ControllerConfig) -> Result<Game> {
        Game::build(load(scenario_name)?, seed, config)
    }

    fn build(
        mut scenario: Box<dyn Scenario>,
        seed: u32,
        config: &ControllerConfig,
    ) -> Result<Game> {
        let mut sim = Box::new(Simulation::new(&scenario.physics(), scenario.arena())?);
        let lineup = scenario.init(&mut sim, seed);
        let orchestrator = Orchestrator::new(config, lineup.players, lineup.ball)?;
        log::info!(
            "Starting {} seed {} with {} players, strategy {}",
            scenario.name(),
            seed,
            orchestrator.players().len(),
            orchestrator.strategy()
        );
        Ok(Game {
            scenario,
            sim,
            orchestrator,
            seed,
            last_report: TickReport::default(),
        })
    }

    pub fn tick(&mut self) {
        let start_time = Instant::now();
        self.sim.events.debug_lines.clear();
        self.scenario.tick(&mut self.sim);
        let report = self.orchestrator.tick(&mut *self.sim);

        for &handle in self.orchestrator.players() {
            debug::emit_player(&mut self.sim, handle, report.force_for(handle));
        }

        let elapsed = Instant::now().duration_since(start_time).as_secs_f64();
        self.sim.timing.control = (elapsed - self.sim.timing.physics).max(0.0);
        self.last_report = report;
    }

    pub fn status(&self) -> Status {
        if self.sim.tick() >= self.scenario.max_ticks() {
            Status::Finished
        } else {
            Status::Running
        }
    }

    pub fn scenario(&self) -> &dyn Scenario {
        self.scenario.as_ref()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    pub fn hash(&self) -> u64 {
        self.sim.hash()
    }

    pub fn snapshot(&self) -> Snapshot {
        let sim = &*self.sim;
        let ball = sim.ball().and_then(|handle| sim.body_state(handle));

        let players = self
            .orchestrator
            .players()
            .iter()
            .filter_map(|&handle| {
                let state = sim.body_state(handle)?;
                let bearing_error = ball.and_then(|ball| {
                    let to_ball = ball.position - state.position;
                    if to_ball.norm() > 0.0 {
                        Some(angle_between(heading_vector(state.heading), to_ball))
                    } else {
                        None
                    }
                });
                Some(PlayerSnapshot {
                    id: handle.into(),
                    number: sim.player(handle).map(|data| data.number).unwrap_or(0),
                    position: state.position.into(),
                    velocity: state.velocity,
                    heading: state.heading,
                    angular_velocity: state.angular_velocity,
                    bearing_error,
                })
            })
            .collect();

        let events = sim.events();
        Snapshot {
            scenario: self.scenario.name(),
            seed: self.seed,
            tick: sim.tick(),
            time: sim.time(),
            status: self.status(),
            strategy: self.orchestrator.strategy(),
            arena: sim.arena(),
            players,
            ball: ball.map(|ball| BallSnapshot {
                id: ball.handle.into(),
                position: ball.position.into(),
                velocity: ball.velocity,
            }),
            touches: events.touches.clone(),
            ball_wall_hits: events.ball_wall_hits,
            player_collisions: events.player_collisions,
            mean_heading_error: self.last_report.mean_heading_error,
            anomalies: self.last_report.anomalies.len(),
            debug_lines: events.debug_lines.clone(),
            timing: sim.timing().clone(),
        }
    }
}

fn load(name: &str) -> Result<Box<dyn Scenario>> {
    scenario::load_safe(name).ok_or_else(|| Error::UnknownScenario(name.to_string()))
}
