//! Per-tick control loop.
//!
//! A tick reads the ball and every player from the engine, runs the selected
//! controllers, applies every resulting command and only then advances the
//! engine one step. Anything wrong with a single body is recorded as an
//! [`Anomaly`] and that body sits the tick out; the rest of the roster is
//! unaffected.

use crate::controller::linear::NoForce;
use crate::controller::{
    Actuation, AngularController, ControllerConfig, LinearController, SteeringStrategy,
};
use crate::engine::{BodyHandle, BodyState, PhysicsEngine};
use crate::error::Result;
use crate::math::{angle_between, bearing_to, heading_vector};
use nalgebra::Vector2;

/// Closer than this the ball has no meaningful bearing, so the player holds
/// its heading.
const MIN_BEARING_DISTANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anomaly {
    MissingTarget { body: BodyHandle },
    MissingBody { body: BodyHandle },
    InvalidInertia { body: BodyHandle, inertia: f64 },
    InvalidMass { body: BodyHandle, mass: f64 },
    StationaryTarget { body: BodyHandle },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub commands: Vec<Actuation>,
    pub anomalies: Vec<Anomaly>,
    /// Mean of |bearing to ball - heading| over players that could be read,
    /// measured before this tick's commands took effect.
    pub mean_heading_error: Option<f64>,
}

impl TickReport {
    pub fn torque_for(&self, body: BodyHandle) -> Option<f64> {
        self.commands.iter().find_map(|c| match *c {
            Actuation::Torque { body: b, torque } if b == body => Some(torque),
            _ => None,
        })
    }

    pub fn force_for(&self, body: BodyHandle) -> Option<Vector2<f64>> {
        self.commands.iter().find_map(|c| match *c {
            Actuation::Force { body: b, force } if b == body => Some(force),
            _ => None,
        })
    }
}

pub struct Orchestrator {
    players: Vec<BodyHandle>,
    target: BodyHandle,
    strategy: SteeringStrategy,
    angular: AngularController,
    linear: LinearController,
}

impl Orchestrator {
    pub fn new(
        config: &ControllerConfig,
        players: Vec<BodyHandle>,
        target: BodyHandle,
    ) -> Result<Orchestrator> {
        config.validate()?;
        Ok(Orchestrator {
            players,
            target,
            strategy: config.strategy,
            angular: config.angular()?,
            linear: config.linear()?,
        })
    }

    pub fn players(&self) -> &[BodyHandle] {
        &self.players
    }

    pub fn target(&self) -> BodyHandle {
        self.target
    }

    pub fn strategy(&self) -> SteeringStrategy {
        self.strategy
    }

    /// Commands for this tick, without touching the engine.
    pub fn plan<E: PhysicsEngine + ?Sized>(&self, engine: &E) -> TickReport {
        let mut report = TickReport::default();
        let target = match engine.body_state(self.target) {
            Some(target) => target,
            None => {
                log::warn!("Target body {:?} is missing, skipping control", self.target);
                report.anomalies.push(Anomaly::MissingTarget { body: self.target });
                return report;
            }
        };

        let mut total_error = 0.0;
        let mut measured = 0;
        for &handle in self.players.iter() {
            let body = match engine.body_state(handle) {
                Some(body) => body,
                None => {
                    log::warn!("Player body {:?} is missing", handle);
                    report.anomalies.push(Anomaly::MissingBody { body: handle });
                    continue;
                }
            };

            let to_target = target.position - body.position;
            let desired = if to_target.norm() > MIN_BEARING_DISTANCE {
                total_error += angle_between(heading_vector(body.heading), to_target).abs();
                measured += 1;
                bearing_to(body.position, target.position)
            } else {
                body.heading
            };

            if self.strategy.uses_torque() {
                self.plan_torque(&body, desired, &mut report);
            }
            if self.strategy.uses_force() {
                self.plan_force(&body, &target, &mut report);
            }
        }

        if measured > 0 {
            report.mean_heading_error = Some(total_error / measured as f64);
        }
        report
    }

    fn plan_torque(&self, body: &BodyState, desired: f64, report: &mut TickReport) {
        match self
            .angular
            .torque(body.heading, desired, body.angular_velocity, body.inertia)
        {
            Some(torque) => report.commands.push(Actuation::Torque {
                body: body.handle,
                torque,
            }),
            None => {
                log::warn!(
                    "Player {:?} has invalid inertia {}, skipping torque",
                    body.handle,
                    body.inertia
                );
                report.anomalies.push(Anomaly::InvalidInertia {
                    body: body.handle,
                    inertia: body.inertia,
                });
            }
        }
    }

    fn plan_force(&self, body: &BodyState, target: &BodyState, report: &mut TickReport) {
        match self.linear.force(body, target) {
            Ok(force) => report.commands.push(Actuation::Force {
                body: body.handle,
                force,
            }),
            Err(NoForce::InvalidMass) => {
                log::warn!(
                    "Player {:?} has invalid mass {}, skipping force",
                    body.handle,
                    body.mass
                );
                report.anomalies.push(Anomaly::InvalidMass {
                    body: body.handle,
                    mass: body.mass,
                });
            }
            Err(NoForce::StationaryTarget) => {
                log::debug!("Ball is at rest, no force for {:?}", body.handle);
                report
                    .anomalies
                    .push(Anomaly::StationaryTarget { body: body.handle });
            }
        }
    }

    /// Plans, applies every command, then advances the engine one step.
    pub fn tick<E: PhysicsEngine + ?Sized>(&mut self, engine: &mut E) -> TickReport {
        let report = self.plan(&*engine);
        for command in report.commands.iter() {
            match *command {
                Actuation::Torque { body, torque } => engine.apply_torque(body, torque),
                Actuation::Force { body, force } => engine.apply_force(body, force),
            }
        }
        engine.advance();
        report
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::controller::{BrakingLaw, ControlLimits};
    use crate::engine::Index;
    use crate::math::normalize_angle;
    use nalgebra::vector;
    use std::collections::HashMap;
    use std::f64::consts::{PI, TAU};
    use test_log::test;

    const TICK: f64 = 1.0 / 60.0;

    /// Frictionless bodies integrated with semi-implicit Euler.
    #[derive(Default)]
    struct SyntheticEngine {
        bodies: HashMap<BodyHandle, BodyState>,
        torques: HashMap<BodyHandle, f64>,
        forces: HashMap<BodyHandle, Vector2<f64>>,
        log: Vec<&'static str>,
    }

    impl SyntheticEngine {
        fn add(
            &mut self,
            id: u32,
            position: Vector2<f64>,
            velocity: Vector2<f64>,
            heading: f64,
        ) -> BodyHandle {
            let handle = BodyHandle(Index::from_raw_parts(id, 0));
            self.bodies.insert(
                handle,
                BodyState {
                    handle,
                    position,
                    velocity,
                    heading,
                    angular_velocity: 0.0,
                    inertia: 0.5,
                    mass: 2.0,
                },
            );
            handle
        }

        fn body_mut(&mut self, handle: BodyHandle) -> &mut BodyState {
            self.bodies.get_mut(&handle).unwrap()
        }
    }

    impl PhysicsEngine for SyntheticEngine {
        fn body_state(&self, handle: BodyHandle) -> Option<BodyState> {
            self.bodies.get(&handle).copied()
        }

        fn apply_torque(&mut self, handle: BodyHandle, torque: f64) {
            self.log.push("torque");
            *self.torques.entry(handle).or_default() += torque;
        }

        fn apply_force(&mut self, handle: BodyHandle, force: Vector2<f64>) {
            self.log.push("force");
            *self.forces.entry(handle).or_insert_with(Vector2::zeros) += force;
        }

        fn advance(&mut self) {
            self.log.push("advance");
            for body in self.bodies.values_mut() {
                let torque = self.torques.remove(&body.handle).unwrap_or(0.0);
                let force = self.forces.remove(&body.handle).unwrap_or_else(Vector2::zeros);
                if body.inertia > 0.0 {
                    body.angular_velocity += torque / body.inertia * TICK;
                }
                if body.mass > 0.0 {
                    body.velocity += force / body.mass * TICK;
                }
                body.heading = normalize_angle(body.heading + body.angular_velocity * TICK);
                body.position += body.velocity * TICK;
            }
        }
    }

    fn config(strategy: SteeringStrategy) -> ControllerConfig {
        ControllerConfig {
            limits: ControlLimits {
                max_angular_acceleration: TAU,
                max_acceleration: 10.0,
                max_speed: 20.0,
            },
            strategy,
            braking: BrakingLaw::Kinematic,
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 0.0], vector![0.0, 0.0], 0.0);
        let mut bad = config(SteeringStrategy::TorqueOnly);
        bad.limits.max_angular_acceleration = 0.0;
        assert!(Orchestrator::new(&bad, vec![], ball).is_err());
        let mut bad = config(SteeringStrategy::TorqueOnly);
        bad.limits.max_acceleration = -3.0;
        assert!(Orchestrator::new(&bad, vec![], ball).is_err());
    }

    #[test]
    fn test_commands_precede_advance() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 0.0], vector![1.0, 0.0], 0.0);
        let players = vec![
            engine.add(1, vector![0.0, 5.0], vector![0.0, 0.0], 0.0),
            engine.add(2, vector![0.0, -5.0], vector![0.0, 0.0], 0.0),
        ];
        let mut orch =
            Orchestrator::new(&config(SteeringStrategy::Combined), players, ball).unwrap();
        let report = orch.tick(&mut engine);
        assert_eq!(report.commands.len(), 4);
        assert_eq!(engine.log.last(), Some(&"advance"));
        assert_eq!(engine.log.iter().filter(|x| **x == "advance").count(), 1);
    }

    #[test]
    fn test_turns_toward_ball() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 10.0], vector![0.0, 0.0], 0.0);
        let player = engine.add(1, vector![0.0, 0.0], vector![0.0, 0.0], 0.0);
        let mut orch =
            Orchestrator::new(&config(SteeringStrategy::TorqueOnly), vec![player], ball).unwrap();
        let report = orch.tick(&mut engine);
        assert!(report.torque_for(player).unwrap() > 0.0);
        assert!(report.force_for(player).is_none());
        assert!((report.mean_heading_error.unwrap() - PI / 2.0).abs() < 1e-9);
        assert!(engine.body_state(player).unwrap().angular_velocity > 0.0);
    }

    #[test]
    fn test_skips_invalid_inertia() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 10.0], vector![0.0, 0.0], 0.0);
        let good = engine.add(1, vector![0.0, 0.0], vector![0.0, 0.0], 0.0);
        let bad = engine.add(2, vector![5.0, 0.0], vector![0.0, 0.0], 0.0);
        engine.body_mut(bad).inertia = 0.0;
        let mut orch = Orchestrator::new(
            &config(SteeringStrategy::TorqueOnly),
            vec![bad, good],
            ball,
        )
        .unwrap();
        let report = orch.tick(&mut engine);
        assert!(report.torque_for(good).is_some());
        assert!(report.torque_for(bad).is_none());
        assert_eq!(
            report.anomalies,
            vec![Anomaly::InvalidInertia {
                body: bad,
                inertia: 0.0
            }]
        );
    }

    #[test]
    fn test_stationary_ball_skips_force_only() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 10.0], vector![0.0, 0.0], 0.0);
        let player = engine.add(1, vector![0.0, 0.0], vector![0.0, 0.0], 0.0);
        let mut orch =
            Orchestrator::new(&config(SteeringStrategy::Combined), vec![player], ball).unwrap();
        let report = orch.tick(&mut engine);
        assert!(report.torque_for(player).is_some());
        assert!(report.force_for(player).is_none());
        assert_eq!(
            report.anomalies,
            vec![Anomaly::StationaryTarget { body: player }]
        );
    }

    #[test]
    fn test_missing_bodies() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 10.0], vector![0.0, 0.0], 0.0);
        let player = engine.add(1, vector![0.0, 0.0], vector![0.0, 0.0], 0.0);
        let ghost = BodyHandle(Index::from_raw_parts(99, 0));

        let mut orch =
            Orchestrator::new(&config(SteeringStrategy::TorqueOnly), vec![ghost, player], ball)
                .unwrap();
        let report = orch.tick(&mut engine);
        assert_eq!(report.anomalies, vec![Anomaly::MissingBody { body: ghost }]);
        assert_eq!(report.commands.len(), 1);

        let mut orch =
            Orchestrator::new(&config(SteeringStrategy::TorqueOnly), vec![player], ghost).unwrap();
        let report = orch.tick(&mut engine);
        assert_eq!(report.anomalies, vec![Anomaly::MissingTarget { body: ghost }]);
        assert!(report.commands.is_empty());
        assert_eq!(engine.log.last(), Some(&"advance"));
    }

    #[test]
    fn test_coincident_ball_holds_heading() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![1.0, 1.0], vector![0.0, 0.0], 0.0);
        let player = engine.add(1, vector![1.0, 1.0], vector![0.0, 0.0], 0.3);
        let orch =
            Orchestrator::new(&config(SteeringStrategy::TorqueOnly), vec![player], ball).unwrap();
        let report = orch.plan(&engine);
        assert!(report.mean_heading_error.is_none());
        assert_eq!(report.commands.len(), 1);
    }

    #[test]
    fn test_plan_is_pure() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![3.0, -4.0], vector![1.0, 2.0], 0.0);
        let player = engine.add(1, vector![0.0, 0.0], vector![0.5, 0.0], 2.0);
        engine.body_mut(player).angular_velocity = -0.7;
        let orch =
            Orchestrator::new(&config(SteeringStrategy::Combined), vec![player], ball).unwrap();
        let first = orch.plan(&engine);
        for _ in 0..5 {
            assert_eq!(orch.plan(&engine), first);
        }
        assert!(engine.log.is_empty());
    }

    #[test]
    fn test_roster_converges_on_moving_ball() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 0.0], vector![1.0, 0.5], 0.0);
        let players: Vec<BodyHandle> = (0..10)
            .map(|i| {
                let a = i as f64 * TAU / 10.0;
                engine.add(
                    i + 1,
                    vector![30.0 * a.cos(), 30.0 * a.sin()],
                    vector![0.0, 0.0],
                    normalize_angle(a * 3.7 + 1.0),
                )
            })
            .collect();
        let mut orch =
            Orchestrator::new(&config(SteeringStrategy::TorqueOnly), players, ball).unwrap();

        let initial = orch.tick(&mut engine).mean_heading_error.unwrap();
        let mut last = initial;
        for _ in 0..600 {
            last = orch.tick(&mut engine).mean_heading_error.unwrap();
        }
        assert!(last < initial);
        assert!(last < 0.05, "mean heading error {last}");
    }

    #[test]
    fn test_facing_players_stay_facing() {
        let mut engine = SyntheticEngine::default();
        let ball = engine.add(0, vector![0.0, 0.0], vector![0.0, 0.0], 0.0);
        let players: Vec<BodyHandle> = (0..4)
            .map(|i| {
                let a = i as f64 * TAU / 4.0;
                let p = vector![10.0 * a.cos(), 10.0 * a.sin()];
                engine.add(i + 1, p, vector![0.0, 0.0], bearing_to(p, vector![0.0, 0.0]))
            })
            .collect();
        let mut orch =
            Orchestrator::new(&config(SteeringStrategy::TorqueOnly), players, ball).unwrap();
        for _ in 0..600 {
            let error = orch.tick(&mut engine).mean_heading_error.unwrap();
            assert!(error < 0.01, "mean heading error {error}");
        }
    }
}
