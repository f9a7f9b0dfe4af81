use approx::assert_abs_diff_eq;
use nalgebra::vector;
use pitch_simulator::ball::{self, BallData};
use pitch_simulator::collision::{add_walls, Arena};
use pitch_simulator::engine::{BodyHandle, Index, PhysicsEngine};
use pitch_simulator::math::{angle_between, heading_vector, normalize_angle};
use pitch_simulator::player;
use pitch_simulator::simulation::{PhysicsConfig, Simulation};
use pitch_simulator::{Anomaly, ControllerConfig, Orchestrator, SteeringStrategy};
use std::f64::consts::{PI, TAU};
use test_log::test;

fn ring(sim: &mut Simulation, count: u32, radius: f64) -> Vec<BodyHandle> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            player::create(
                sim,
                vector![angle.cos(), angle.sin()] * radius,
                vector![0.0, 0.0],
                normalize_angle(angle + PI / 2.0 + 0.3 * i as f64),
                0.0,
                player::player(i + 1),
            )
        })
        .collect()
}

#[test]
fn test_ring_turns_to_face_ball() {
    let mut sim = Simulation::new(&PhysicsConfig::default(), Arena::default()).unwrap();
    add_walls(&mut sim);
    let players = ring(&mut sim, 10, 20.0);
    let ball = ball::create(
        &mut sim,
        vector![0.0, 0.0],
        vector![0.5, 0.0],
        BallData::default(),
    );
    let mut orchestrator =
        Orchestrator::new(&ControllerConfig::default(), players.clone(), ball).unwrap();

    let first = orchestrator.tick(&mut sim);
    assert!(first.anomalies.is_empty(), "{:?}", first.anomalies);
    assert_eq!(first.commands.len(), 10);

    let mut last = first;
    for _ in 0..600 {
        last = orchestrator.tick(&mut sim);
    }
    assert!(last.mean_heading_error.unwrap() < 0.05, "{:?}", last);

    let ball_position = sim.body_state(ball).unwrap().position;
    for &handle in players.iter() {
        let state = sim.body_state(handle).unwrap();
        let error = angle_between(heading_vector(state.heading), ball_position - state.position);
        assert!(error.abs() < 0.1, "player {:?} error {}", handle, error);
        // Torque alone must not move anyone.
        assert_abs_diff_eq!(state.velocity.norm(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_combined_closes_on_the_ball_line() {
    let mut sim = Simulation::new(&PhysicsConfig::default(), Arena::default()).unwrap();
    let players = vec![player::create(
        &mut sim,
        vector![0.0, 10.0],
        vector![0.0, 0.0],
        0.0,
        0.0,
        player::player(1),
    )];
    let ball = ball::create(
        &mut sim,
        vector![-20.0, 0.0],
        vector![1.0, 0.0],
        BallData::default(),
    );
    let config = ControllerConfig {
        strategy: SteeringStrategy::Combined,
        ..Default::default()
    };
    let mut orchestrator = Orchestrator::new(&config, players.clone(), ball).unwrap();

    let start = sim.body_state(players[0]).unwrap().position.y;
    for _ in 0..60 {
        orchestrator.tick(&mut sim);
    }
    let end = sim.body_state(players[0]).unwrap();
    assert!(end.position.y < start, "{:?}", end);
    assert!(end.velocity.norm() <= config.limits.max_speed + 1.0);
}

#[test]
fn test_missing_ball_still_advances() {
    let mut sim = Simulation::new(&PhysicsConfig::default(), Arena::default()).unwrap();
    let players = ring(&mut sim, 2, 5.0);
    let gone = BodyHandle(Index::from_raw_parts(999, 0));
    let mut orchestrator = Orchestrator::new(&ControllerConfig::default(), players, gone).unwrap();
    let report = orchestrator.tick(&mut sim);
    assert!(report.commands.is_empty());
    assert_eq!(report.anomalies, vec![Anomaly::MissingTarget { body: gone }]);
    assert_eq!(sim.tick(), 1);
}
