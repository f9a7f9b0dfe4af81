mod kickabout;
mod pursuit;
mod swarm;

use crate::ball::{self, BallData};
use crate::collision::Arena;
use crate::controller::ControllerConfig;
use crate::engine::BodyHandle;
use crate::player;
use crate::rng::SeededRng;
use crate::simulation::{PhysicsConfig, Simulation};
use nalgebra::{vector, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

pub mod prelude {
    pub use super::{kick_off, place_ball, random_position, Lineup, Scenario, DEFAULT_MAX_TICKS};
    pub use crate::ball::{self, BallData};
    pub use crate::collision::{add_walls, Arena};
    pub use crate::controller::{
        BrakingLaw, ControlLimits, ControllerConfig, ForceClamp, SteeringStrategy,
    };
    pub use crate::engine::BodyHandle;
    pub use crate::player::{self, player};
    pub use crate::rng::{new_rng, stream_rng, SeededRng};
    pub use crate::simulation::{PhysicsConfig, Simulation};
    pub use nalgebra::{vector, Vector2};
    pub use rand::Rng;
    pub use std::f64::consts::{PI, TAU};
}

pub const DEFAULT_MAX_TICKS: u32 = 60 * 60;

#[derive(PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Copy, Clone)]
pub enum Status {
    Running,
    Finished,
}

/// The bodies a scenario hands to the controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineup {
    pub players: Vec<BodyHandle>,
    pub ball: BodyHandle,
}

pub trait Scenario {
    fn name(&self) -> String;

    fn human_name(&self) -> String {
        self.name()
    }

    fn arena(&self) -> Arena {
        Arena::default()
    }

    fn physics(&self) -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn controller_config(&self) -> ControllerConfig {
        ControllerConfig::default()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32) -> Lineup;

    /// Runs before the controllers each tick.
    fn tick(&mut self, _: &mut Simulation) {}

    fn max_ticks(&self) -> u32 {
        DEFAULT_MAX_TICKS
    }
}

pub fn load_safe(name: &str) -> Option<Box<dyn Scenario>> {
    let scenario: Option<Box<dyn Scenario>> = match name {
        "test" => Some(Box::new(test::TestScenario {})),
        "kickabout" => Some(Box::new(kickabout::Kickabout::new())),
        "legacy" => Some(Box::new(kickabout::Kickabout::legacy())),
        "swarm" => Some(Box::new(swarm::Swarm::new())),
        "pursuit" => Some(Box::new(pursuit::Pursuit::new())),
        _ => None,
    };
    if let Some(scenario) = scenario.as_ref() {
        debug_assert_eq!(scenario.name(), name);
    }
    scenario
}

pub fn list() -> Vec<String> {
    vec!["kickabout", "legacy", "swarm", "pursuit"]
        .iter()
        .map(|x| x.to_string())
        .collect()
}

/// Uniform position at least `margin` away from every wall.
pub fn random_position(rng: &mut SeededRng, arena: Arena, margin: f64) -> Vector2<f64> {
    let bx = (arena.half_width - margin).max(0.0);
    let by = (arena.half_height - margin).max(0.0);
    vector![rng.gen_range(-bx..=bx), rng.gen_range(-by..=by)]
}

/// Ball at `position` rolling in a random direction at `speed`.
pub fn place_ball(
    sim: &mut Simulation,
    rng: &mut SeededRng,
    position: Vector2<f64>,
    speed: f64,
) -> BodyHandle {
    let angle = rng.gen_range(0.0..TAU);
    ball::create(
        sim,
        position,
        vector![angle.cos(), angle.sin()] * speed,
        BallData::default(),
    )
}

/// Scatters `count` players over the pitch with random headings. With
/// `drift`, each also gets a random linear velocity in `[0, max_speed)` per
/// axis and spin in `[0, 1)`.
pub fn kick_off(
    sim: &mut Simulation,
    rng: &mut SeededRng,
    count: u32,
    drift: Option<f64>,
) -> Vec<BodyHandle> {
    let arena = sim.arena();
    let margin = player::PlayerData::default().radius;
    (0..count)
        .map(|number| {
            let position = random_position(rng, arena, margin);
            let heading = rng.gen_range(0.0..TAU);
            let (velocity, angular_velocity) = match drift {
                Some(max_speed) => (
                    vector![rng.gen_range(0.0..max_speed), rng.gen_range(0.0..max_speed)],
                    rng.gen_range(0.0..1.0),
                ),
                None => (vector![0.0, 0.0], 0.0),
            };
            player::create(
                sim,
                position,
                velocity,
                heading,
                angular_velocity,
                player::player(number + 1),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::new_rng;
    use test_log::test;

    #[test]
    fn test_list_loads() {
        for name in list() {
            let scenario = load_safe(&name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(scenario.name(), name);
        }
        assert!(load_safe("test").is_some());
        assert!(load_safe("tutorial01").is_none());
    }

    #[test]
    fn test_random_position_respects_margin() {
        let mut rng = new_rng(3);
        let arena = Arena {
            half_width: 2.0,
            half_height: 1.0,
        };
        for _ in 0..1000 {
            let p = random_position(&mut rng, arena, 0.5);
            assert!(p.x.abs() <= 1.5 && p.y.abs() <= 0.5, "{p:?}");
        }
    }
}
