use crate::collision::Arena;
use crate::controller::SteeringStrategy;
use crate::debug::Line;
use crate::scenario::Status;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Snapshot {
    pub scenario: String,
    pub seed: u32,
    pub tick: u32,
    pub time: f64,
    pub status: Status,
    pub strategy: SteeringStrategy,
    pub arena: Arena,
    pub players: Vec<PlayerSnapshot>,
    pub ball: Option<BallSnapshot>,
    pub touches: Vec<u64>,
    pub ball_wall_hits: u32,
    pub player_collisions: u32,
    pub mean_heading_error: Option<f64>,
    pub anomalies: usize,
    pub debug_lines: Vec<(u64, Vec<Line>)>,
    pub timing: Timing,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PlayerSnapshot {
    pub id: u64,
    pub number: u32,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub heading: f64,
    pub angular_velocity: f64,
    pub bearing_error: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BallSnapshot {
    pub id: u64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
}

/// Seconds spent in the last tick.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Timing {
    pub physics: f64,
    pub control: f64,
}

impl Timing {
    pub fn total(&self) -> f64 {
        self.physics + self.control
    }
}
