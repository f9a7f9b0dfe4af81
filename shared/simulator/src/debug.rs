use crate::engine::{BodyHandle, PhysicsEngine};
use crate::math::heading_vector;
use crate::simulation::Simulation;
use nalgebra::{vector, Point2, Vector2, Vector4};
use serde::{Deserialize, Serialize};

const HEADING_LENGTH: f64 = 1.0;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Line {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub color: Vector4<f32>,
}

/// Wireframe hints for one player: velocity, heading, the line to the ball
/// and the force applied this tick.
pub fn emit_player(sim: &mut Simulation, handle: BodyHandle, force: Option<Vector2<f64>>) {
    let state = match sim.body_state(handle) {
        Some(state) => state,
        None => return,
    };
    let ball = sim.ball().and_then(|ball| sim.body_state(ball));
    let mut lines = Vec::with_capacity(4);
    let p: Point2<f64> = state.position.into();
    lines.push(Line {
        a: p,
        b: p + state.velocity,
        color: vector![0.0, 0.81, 1.0, 1.0],
    });
    lines.push(Line {
        a: p,
        b: p + heading_vector(state.heading) * HEADING_LENGTH,
        color: vector![1.0, 0.2, 0.0, 1.0],
    });
    if let Some(ball) = ball {
        lines.push(Line {
            a: p,
            b: ball.position.into(),
            color: vector![1.0, 1.0, 1.0, 0.2],
        });
    }
    if let Some(force) = force {
        lines.push(Line {
            a: p,
            b: p + force,
            color: vector![0.0, 1.0, 0.2, 1.0],
        });
    }
    sim.emit_debug_lines(handle, &lines);
}
