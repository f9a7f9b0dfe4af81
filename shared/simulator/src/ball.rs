use crate::collision;
use crate::engine::BodyHandle;
use crate::simulation::Simulation;
use nalgebra::Vector2;
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallData {
    pub radius: f64,
    pub density: f64,
    pub friction: f64,
    pub restitution: f64,
    pub linear_damping: f64,
}

impl Default for BallData {
    fn default() -> BallData {
        BallData {
            radius: 0.22,
            density: 0.5,
            friction: 0.2,
            restitution: 0.9,
            linear_damping: 0.0,
        }
    }
}

/// Places the ball. A world has at most one; creating another replaces the
/// handle the simulation reports but leaves the old body in place.
pub fn create(
    sim: &mut Simulation,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    data: BallData,
) -> BodyHandle {
    let rigid_body = RigidBodyBuilder::dynamic()
        .translation(position)
        .linvel(velocity)
        .linear_damping(data.linear_damping)
        .ccd_enabled(true)
        .build();
    let body_handle = sim.bodies.insert(rigid_body);
    let handle = BodyHandle::from(body_handle);
    let collider = ColliderBuilder::ball(data.radius)
        .density(data.density)
        .friction(data.friction)
        .restitution(data.restitution)
        .collision_groups(collision::ball_interaction_groups())
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build();
    sim.colliders
        .insert_with_parent(collider, body_handle, &mut sim.bodies);
    if let Some(body) = sim.bodies.get_mut(body_handle) {
        body.recompute_mass_properties_from_colliders(&sim.colliders);
    }

    if sim.ball.is_some() {
        log::warn!("Replacing existing ball");
    }
    sim.ball = Some(handle);
    sim.ball_data = Some(data);
    handle
}
