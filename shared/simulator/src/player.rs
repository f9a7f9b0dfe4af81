use crate::collision;
use crate::engine::BodyHandle;
use crate::simulation::Simulation;
use nalgebra::Vector2;
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    /// Shirt number, for logs and snapshots.
    pub number: u32,
    pub radius: f64,
    pub density: f64,
    pub friction: f64,
    pub restitution: f64,
}

impl Default for PlayerData {
    fn default() -> PlayerData {
        PlayerData {
            number: 0,
            radius: 0.3,
            density: 1.0,
            friction: 0.5,
            restitution: 1.0,
        }
    }
}

pub fn player(number: u32) -> PlayerData {
    PlayerData {
        number,
        ..Default::default()
    }
}

pub fn create(
    sim: &mut Simulation,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    heading: f64,
    angular_velocity: f64,
    data: PlayerData,
) -> BodyHandle {
    let rigid_body = RigidBodyBuilder::dynamic()
        .translation(position)
        .linvel(velocity)
        .rotation(heading)
        .angvel(angular_velocity)
        .build();
    let body_handle = sim.bodies.insert(rigid_body);
    let handle = BodyHandle::from(body_handle);
    let collider = ColliderBuilder::ball(data.radius)
        .density(data.density)
        .friction(data.friction)
        .restitution(data.restitution)
        .collision_groups(collision::player_interaction_groups())
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build();
    sim.colliders
        .insert_with_parent(collider, body_handle, &mut sim.bodies);
    // Mass is otherwise only computed on the next step, and the controllers
    // read it before that.
    if let Some(body) = sim.bodies.get_mut(body_handle) {
        body.recompute_mass_properties_from_colliders(&sim.colliders);
    }

    log::debug!("Created player {} at {:?}", data.number, position);
    sim.players.push(handle);
    sim.player_data.insert(handle, data);
    handle
}
