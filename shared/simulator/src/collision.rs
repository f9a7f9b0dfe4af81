use crate::engine::BodyHandle;
use crate::simulation::Simulation;
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};

const WALL_COLLISION_GROUP: Group = Group::GROUP_1;
const PLAYER_COLLISION_GROUP: Group = Group::GROUP_2;
const BALL_COLLISION_GROUP: Group = Group::GROUP_3;

const WALL_THICKNESS: f64 = 1.0;
const WALL_FRICTION: f64 = 0.5;
const WALL_RESTITUTION: f64 = 0.98;

/// The playing field: an axis-aligned rectangle centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub half_width: f64,
    pub half_height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            half_width: 35.0,
            half_height: 45.0,
        }
    }
}

impl Arena {
    pub fn contains(&self, p: Vector<Real>) -> bool {
        p.x.abs() <= self.half_width && p.y.abs() <= self.half_height
    }
}

pub fn wall_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(
        WALL_COLLISION_GROUP,
        PLAYER_COLLISION_GROUP | BALL_COLLISION_GROUP,
    )
}

pub fn player_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(
        PLAYER_COLLISION_GROUP,
        WALL_COLLISION_GROUP | PLAYER_COLLISION_GROUP | BALL_COLLISION_GROUP,
    )
}

pub fn ball_interaction_groups() -> InteractionGroups {
    InteractionGroups::new(
        BALL_COLLISION_GROUP,
        WALL_COLLISION_GROUP | PLAYER_COLLISION_GROUP,
    )
}

pub fn handle_collisions(sim: &mut Simulation, events: &[CollisionEvent]) {
    for event in events {
        if let CollisionEvent::Started(h1, h2, _flags) = event {
            let get_parent = |h| sim.colliders.get(h).and_then(|x| x.parent());
            if let (Some(b1), Some(b2)) = (get_parent(*h1), get_parent(*h2)) {
                #[derive(Ord, Eq, PartialOrd, PartialEq)]
                enum Collider {
                    Ball,
                    Player(u64),
                    Wall,
                }
                let classify_collider = |handle: RigidBodyHandle| {
                    let handle = BodyHandle::from(handle);
                    if sim.ball == Some(handle) {
                        Collider::Ball
                    } else if sim.player_data.contains_key(&handle) {
                        Collider::Player(handle.into())
                    } else {
                        Collider::Wall
                    }
                };
                let mut collider_types = [classify_collider(b1), classify_collider(b2)];
                collider_types.sort();
                match collider_types {
                    [Collider::Ball, Collider::Player(id)] => {
                        log::debug!("Player {id} touched the ball");
                        sim.events.touches.push(id);
                    }
                    [Collider::Ball, Collider::Wall] => {
                        sim.events.ball_wall_hits += 1;
                    }
                    [Collider::Player(_), Collider::Player(_)] => {
                        sim.events.player_collisions += 1;
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Fences `arena` in with four fixed walls whose inner faces lie on its
/// boundary.
pub fn add_walls(sim: &mut Simulation) {
    let arena = sim.arena();
    let mut make_edge = |x: f64, y: f64, half_length: f64, a: f64| {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vector![x, y])
            .rotation(a)
            .build();
        let body_handle = sim.bodies.insert(rigid_body);
        let collider = ColliderBuilder::cuboid(half_length, WALL_THICKNESS / 2.0)
            .friction(WALL_FRICTION)
            .restitution(WALL_RESTITUTION)
            .collision_groups(wall_interaction_groups())
            .build();
        sim.colliders
            .insert_with_parent(collider, body_handle, &mut sim.bodies);
    };
    let offset = WALL_THICKNESS / 2.0;
    let w = arena.half_width;
    let h = arena.half_height;
    make_edge(0.0, h + offset, w + WALL_THICKNESS, 0.0);
    make_edge(0.0, -h - offset, w + WALL_THICKNESS, std::f64::consts::PI);
    make_edge(w + offset, 0.0, h + WALL_THICKNESS, std::f64::consts::PI / 2.0);
    make_edge(
        -w - offset,
        0.0,
        h + WALL_THICKNESS,
        3.0 * std::f64::consts::PI / 2.0,
    );
}
