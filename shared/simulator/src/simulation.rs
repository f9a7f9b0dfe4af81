use crate::ball::BallData;
use crate::collision::{self, Arena};
use crate::debug::Line;
use crate::engine::{BodyHandle, BodyState, PhysicsEngine};
use crate::error::{Error, Result};
use crate::player::PlayerData;
use crate::snapshot::Timing;
use crossbeam::channel::Sender;
use instant::Instant;
use nalgebra::Vector2;
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PHYSICS_TICK_LENGTH: f64 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub dt: f64,
    pub velocity_iterations: usize,
    pub stabilization_iterations: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: PHYSICS_TICK_LENGTH,
            velocity_iterations: 3,
            stabilization_iterations: 3,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(Error::InvalidPhysics(format!(
                "timestep must be positive, got {}",
                self.dt
            )));
        }
        if self.velocity_iterations == 0 || self.stabilization_iterations == 0 {
            return Err(Error::InvalidPhysics(
                "solver iteration counts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The rapier world the players and the ball live in.
pub struct Simulation {
    pub(crate) player_data: HashMap<BodyHandle, PlayerData>,
    pub(crate) players: Vec<BodyHandle>,
    pub(crate) ball: Option<BodyHandle>,
    pub(crate) ball_data: Option<BallData>,
    pub(crate) bodies: RigidBodySet,
    pub(crate) impulse_joints: ImpulseJointSet,
    pub(crate) multibody_joints: MultibodyJointSet,
    pub(crate) colliders: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    pub(crate) island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    event_collector: CollisionEventHandler,
    contact_recv: crossbeam::channel::Receiver<CollisionEvent>,
    pub(crate) events: SimEvents,
    arena: Arena,
    tick: u32,
    pub(crate) timing: Timing,
}

impl Simulation {
    pub fn new(physics: &PhysicsConfig, arena: Arena) -> Result<Simulation> {
        physics.validate()?;
        let (contact_send, contact_recv) = crossbeam::channel::unbounded();
        Ok(Simulation {
            player_data: HashMap::new(),
            players: Vec::new(),
            ball: None,
            ball_data: None,
            bodies: RigidBodySet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            colliders: ColliderSet::new(),
            integration_parameters: IntegrationParameters {
                dt: physics.dt,
                max_velocity_iterations: physics.velocity_iterations,
                max_stabilization_iterations: physics.stabilization_iterations,
                max_ccd_substeps: 2,
                ..Default::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            event_collector: CollisionEventHandler::new(contact_send),
            contact_recv,
            events: SimEvents::new(),
            arena,
            tick: 0,
            timing: Default::default(),
        })
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.tick as f64 * self.integration_parameters.dt
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn players(&self) -> &[BodyHandle] {
        &self.players
    }

    pub fn player(&self, handle: BodyHandle) -> Option<&PlayerData> {
        self.player_data.get(&handle)
    }

    pub fn ball(&self) -> Option<BodyHandle> {
        self.ball
    }

    pub fn ball_data(&self) -> Option<&BallData> {
        self.ball_data.as_ref()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.into())
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.into())
    }

    pub fn events(&self) -> &SimEvents {
        &self.events
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn emit_debug_lines(&mut self, handle: BodyHandle, lines: &[Line]) {
        self.events
            .debug_lines
            .push((handle.into(), lines.to_vec()));
    }

    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        for &handle in self.players.iter().chain(self.ball.iter()) {
            if let Some(state) = self.body_state(handle) {
                s.write_i64(fixedpoint(state.position.x));
                s.write_i64(fixedpoint(state.position.y));
                s.write_i64(fixedpoint(state.heading));
                s.write_i64(fixedpoint(state.velocity.x));
                s.write_i64(fixedpoint(state.velocity.y));
                s.write_i64(fixedpoint(state.angular_velocity));
            }
        }
        s.finish()
    }
}

impl PhysicsEngine for Simulation {
    fn body_state(&self, handle: BodyHandle) -> Option<BodyState> {
        let body = self.body(handle)?;
        let inv_inertia_sqrt = body.mass_properties().local_mprops.inv_principal_inertia_sqrt;
        // A zero inverse means infinite or undefined inertia; neither can be
        // steered with a bounded torque.
        let inertia = if inv_inertia_sqrt > 0.0 {
            let inertia_sqrt = 1.0 / inv_inertia_sqrt;
            inertia_sqrt * inertia_sqrt
        } else {
            0.0
        };
        Some(BodyState {
            handle,
            position: *body.translation(),
            velocity: *body.linvel(),
            heading: body.rotation().angle(),
            angular_velocity: body.angvel(),
            inertia,
            mass: body.mass(),
        })
    }

    fn apply_torque(&mut self, handle: BodyHandle, torque: f64) {
        if let Some(body) = self.body_mut(handle) {
            body.add_torque(torque, true);
        }
    }

    fn apply_force(&mut self, handle: BodyHandle, force: Vector2<f64>) {
        if let Some(body) = self.body_mut(handle) {
            body.add_force(force, true);
        }
    }

    fn advance(&mut self) {
        self.events.clear();
        let physics_start_time = Instant::now();
        let gravity = vector![0.0, 0.0];
        let physics_hooks = ();
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &self.event_collector,
        );

        // User forces persist in rapier until cleared; commands only last a
        // tick.
        for &handle in self.players.iter() {
            if let Some(body) = self.bodies.get_mut(handle.into()) {
                body.reset_forces(false);
                body.reset_torques(false);
            }
        }

        let mut events = vec![];
        while let Ok(event) = self.contact_recv.try_recv() {
            events.push(event);
        }
        collision::handle_collisions(self, &events);

        self.tick += 1;
        self.timing.physics = (Instant::now() - physics_start_time).as_secs_f64();
    }
}

pub struct CollisionEventHandler {
    collision_event_sender: Sender<CollisionEvent>,
}

impl CollisionEventHandler {
    pub fn new(collision_event_sender: Sender<CollisionEvent>) -> CollisionEventHandler {
        CollisionEventHandler {
            collision_event_sender,
        }
    }
}

impl EventHandler for CollisionEventHandler {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let _ = self.collision_event_sender.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// What happened during the most recent step.
#[derive(Debug, Default, Clone)]
pub struct SimEvents {
    /// Ids of players that started touching the ball.
    pub touches: Vec<u64>,
    pub ball_wall_hits: u32,
    pub player_collisions: u32,
    /// Kept across `advance()`; the host clears them when it starts a tick.
    pub debug_lines: Vec<(u64, Vec<Line>)>,
}

impl SimEvents {
    pub fn new() -> Self {
        Default::default()
    }

    /// Resets the collision counters. Debug lines are left alone.
    pub fn clear(&mut self) {
        self.touches.clear();
        self.ball_wall_hits = 0;
        self.player_collisions = 0;
    }
}
