//! The seam between the controllers and whatever integrates the bodies.
//!
//! The controllers never hold physical state. Each tick they read a
//! [`BodyState`] per body through a [`PhysicsEngine`], compute commands, and
//! hand them back before asking the engine to advance.

use nalgebra::Vector2;
pub use rapier2d_f64::data::arena::Index;
use rapier2d_f64::prelude::RigidBodyHandle;

#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug)]
pub struct BodyHandle(pub Index);

impl BodyHandle {
    pub fn index(self) -> Index {
        self.0
    }
}

impl From<BodyHandle> for u64 {
    fn from(handle: BodyHandle) -> u64 {
        let (idx, gen) = handle.0.into_raw_parts();
        ((gen as u64) << 32) | idx as u64
    }
}

impl From<BodyHandle> for RigidBodyHandle {
    fn from(handle: BodyHandle) -> Self {
        RigidBodyHandle(handle.index())
    }
}

impl From<RigidBodyHandle> for BodyHandle {
    fn from(handle: RigidBodyHandle) -> Self {
        BodyHandle(handle.0)
    }
}

/// One body as seen at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub handle: BodyHandle,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Radians in `(-PI, PI]`.
    pub heading: f64,
    pub angular_velocity: f64,
    /// Zero when the body has no rotational inertia to act on.
    pub inertia: f64,
    pub mass: f64,
}

pub trait PhysicsEngine {
    fn body_state(&self, handle: BodyHandle) -> Option<BodyState>;

    /// Adds `torque` for the next [`advance`](PhysicsEngine::advance),
    /// waking the body if it sleeps.
    fn apply_torque(&mut self, handle: BodyHandle, torque: f64);

    /// Adds `force` at the center of mass for the next
    /// [`advance`](PhysicsEngine::advance), waking the body if it sleeps.
    fn apply_force(&mut self, handle: BodyHandle, force: Vector2<f64>);

    /// Integrates one fixed timestep. Commands applied before the call act on
    /// that step only.
    fn advance(&mut self);
}
