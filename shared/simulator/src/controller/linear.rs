//! Steering toward the ball's line of travel.
//!
//! Rather than chasing where the ball is, a body is pushed toward the closest
//! point on the line the ball is moving along: the perpendicular foot of the
//! body on that line. A body already on the line gets no push at all.

use crate::engine::BodyState;
use crate::error::{check_limit, Result};
use crate::math::project_onto_and_reject;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Below this speed the ball has no usable direction of travel.
pub const MIN_TARGET_SPEED: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceClamp {
    /// Scale the vector down so its length is at most the limit.
    #[default]
    Length,
    /// Clamp x and y independently. Diagonal commands can exceed the limit
    /// by up to a factor of sqrt(2).
    PerAxis,
}

impl ForceClamp {
    pub fn apply(&self, v: Vector2<f64>, max: f64) -> Vector2<f64> {
        match self {
            ForceClamp::Length => {
                let len = v.norm();
                if len > max {
                    v * (max / len)
                } else {
                    v
                }
            }
            ForceClamp::PerAxis => Vector2::new(v.x.clamp(-max, max), v.y.clamp(-max, max)),
        }
    }
}

/// Why a body got no force this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoForce {
    StationaryTarget,
    InvalidMass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearController {
    max_acceleration: f64,
    max_speed: f64,
    clamp: ForceClamp,
}

impl LinearController {
    pub fn new(max_acceleration: f64, max_speed: f64, clamp: ForceClamp) -> Result<Self> {
        Ok(Self {
            max_acceleration: check_limit("max_acceleration", max_acceleration)?,
            max_speed: check_limit("max_speed", max_speed)?,
            clamp,
        })
    }

    /// Bounded acceleration taking a body at `position` toward the line
    /// through `target_position` along `target_velocity`.
    pub fn acceleration(
        &self,
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        target_position: Vector2<f64>,
        target_velocity: Vector2<f64>,
    ) -> Option<Vector2<f64>> {
        let target_speed = target_velocity.norm();
        if !(target_speed > MIN_TARGET_SPEED) {
            return None;
        }
        let n = target_velocity / target_speed;
        let (_, nearest) = project_onto_and_reject(target_position, position, n);
        let mut acc = self.clamp.apply(nearest, self.max_acceleration);

        let speed = velocity.norm();
        if speed >= self.max_speed && speed > 0.0 {
            let u = velocity / speed;
            let along = acc.dot(&u);
            if along > 0.0 {
                acc -= u * along;
            }
        }
        Some(acc)
    }

    /// Force at the center of mass of `body` steering it toward `target`'s
    /// line of travel.
    pub fn force(
        &self,
        body: &BodyState,
        target: &BodyState,
    ) -> std::result::Result<Vector2<f64>, NoForce> {
        if !(body.mass.is_finite() && body.mass > 0.0) {
            return Err(NoForce::InvalidMass);
        }
        self.acceleration(body.position, body.velocity, target.position, target.velocity)
            .map(|acc| acc * body.mass)
            .ok_or(NoForce::StationaryTarget)
    }
}
