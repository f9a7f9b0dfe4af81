//! Bang-bang heading control.
//!
//! Every decision is full torque one way or the other: keep accelerating
//! toward the desired heading while there is room to stop, otherwise brake.
//! The magnitude is always `max_angular_acceleration * inertia`, so the body
//! sees exactly `max_angular_acceleration` regardless of its size.

use crate::error::{check_limit, Result};
use crate::math::normalize_angle;
use serde::{Deserialize, Serialize};

/// How far the body would still turn if it started braking now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrakingLaw {
    /// `w² / (2 a)`.
    #[default]
    Kinematic,
    /// `0.5 w² I² / a`. Agrees with `Kinematic` only when `I == 1`; small
    /// bodies brake late and overshoot.
    Legacy,
}

impl BrakingLaw {
    pub fn stopping_angle(
        &self,
        angular_velocity: f64,
        inertia: f64,
        max_angular_acceleration: f64,
    ) -> f64 {
        let w2 = angular_velocity * angular_velocity;
        match self {
            BrakingLaw::Kinematic => w2 / (2.0 * max_angular_acceleration),
            BrakingLaw::Legacy => 0.5 * w2 * inertia * inertia / max_angular_acceleration,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularController {
    max_angular_acceleration: f64,
    braking: BrakingLaw,
}

impl AngularController {
    pub fn new(max_angular_acceleration: f64, braking: BrakingLaw) -> Result<Self> {
        Ok(Self {
            max_angular_acceleration: check_limit(
                "max_angular_acceleration",
                max_angular_acceleration,
            )?,
            braking,
        })
    }

    /// Torque that turns a body at `heading` toward `desired`.
    ///
    /// Returns `None` when `inertia` is not a positive finite number; there is
    /// no torque that produces the bounded acceleration for such a body.
    /// Zero angular velocity and zero heading error both count as
    /// non-positive.
    pub fn torque(
        &self,
        heading: f64,
        desired: f64,
        angular_velocity: f64,
        inertia: f64,
    ) -> Option<f64> {
        if !(inertia.is_finite() && inertia > 0.0) {
            return None;
        }
        let acc = self.max_angular_acceleration;
        let dh = normalize_angle(desired - heading);
        let remaining = self.braking.stopping_angle(angular_velocity, inertia, acc);
        let spinning_positive = angular_velocity > 0.0;
        let toward = spinning_positive == (dh > 0.0);
        let magnitude = acc * inertia;
        let torque = if dh.abs() > remaining && toward {
            if spinning_positive {
                magnitude
            } else {
                -magnitude
            }
        } else if spinning_positive {
            -magnitude
        } else {
            magnitude
        };
        Some(torque)
    }
}
