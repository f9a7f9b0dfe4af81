pub mod angular;
pub mod linear;

pub use angular::{AngularController, BrakingLaw};
pub use linear::{ForceClamp, LinearController};

use crate::engine::BodyHandle;
use crate::error::{check_limit, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Actuation bounds shared by every body in a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLimits {
    /// rad/s².
    pub max_angular_acceleration: f64,
    /// m/s².
    pub max_acceleration: f64,
    /// m/s. The force law stops pushing along the velocity above this.
    pub max_speed: f64,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            max_angular_acceleration: TAU,
            max_acceleration: 20.0,
            max_speed: 15.0,
        }
    }
}

impl ControlLimits {
    pub fn validate(&self) -> Result<()> {
        check_limit("max_angular_acceleration", self.max_angular_acceleration)?;
        check_limit("max_acceleration", self.max_acceleration)?;
        check_limit("max_speed", self.max_speed)?;
        Ok(())
    }
}

/// Which controllers run for each body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringStrategy {
    /// Turn to face the ball, never push.
    #[default]
    TorqueOnly,
    /// Push toward the ball's movement line without turning.
    ForceOnly,
    Combined,
}

impl SteeringStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SteeringStrategy::TorqueOnly => "torque",
            SteeringStrategy::ForceOnly => "force",
            SteeringStrategy::Combined => "combined",
        }
    }

    pub fn uses_torque(&self) -> bool {
        matches!(
            self,
            SteeringStrategy::TorqueOnly | SteeringStrategy::Combined
        )
    }

    pub fn uses_force(&self) -> bool {
        matches!(self, SteeringStrategy::ForceOnly | SteeringStrategy::Combined)
    }
}

impl fmt::Display for SteeringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SteeringStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "torque" | "torque_only" => Ok(SteeringStrategy::TorqueOnly),
            "force" | "force_only" => Ok(SteeringStrategy::ForceOnly),
            "combined" => Ok(SteeringStrategy::Combined),
            _ => Err(format!(
                "unknown steering strategy {s:?} (expected torque, force or combined)"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub limits: ControlLimits,
    pub strategy: SteeringStrategy,
    pub braking: BrakingLaw,
    pub clamp: ForceClamp,
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()
    }

    pub fn angular(&self) -> Result<AngularController> {
        AngularController::new(self.limits.max_angular_acceleration, self.braking)
    }

    pub fn linear(&self) -> Result<LinearController> {
        LinearController::new(
            self.limits.max_acceleration,
            self.limits.max_speed,
            self.clamp,
        )
    }
}

/// A command for one body, valid for the tick it was computed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Actuation {
    Torque { body: BodyHandle, torque: f64 },
    Force { body: BodyHandle, force: Vector2<f64> },
}

impl Actuation {
    pub fn body(&self) -> BodyHandle {
        match *self {
            Actuation::Torque { body, .. } | Actuation::Force { body, .. } => body,
        }
    }
}
