//! Angle and vector helpers shared by the controllers.
//!
//! Angles are radians, 0 along +x, counter-clockwise positive, the same
//! convention rapier uses for body rotation. Canonical angles live in
//! `(-PI, PI]`.

use nalgebra::Vector2;
use std::f64::consts::{PI, TAU};

/// Wraps `a` into `(-PI, PI]`.
pub fn normalize_angle(a: f64) -> f64 {
    let c = a.rem_euclid(TAU);
    if c > PI {
        c - TAU
    } else {
        c
    }
}

/// Angle of `target - origin`.
///
/// Coincident points have no direction; atan2 reports 0 for them and callers
/// that care should check the distance first.
pub fn bearing_to(origin: Vector2<f64>, target: Vector2<f64>) -> f64 {
    let d = target - origin;
    d.y.atan2(d.x)
}

/// Signed shortest rotation taking the direction of `from` onto `to`.
pub fn angle_between(from: Vector2<f64>, to: Vector2<f64>) -> f64 {
    normalize_angle(to.y.atan2(to.x) - from.y.atan2(from.x))
}

/// Unit vector pointing along `angle`.
pub fn heading_vector(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}

/// Splits `point - line_origin` into the part along `direction` and the part
/// orthogonal to it. `direction` must be a unit vector.
pub fn project_onto_and_reject(
    point: Vector2<f64>,
    line_origin: Vector2<f64>,
    direction: Vector2<f64>,
) -> (Vector2<f64>, Vector2<f64>) {
    let d = point - line_origin;
    let parallel = direction * d.dot(&direction);
    (parallel, d - parallel)
}
