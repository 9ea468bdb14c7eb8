//! Coarse "is this face looking at the camera" heuristic.
//!
//! The decision uses only the two outer eye corners: the angle at their
//! pixel midpoint is folded into `[0, 90]` and compared against a threshold.
//! It approximates head roll/yaw very roughly and is not a pose estimator.

use crate::shared::point::Point2D;

/// Default gaze threshold in degrees.
pub const DEFAULT_THRESHOLD_DEGREES: f64 = 30.0;

/// Maximum folded angle (in degrees) still considered "facing the camera".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeThreshold(f64);

impl GazeThreshold {
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl Default for GazeThreshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD_DEGREES)
    }
}

/// Angle ABC in degrees, with `b` as the vertex. Always in `[0, 180]`.
///
/// Returns 0.0 when either arm has zero length.
pub fn compute_angle(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    let (bax, bay) = a.minus(b);
    let (bcx, bcy) = c.minus(b);

    let dot = bax * bcx + bay * bcy;
    let mag_ba = bax.hypot(bay);
    let mag_bc = bcx.hypot(bcy);

    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 0.0;
    }

    // Rounding can push the cosine slightly outside acos's domain.
    let cosine = (dot / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Maps angles above 90° to their supplement so both deviations compare alike.
pub fn fold_angle(degrees: f64) -> f64 {
    if degrees > 90.0 {
        180.0 - degrees
    } else {
        degrees
    }
}

/// Folded angle at the pixel midpoint between the two eyes.
pub fn facing_angle(left_eye: &Point2D, right_eye: &Point2D) -> f64 {
    let midpoint = left_eye.pixel_midpoint(right_eye);
    fold_angle(compute_angle(left_eye, &midpoint, right_eye))
}

/// True when the folded eye-line angle is within `threshold`.
pub fn is_facing_camera(left_eye: &Point2D, right_eye: &Point2D, threshold: GazeThreshold) -> bool {
    facing_angle(left_eye, right_eye) <= threshold.degrees()
}
