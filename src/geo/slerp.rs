use std::f64::consts::PI;

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Above this cosine the endpoints are treated as identical.
pub const NEAR_IDENTICAL_DOT: f64 = 0.9995;
/// Below this cosine the endpoints are treated as antipodal.
pub const NEAR_ANTIPODAL_DOT: f64 = -0.9995;
/// Below this `|a x b|` antipodal endpoints fall back to the fixed axis.
const ANTIPODAL_AXIS_EPSILON: f64 = 1e-9;

/// Great-circle interpolation between two unit vectors.
///
/// * nearly identical: lerp + renormalize
/// * nearly antipodal: rotate `a` toward `b` about `a x b`, or about
///   [`antipodal_axis`] when the endpoints are exactly opposite
/// * otherwise: rotate by `acos(dot) * t` in the plane of `a` and `b`
pub fn slerp(a: &Vector3<f64>, b: &Vector3<f64>, t: f64) -> Vector3<f64> {
    let dot = a.dot(b).clamp(-1.0, 1.0);

    if dot > NEAR_IDENTICAL_DOT {
        let v = a.lerp(b, t);
        let n = v.norm();
        return if n > f64::EPSILON { v / n } else { *a };
    }

    if dot < NEAR_ANTIPODAL_DOT {
        let cross = a.cross(b);
        let (axis, angle) = if cross.norm() > ANTIPODAL_AXIS_EPSILON {
            (cross, cross.norm().atan2(dot))
        } else {
            (antipodal_axis(a), PI)
        };
        let axis = Unit::new_normalize(axis);
        return UnitQuaternion::from_axis_angle(&axis, angle * t) * a;
    }

    let theta = dot.acos() * t;
    let ortho = (b - a * dot).normalize();
    a * theta.cos() + ortho * theta.sin()
}

/// Fixed tie-break for antipodal endpoints: the great circle through the
/// spin axis (a x Y), or a x X when `a` sits on the pole.
pub fn antipodal_axis(a: &Vector3<f64>) -> Vector3<f64> {
    let axis = a.cross(&Vector3::y());
    if axis.norm() > 1e-6 {
        axis.normalize()
    } else {
        a.cross(&Vector3::x()).normalize()
    }
}

/// Cubic ease-in-out on `[0, 1]`. Visual only; never feeds the integrator.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
