use nalgebra::Vector3;

/// Below this relative speed drag is zero; avoids normalizing a null vector.
pub const DRAG_SPEED_EPSILON: f64 = 1e-6;

/// Quadratic drag opposing the velocity relative to the air.
///
/// |F| = 0.5 * rho * Cd * A * |v_rel|^2
pub fn drag_force(v_rel: &Vector3<f64>, density: f64, cd: f64, area: f64) -> Vector3<f64> {
    let speed = v_rel.norm();
    if speed > DRAG_SPEED_EPSILON {
        let q_dyn = 0.5 * density * speed * speed;
        -v_rel / speed * (q_dyn * cd * area)
    } else {
        Vector3::zeros()
    }
}

/// Velocity of the atmosphere co-rotating with the planet at `position`.
pub fn atmosphere_velocity(spin: &Vector3<f64>, position: &Vector3<f64>) -> Vector3<f64> {
    spin.cross(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_opposes_velocity() {
        let f = drag_force(&Vector3::new(0.0, 300.0, 0.0), 1.225, 0.75, 0.05);
        assert!(f.y < 0.0, "drag should oppose upward velocity");
        let f = drag_force(&Vector3::new(0.0, -300.0, 0.0), 1.225, 0.75, 0.05);
        assert!(f.y > 0.0, "drag should oppose downward velocity");
    }

    #[test]
    fn drag_magnitude_matches_formula() {
        let f = drag_force(&Vector3::new(100.0, 0.0, 0.0), 1.2, 0.5, 0.1);
        assert!((f.norm() - 0.5 * 1.2 * 0.5 * 0.1 * 100.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn no_drag_at_rest() {
        let f = drag_force(&Vector3::zeros(), 1.225, 0.3, 0.01);
        assert!(f.norm() < 1e-12);
        assert!(f.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn equator_air_moves_east() {
        let spin = Vector3::new(0.0, 7.292e-5, 0.0);
        let v = atmosphere_velocity(&spin, &Vector3::new(6.378e6, 0.0, 0.0));
        assert!((v.norm() - 465.0).abs() < 1.0);
        assert!(v.y.abs() < 1e-12);
    }
}
