use nalgebra::Vector3;

use super::aerodynamics::drag_force;
use super::gravity::weight_force;

/// Forces acting on the vehicle at one instant, in the model's frame.
///
/// Magnitudes are kept alongside the net vector for telemetry; `net` is the
/// only thing the derivative function consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBreakdown {
    pub thrust: f64,  // N
    pub drag: f64,    // N
    pub weight: f64,  // N
    pub gravity: f64, // m/s^2
    pub density: f64, // kg/m^3
    pub net: Vector3<f64>,
}

/// Inputs of one force evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ForceInputs {
    pub up: Vector3<f64>,
    pub v_rel: Vector3<f64>,
    pub mass: f64,
    pub gravity: f64,
    pub density: f64,
    pub cd: f64,
    pub area: f64,
    /// Unit thrust direction and magnitude; `None` once burnt out.
    pub thrust: Option<(Vector3<f64>, f64)>,
}

impl ForceBreakdown {
    /// Thrust + drag + weight. No lift, no wind.
    pub fn evaluate(inputs: &ForceInputs) -> Self {
        let f_thrust = match inputs.thrust {
            Some((direction, magnitude)) => direction * magnitude,
            None => Vector3::zeros(),
        };
        let f_drag = drag_force(&inputs.v_rel, inputs.density, inputs.cd, inputs.area);
        let f_weight = weight_force(&inputs.up, inputs.mass, inputs.gravity);

        ForceBreakdown {
            thrust: f_thrust.norm(),
            drag: f_drag.norm(),
            weight: f_weight.norm(),
            gravity: inputs.gravity,
            density: inputs.density,
            net: f_thrust + f_drag + f_weight,
        }
    }

    /// Newton's second law with the frozen-mass approximation.
    pub fn acceleration(&self, mass: f64) -> Vector3<f64> {
        self.net / mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ForceInputs {
        ForceInputs {
            up: Vector3::y(),
            v_rel: Vector3::zeros(),
            mass: 50.0,
            gravity: 9.81,
            density: 1.225,
            cd: 0.75,
            area: 0.05,
            thrust: Some((Vector3::y(), 1500.0)),
        }
    }

    #[test]
    fn pad_forces_sum() {
        let f = ForceBreakdown::evaluate(&inputs());
        assert!((f.net.y - (1500.0 - 50.0 * 9.81)).abs() < 1e-9);
        assert_eq!(f.drag, 0.0);
        assert!((f.weight - 490.5).abs() < 1e-9);
    }

    #[test]
    fn burnt_out_vehicle_only_falls() {
        let f = ForceBreakdown::evaluate(&ForceInputs { thrust: None, ..inputs() });
        assert_eq!(f.thrust, 0.0);
        assert!(f.acceleration(50.0).y < 0.0);
    }
}
