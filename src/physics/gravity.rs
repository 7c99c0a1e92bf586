use nalgebra::Vector3;

use super::atmosphere::Environment;

/// Local gravitational acceleration magnitude in the sounding environment.
/// Always positive, strictly decreasing with altitude.
pub fn gravity(altitude: f64) -> f64 {
    Environment::sounding().gravity(altitude)
}

/// Weight force: `-m * g(h)` along local up.
pub fn weight_force(up: &Vector3<f64>, mass: f64, g: f64) -> Vector3<f64> {
    -up * (mass * g)
}
