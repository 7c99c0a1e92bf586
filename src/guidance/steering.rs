use nalgebra::Vector3;

/// Thrust direction law for the planar model, in its (downrange, up) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrustSteering {
    /// Straight up.
    Vertical,
    /// Fixed elevation above the horizon, rad.
    Fixed { elevation: f64 },
    /// Fixed elevation on the pad, prograde once `speed > threshold` (m/s).
    ProgradeAbove { elevation: f64, threshold: f64 },
}

impl Default for ThrustSteering {
    fn default() -> Self {
        ThrustSteering::ProgradeAbove {
            elevation: 60.0_f64.to_radians(),
            threshold: 50.0,
        }
    }
}

impl ThrustSteering {
    /// Unit thrust direction for the current velocity.
    pub fn direction(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        match *self {
            ThrustSteering::Vertical => Vector3::y(),
            ThrustSteering::Fixed { elevation } => launch_rail(elevation),
            ThrustSteering::ProgradeAbove { elevation, threshold } => {
                let speed = velocity.norm();
                if speed > threshold {
                    velocity / speed
                } else {
                    launch_rail(elevation)
                }
            }
        }
    }
}

fn launch_rail(elevation: f64) -> Vector3<f64> {
    Vector3::new(elevation.cos(), elevation.sin(), 0.0)
}
