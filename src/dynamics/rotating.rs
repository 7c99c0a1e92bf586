use nalgebra::{UnitQuaternion, Vector3};

use super::model::{burning, mass_rate, FlightModel};
use super::state::DynamicalState;
use crate::geo::central_angle;
use crate::guidance::PitchProgram;
use crate::physics::aerodynamics::atmosphere_velocity;
use crate::physics::forces::ForceInputs;
use crate::physics::{Environment, ForceBreakdown, EARTH_ROTATION_RATE};
use crate::vehicle::{LaunchGeometry, RocketParameters};

pub mod fields {
    pub const POSITION: usize = 0; // rx, ry, rz
    pub const VELOCITY: usize = 3; // vx, vy, vz
    pub const MASS: usize = 6;
}

use fields::*;

pub type InertialState = DynamicalState<7>;

#[derive(Debug, Clone, Copy)]
pub struct RotatingOptions {
    pub guidance: PitchProgram,
    pub spin_rate: f64, // rad/s about +Y
}

impl Default for RotatingOptions {
    fn default() -> Self {
        Self { guidance: PitchProgram::default(), spin_rate: EARTH_ROTATION_RATE }
    }
}

// ---------------------------------------------------------------------------
// 3-D flight in the non-rotating frame of a spinning planet
// ---------------------------------------------------------------------------

/// `[r, v, m]` with `r` from the planet centre. The frame coincides with the
/// Earth-fixed frame at t = 0; +Y is the spin axis.
#[derive(Debug, Clone)]
pub struct RotatingEarthModel {
    params: RocketParameters,
    env: Environment,
    geometry: LaunchGeometry,
    guidance: PitchProgram,
    spin: Vector3<f64>,
}

impl RotatingEarthModel {
    /// Earth-fixed -> inertial rotation after `time` seconds.
    fn earth_rotation(&self, time: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.spin.y * time)
    }

    /// Velocity relative to the co-rotating atmosphere.
    pub fn relative_velocity(&self, state: &InertialState) -> Vector3<f64> {
        let r = state.vector3(POSITION);
        state.vector3(VELOCITY) - atmosphere_velocity(&self.spin, &r)
    }

    /// Horizontal unit vector toward the impact point, or local east when
    /// the target is straight above/below.
    fn heading(&self, up: &Vector3<f64>, time: f64) -> Vector3<f64> {
        let target = self.earth_rotation(time) * self.geometry.impact;
        let horizontal = target - up * up.dot(&target);
        let n = horizontal.norm();
        if n > 1e-9 {
            return horizontal / n;
        }
        let east = Vector3::y().cross(up);
        let n = east.norm();
        if n > 1e-9 {
            east / n
        } else {
            Vector3::x()
        }
    }
}

impl FlightModel for RotatingEarthModel {
    type State = InertialState;
    type Options = RotatingOptions;

    const NAME: &'static str = "rotating";
    const RANGED: bool = true;

    fn build(params: RocketParameters, geometry: LaunchGeometry, options: &RotatingOptions) -> Self {
        Self {
            params,
            env: Environment::rotating_earth(),
            geometry,
            guidance: options.guidance,
            spin: Vector3::new(0.0, options.spin_rate, 0.0),
        }
    }

    fn params(&self) -> &RocketParameters {
        &self.params
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    /// On the pad, moving with the ground.
    fn initial_state(&self) -> InertialState {
        let r = self.geometry.launch.normalize() * self.env.radius;
        let mut s = DynamicalState::zeros();
        s.set_vector3(POSITION, &r);
        s.set_vector3(VELOCITY, &atmosphere_velocity(&self.spin, &r));
        s.set(MASS, self.params.initial_mass);
        s
    }

    fn forces(&self, state: &InertialState, time: f64) -> ForceBreakdown {
        let r = state.vector3(POSITION);
        let up = r.normalize();
        let alt = r.norm() - self.env.radius;
        let m = state.get(MASS);
        let v_rel = self.relative_velocity(state);

        let thrust = burning(&self.params, time, m).then(|| {
            let heading = self.heading(&up, time);
            let direction = self.guidance.thrust_direction(time, &up, &heading, &v_rel, alt);
            (direction, self.params.thrust)
        });

        ForceBreakdown::evaluate(&ForceInputs {
            up,
            v_rel,
            mass: m,
            gravity: self.env.gravity(alt),
            density: self.env.air_density(alt),
            cd: self.params.drag_coefficient,
            area: self.params.reference_area,
            thrust,
        })
    }

    fn derivative(&self, state: &InertialState, time: f64) -> InertialState {
        let m = state.get(MASS);
        let a = self.forces(state, time).acceleration(m);
        let mut rate = DynamicalState::zeros();
        rate.set_vector3(POSITION, &state.vector3(VELOCITY));
        rate.set_vector3(VELOCITY, &a);
        rate.set(MASS, mass_rate(&self.params, time, m));
        rate
    }

    fn altitude(&self, state: &InertialState) -> f64 {
        state.vector3(POSITION).norm() - self.env.radius
    }

    fn radial_speed(&self, state: &InertialState) -> f64 {
        let r = state.vector3(POSITION);
        state.vector3(VELOCITY).dot(&r.normalize())
    }

    fn speed(&self, state: &InertialState) -> f64 {
        self.relative_velocity(state).norm()
    }

    fn mass(&self, state: &InertialState) -> f64 {
        state.get(MASS)
    }

    fn downrange(&self, state: &InertialState, time: f64) -> f64 {
        match self.ground_direction(state, time) {
            Some(ground) => central_angle(&self.geometry.launch, &ground) * self.env.radius,
            None => 0.0,
        }
    }

    fn ground_direction(&self, state: &InertialState, time: f64) -> Option<Vector3<f64>> {
        let fixed = self.earth_rotation(time).inverse() * state.vector3(POSITION);
        let n = fixed.norm();
        (n > f64::EPSILON).then(|| fixed / n)
    }

    fn constrain(&self, state: &InertialState, hold: bool) -> InertialState {
        let mut s = *state;
        let r = s.vector3(POSITION);
        let n = r.norm();
        if n < self.env.radius && n > f64::EPSILON {
            let up = r / n;
            s.set_vector3(POSITION, &(up * self.env.radius));
            if hold {
                let v = s.vector3(VELOCITY);
                let inward = v.dot(&up);
                if inward < 0.0 {
                    s.set_vector3(VELOCITY, &(v - up * inward));
                }
            }
        }
        s.set(MASS, s.get(MASS).max(self.params.dry_mass));
        s
    }
}
