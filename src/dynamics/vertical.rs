use nalgebra::Vector3;

use super::model::{burning, mass_rate, FlightModel};
use super::state::DynamicalState;
use crate::physics::forces::ForceInputs;
use crate::physics::{Environment, ForceBreakdown};
use crate::vehicle::{LaunchGeometry, RocketParameters};

pub mod fields {
    pub const ALTITUDE: usize = 0;
    pub const VELOCITY: usize = 1;
    pub const MASS: usize = 2;
}

use fields::*;

pub type VerticalState = DynamicalState<3>;

/// 1-D sounding flight: `[h, v, m]`, thrust straight up.
#[derive(Debug, Clone)]
pub struct VerticalModel {
    params: RocketParameters,
    env: Environment,
}

impl FlightModel for VerticalModel {
    type State = VerticalState;
    type Options = ();

    const NAME: &'static str = "vertical";
    const RANGED: bool = false;

    fn build(params: RocketParameters, _geometry: LaunchGeometry, _options: &()) -> Self {
        Self { params, env: Environment::sounding() }
    }

    fn params(&self) -> &RocketParameters {
        &self.params
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn initial_state(&self) -> VerticalState {
        DynamicalState::new([0.0, 0.0, self.params.initial_mass])
    }

    fn forces(&self, state: &VerticalState, time: f64) -> ForceBreakdown {
        let h = state.get(ALTITUDE);
        let m = state.get(MASS);
        let thrust = burning(&self.params, time, m).then(|| (Vector3::y(), self.params.thrust));
        ForceBreakdown::evaluate(&ForceInputs {
            up: Vector3::y(),
            v_rel: Vector3::new(0.0, state.get(VELOCITY), 0.0),
            mass: m,
            gravity: self.env.gravity(h),
            density: self.env.air_density(h),
            cd: self.params.drag_coefficient,
            area: self.params.reference_area,
            thrust,
        })
    }

    fn derivative(&self, state: &VerticalState, time: f64) -> VerticalState {
        let m = state.get(MASS);
        let f = self.forces(state, time);
        DynamicalState::new([
            state.get(VELOCITY),
            f.net.y / m,
            mass_rate(&self.params, time, m),
        ])
    }

    fn altitude(&self, state: &VerticalState) -> f64 {
        state.get(ALTITUDE)
    }

    fn radial_speed(&self, state: &VerticalState) -> f64 {
        state.get(VELOCITY)
    }

    fn speed(&self, state: &VerticalState) -> f64 {
        state.get(VELOCITY).abs()
    }

    fn mass(&self, state: &VerticalState) -> f64 {
        state.get(MASS)
    }

    fn downrange(&self, _state: &VerticalState, _time: f64) -> f64 {
        0.0
    }

    fn constrain(&self, state: &VerticalState, hold: bool) -> VerticalState {
        let mut s = *state;
        if s.get(ALTITUDE) < 0.0 {
            s.set(ALTITUDE, 0.0);
            if hold && s.get(VELOCITY) < 0.0 {
                s.set(VELOCITY, 0.0);
            }
        }
        s.set(MASS, s.get(MASS).max(self.params.dry_mass));
        s
    }
}
