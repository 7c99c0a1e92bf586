use nalgebra::Vector3;

use super::model::{burning, mass_rate, FlightModel};
use super::state::DynamicalState;
use crate::guidance::ThrustSteering;
use crate::physics::forces::ForceInputs;
use crate::physics::{Environment, ForceBreakdown};
use crate::vehicle::{LaunchGeometry, RocketParameters};

pub mod fields {
    pub const DOWNRANGE: usize = 0;
    pub const ALTITUDE: usize = 1;
    pub const VX: usize = 2;
    pub const VY: usize = 3;
    pub const MASS: usize = 4;
}

use fields::*;

pub type PlanarState = DynamicalState<5>;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarOptions {
    pub steering: ThrustSteering,
}

/// 2-D ranged flight: `[x, h, vx, vy, m]` over a flat ground track, with
/// altitude-dependent gravity and density.
#[derive(Debug, Clone)]
pub struct PlanarModel {
    params: RocketParameters,
    env: Environment,
    steering: ThrustSteering,
}

impl PlanarModel {
    fn velocity(state: &PlanarState) -> Vector3<f64> {
        Vector3::new(state.get(VX), state.get(VY), 0.0)
    }
}

impl FlightModel for PlanarModel {
    type State = PlanarState;
    type Options = PlanarOptions;

    const NAME: &'static str = "planar";
    const RANGED: bool = true;

    fn build(params: RocketParameters, _geometry: LaunchGeometry, options: &PlanarOptions) -> Self {
        Self { params, env: Environment::sounding(), steering: options.steering }
    }

    fn params(&self) -> &RocketParameters {
        &self.params
    }

    fn environment(&self) -> &Environment {
        &self.env
    }

    fn initial_state(&self) -> PlanarState {
        DynamicalState::new([0.0, 0.0, 0.0, 0.0, self.params.initial_mass])
    }

    fn forces(&self, state: &PlanarState, time: f64) -> ForceBreakdown {
        let h = state.get(ALTITUDE);
        let m = state.get(MASS);
        let v = Self::velocity(state);
        let thrust = burning(&self.params, time, m)
            .then(|| (self.steering.direction(&v), self.params.thrust));
        ForceBreakdown::evaluate(&ForceInputs {
            up: Vector3::y(),
            v_rel: v,
            mass: m,
            gravity: self.env.gravity(h),
            density: self.env.air_density(h),
            cd: self.params.drag_coefficient,
            area: self.params.reference_area,
            thrust,
        })
    }

    fn derivative(&self, state: &PlanarState, time: f64) -> PlanarState {
        let m = state.get(MASS);
        let a = self.forces(state, time).acceleration(m);
        DynamicalState::new([
            state.get(VX),
            state.get(VY),
            a.x,
            a.y,
            mass_rate(&self.params, time, m),
        ])
    }

    fn altitude(&self, state: &PlanarState) -> f64 {
        state.get(ALTITUDE)
    }

    fn radial_speed(&self, state: &PlanarState) -> f64 {
        state.get(VY)
    }

    fn speed(&self, state: &PlanarState) -> f64 {
        Self::velocity(state).norm()
    }

    fn mass(&self, state: &PlanarState) -> f64 {
        state.get(MASS)
    }

    fn downrange(&self, state: &PlanarState, _time: f64) -> f64 {
        state.get(DOWNRANGE)
    }

    fn constrain(&self, state: &PlanarState, hold: bool) -> PlanarState {
        let mut s = *state;
        if s.get(ALTITUDE) < 0.0 {
            s.set(ALTITUDE, 0.0);
            if hold && s.get(VY) < 0.0 {
                s.set(VY, 0.0);
            }
        }
        s.set(MASS, s.get(MASS).max(self.params.dry_mass));
        s
    }
}
