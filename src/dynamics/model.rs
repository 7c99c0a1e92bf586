use nalgebra::Vector3;

use super::state::StateVector;
use crate::physics::{Environment, ForceBreakdown};
use crate::vehicle::{LaunchGeometry, RocketParameters};

// ---------------------------------------------------------------------------
// Flight model: force model + derivative function over one state shape
// ---------------------------------------------------------------------------

/// A force model and derivative function over one state layout.
///
/// Built from a frozen parameter snapshot at launch; never mutated during a
/// run.
pub trait FlightModel {
    type State: StateVector;
    /// Model-specific knobs (steering law, spin rate, ...).
    type Options: Clone + Default + std::fmt::Debug;

    const NAME: &'static str;
    /// Judge landing against the target distance rather than just `Landed`.
    const RANGED: bool;

    fn build(
        params: RocketParameters,
        geometry: LaunchGeometry,
        options: &Self::Options,
    ) -> Self;

    fn params(&self) -> &RocketParameters;
    fn environment(&self) -> &Environment;

    fn initial_state(&self) -> Self::State;

    fn forces(&self, state: &Self::State, time: f64) -> ForceBreakdown;

    /// Rate of every field: position rate = velocity, velocity rate =
    /// net force / m, mass rate = -effective flow while burning.
    fn derivative(&self, state: &Self::State, time: f64) -> Self::State;

    fn altitude(&self, state: &Self::State) -> f64;
    /// Velocity component along local up.
    fn radial_speed(&self, state: &Self::State) -> f64;
    /// Speed relative to the ground / air.
    fn speed(&self, state: &Self::State) -> f64;
    fn mass(&self, state: &Self::State) -> f64;
    /// Ground distance travelled from the launch point.
    fn downrange(&self, state: &Self::State, time: f64) -> f64;

    /// Earth-fixed unit direction of the sub-vehicle point, for models that
    /// track it themselves. `None` means "place by great-circle progress".
    fn ground_direction(&self, _state: &Self::State, _time: f64) -> Option<Vector3<f64>> {
        None
    }

    /// Enforce `h >= 0` and `m >= dry mass`. With `hold` set, a vehicle
    /// pressed against the ground also loses its inward velocity.
    fn constrain(&self, state: &Self::State, hold: bool) -> Self::State;
}

/// Thrust is on while `t <= burn time`, the capped flow is positive and
/// propellant remains.
pub fn burning(params: &RocketParameters, time: f64, mass: f64) -> bool {
    time <= params.burn_time && params.effective_mass_flow() > 0.0 && mass > params.dry_mass
}

pub fn mass_rate(params: &RocketParameters, time: f64, mass: f64) -> f64 {
    if burning(params, time, mass) {
        -params.effective_mass_flow()
    } else {
        0.0
    }
}
