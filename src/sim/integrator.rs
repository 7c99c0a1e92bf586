use crate::dynamics::{FlightModel, StateVector};

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta, generic over the state layout
// ---------------------------------------------------------------------------

/// Single RK4 step: advance `state` from `time` by `dt`.
///
/// Stateless; the derivative function must return a rate for every field.
/// Local error O(dt^5), global O(dt^4).
pub fn rk4_step<S, F>(state: &S, time: f64, dt: f64, derivative: F) -> S
where
    S: StateVector,
    F: Fn(&S, f64) -> S,
{
    let half = dt * 0.5;
    let k1 = derivative(state, time);
    let k2 = derivative(&state.apply(&k1, half), time + half);
    let k3 = derivative(&state.apply(&k2, half), time + half);
    let k4 = derivative(&state.apply(&k3, dt), time + dt);

    state
        .apply(&k1, dt / 6.0)
        .apply(&k2, dt / 3.0)
        .apply(&k3, dt / 3.0)
        .apply(&k4, dt / 6.0)
}

/// RK4 step driven by a flight model's derivative function.
pub fn model_step<M: FlightModel>(model: &M, state: &M::State, time: f64, dt: f64) -> M::State {
    rk4_step(state, time, dt, |s, t| model.derivative(s, t))
}
