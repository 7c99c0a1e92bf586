pub mod atmosphere;
pub mod aerodynamics;
pub mod gravity;
pub mod forces;

pub use atmosphere::{air_density, Environment};
pub use forces::ForceBreakdown;
pub use gravity::gravity;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.81; // surface gravity, m/s^2
pub const EARTH_RADIUS: f64 = 6.371e6; // mean Earth radius, m
pub const RHO_0: f64 = 1.225; // sea-level air density, kg/m^3
pub const SCALE_HEIGHT: f64 = 8_000.0; // density scale height, m

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11; // m^3/(kg s^2)
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS_EQUATORIAL: f64 = 6_378_000.0; // m
pub const EARTH_ROTATION_RATE: f64 = 7.292e-5; // rad/s
