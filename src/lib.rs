pub mod error;
pub mod physics;
pub mod dynamics;
pub mod guidance;
pub mod vehicle;
pub mod geo;
pub mod sim;
pub mod io;

pub use dynamics::{FlightModel, PlanarModel, RotatingEarthModel, VerticalModel};
pub use error::{ConfigError, Result};
pub use sim::{simulate, FlightRecord, FlightSimulation, Playback, SimConfig};
pub use vehicle::{LaunchConfig, RocketParameters};
