pub mod params;
pub mod config;
pub mod presets;

pub use config::{LaunchConfig, LaunchGeometry};
pub use params::RocketParameters;
