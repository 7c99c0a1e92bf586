pub mod state;
pub mod model;
pub mod vertical;
pub mod planar;
pub mod rotating;

pub use model::FlightModel;
pub use planar::{PlanarModel, PlanarOptions};
pub use rotating::{RotatingEarthModel, RotatingOptions};
pub use state::{DynamicalState, StateVector};
pub use vertical::VerticalModel;
