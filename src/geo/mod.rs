//! Globe mapping: endpoints on the sphere, great-circle interpolation and
//! placement of the simulated rocket in scene units.

pub mod coords;
pub mod slerp;
pub mod mapping;

pub use coords::{central_angle, great_circle_distance, lat_lon_to_unit_vector, unit_vector_to_lat_lon};
pub use mapping::{arc_preview, ProgressMode, SceneScale, TrajectoryMapper};
pub use slerp::{ease_in_out_cubic, slerp};
