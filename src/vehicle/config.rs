use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::params::RocketParameters;
use crate::error::{within, Result};
use crate::geo;

/// Everything the UI collaborator hands over at launch: endpoints in degrees
/// plus the rocket parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaunchConfig {
    pub launch_lat: f64,
    pub launch_lon: f64,
    pub impact_lat: f64,
    pub impact_lon: f64,
    #[serde(flatten)]
    pub rocket: RocketParameters,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            launch_lat: 48.85,
            launch_lon: 2.35,
            impact_lat: 43.60,
            impact_lon: 1.44,
            rocket: RocketParameters::default(),
        }
    }
}

impl LaunchConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: LaunchConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        within("launchLat", self.launch_lat, -90.0, 90.0, "[-90, 90]")?;
        within("launchLon", self.launch_lon, -180.0, 180.0, "[-180, 180]")?;
        within("impactLat", self.impact_lat, -90.0, 90.0, "[-90, 90]")?;
        within("impactLon", self.impact_lon, -180.0, 180.0, "[-180, 180]")?;
        self.rocket.validate()
    }

    /// Converted once per launch.
    pub fn geometry(&self) -> LaunchGeometry {
        LaunchGeometry::new(
            geo::lat_lon_to_unit_vector(self.launch_lat, self.launch_lon),
            geo::lat_lon_to_unit_vector(self.impact_lat, self.impact_lon),
        )
    }
}

/// Launch and impact points as unit vectors on the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchGeometry {
    pub launch: Vector3<f64>,
    pub impact: Vector3<f64>,
}

impl LaunchGeometry {
    pub fn new(launch: Vector3<f64>, impact: Vector3<f64>) -> Self {
        Self { launch, impact }
    }

    /// Great-circle distance between the endpoints on a sphere of `radius`.
    pub fn target_distance(&self, radius: f64) -> f64 {
        geo::great_circle_distance(&self.launch, &self.impact, radius)
    }

    /// Axis of the launch-to-impact great circle; `None` when the endpoints
    /// coincide or are antipodal.
    pub fn rotation_axis(&self) -> Option<Vector3<f64>> {
        let axis = self.launch.cross(&self.impact);
        let n = axis.norm();
        (n > 1e-12).then(|| axis / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn default_config_is_valid() {
        assert!(LaunchConfig::default().validate().is_ok());
    }

    #[test]
    fn latitude_out_of_range_is_rejected() {
        let c = LaunchConfig { impact_lat: -95.0, ..Default::default() };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::OutOfRange { field: "impactLat", .. })
        ));
    }

    #[test]
    fn flattened_json_round_trip() {
        let text = r#"{ "launchLat": 5.236, "launchLon": -52.768, "thrust": 2500.0 }"#;
        let c = LaunchConfig::from_json_str(text).unwrap();
        assert_eq!(c.launch_lat, 5.236);
        assert_eq!(c.rocket.thrust, 2500.0);
        assert_eq!(c.rocket.initial_mass, 50.0);
        assert_eq!(c.impact_lat, 43.60);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            LaunchConfig::from_json_str("{ launchLat: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn same_point_has_no_distance_or_axis() {
        let c = LaunchConfig { impact_lat: 48.85, impact_lon: 2.35, ..Default::default() };
        let g = c.geometry();
        assert!(g.target_distance(6.371e6) < 1e-3);
        assert!(g.rotation_axis().is_none());
    }

    #[test]
    fn paris_toulouse_distance() {
        let d = LaunchConfig::default().geometry().target_distance(6.371e6);
        // about 590 km
        assert!((d - 590_000.0).abs() < 15_000.0, "got {d}");
    }
}
