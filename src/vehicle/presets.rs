use super::config::LaunchConfig;
use super::params::RocketParameters;

/// Educational sounding rocket: 50 kg, 1.5 kN for 10 s.
pub fn sounding_rocket() -> RocketParameters {
    RocketParameters::default()
}

/// M51-class submarine-launched missile.
pub fn m51() -> RocketParameters {
    RocketParameters {
        initial_mass: 54_000.0,
        thrust: 700_000.0,
        mass_flow_rate: 223.0,
        burn_time: 224.0,
        dry_mass: 4_000.0,
        reference_area: 4.15,
        drag_coefficient: 0.2,
    }
}

pub const KOUROU: (f64, f64) = (5.236, -52.768);

/// M51 fired from Kourou toward the Azores.
pub fn kourou_m51() -> LaunchConfig {
    LaunchConfig {
        launch_lat: KOUROU.0,
        launch_lon: KOUROU.1,
        impact_lat: 38.7,
        impact_lon: -27.2,
        rocket: m51(),
    }
}

/// Straight up and back down at the same point.
pub fn vertical_hop() -> LaunchConfig {
    let base = LaunchConfig::default();
    LaunchConfig {
        impact_lat: base.launch_lat,
        impact_lon: base.launch_lon,
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(kourou_m51().validate().is_ok());
        assert!(vertical_hop().validate().is_ok());
    }

    #[test]
    fn m51_flow_fits_propellant() {
        let p = m51();
        assert_eq!(p.effective_mass_flow(), 223.0);
        assert!(p.burnout_mass() >= p.dry_mass);
    }
}
