use serde::{Deserialize, Serialize};

use crate::error::{non_negative, positive, ConfigError, Result};

// ---------------------------------------------------------------------------
// Rocket parameters (mutable between runs, frozen during one)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RocketParameters {
    pub initial_mass: f64,     // kg
    pub thrust: f64,           // N
    pub mass_flow_rate: f64,   // kg/s (as configured)
    pub burn_time: f64,        // s
    pub dry_mass: f64,         // kg, floor once propellant is gone
    pub reference_area: f64,   // m^2
    pub drag_coefficient: f64, // dimensionless
}

impl Default for RocketParameters {
    fn default() -> Self {
        Self {
            initial_mass: 50.0,
            thrust: 1500.0,
            mass_flow_rate: 2.0,
            burn_time: 10.0,
            dry_mass: 20.0,
            reference_area: 0.05,
            drag_coefficient: 0.75,
        }
    }
}

impl RocketParameters {
    pub fn propellant_mass(&self) -> f64 {
        (self.initial_mass - self.dry_mass).max(0.0)
    }

    /// Mass flow capped so a full burn never eats into the dry mass.
    pub fn effective_mass_flow(&self) -> f64 {
        if self.burn_time <= 0.0 {
            return 0.0;
        }
        self.mass_flow_rate
            .min(self.propellant_mass() / self.burn_time)
            .max(0.0)
    }

    /// Mass left at burnout with the capped flow.
    pub fn burnout_mass(&self) -> f64 {
        self.initial_mass - self.effective_mass_flow() * self.burn_time
    }

    /// Thrust-to-weight ratio at ignition for a given surface gravity.
    pub fn twr(&self, g0: f64) -> f64 {
        self.thrust / (self.initial_mass * g0)
    }

    pub fn validate(&self) -> Result<()> {
        positive("initialMass", self.initial_mass)?;
        non_negative("thrust", self.thrust)?;
        non_negative("massFlowRate", self.mass_flow_rate)?;
        non_negative("burnTime", self.burn_time)?;
        non_negative("referenceArea", self.reference_area)?;
        non_negative("dragCoefficient", self.drag_coefficient)?;
        positive("dryMass", self.dry_mass)?;
        if self.dry_mass > self.initial_mass {
            return Err(ConfigError::OutOfRange {
                field: "dryMass",
                value: self.dry_mass,
                expected: "<= initialMass",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flow_is_not_capped() {
        let p = RocketParameters::default();
        // 30 kg of propellant over 10 s allows up to 3 kg/s
        assert_eq!(p.effective_mass_flow(), 2.0);
        assert!((p.burnout_mass() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn flow_capped_by_propellant() {
        let p = RocketParameters { mass_flow_rate: 5.0, ..Default::default() };
        assert!((p.effective_mass_flow() - 3.0).abs() < 1e-12);
        assert!((p.burnout_mass() - p.dry_mass).abs() < 1e-9);
    }

    #[test]
    fn zero_burn_time_means_no_flow() {
        let p = RocketParameters { burn_time: 0.0, ..Default::default() };
        assert_eq!(p.effective_mass_flow(), 0.0);
    }

    #[test]
    fn dry_mass_above_initial_is_rejected() {
        let p = RocketParameters { dry_mass: 60.0, ..Default::default() };
        assert!(matches!(
            p.validate(),
            Err(ConfigError::OutOfRange { field: "dryMass", .. })
        ));
    }

    #[test]
    fn infinite_thrust_is_rejected() {
        let p = RocketParameters { thrust: f64::INFINITY, ..Default::default() };
        assert!(matches!(p.validate(), Err(ConfigError::NonFinite { field: "thrust" })));
    }

    #[test]
    fn camel_case_keys_with_defaults() {
        let p: RocketParameters =
            serde_json::from_str(r#"{ "initialMass": 80.0, "burnTime": 12.5 }"#).unwrap();
        assert_eq!(p.initial_mass, 80.0);
        assert_eq!(p.burn_time, 12.5);
        assert_eq!(p.thrust, 1500.0);
    }
}
