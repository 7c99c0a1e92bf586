use super::{
    EARTH_MASS, EARTH_RADIUS, EARTH_RADIUS_EQUATORIAL, G0, GRAVITATIONAL_CONSTANT, RHO_0,
    SCALE_HEIGHT,
};

// ---------------------------------------------------------------------------
// Exponential atmosphere + inverse-square gravity
// ---------------------------------------------------------------------------

/// Planet parameters shared by the force models.
///
/// Altitudes below ground are clamped to zero inside every lookup, so
/// callers may pass raw (possibly negative) altitudes for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub g0: f64,           // surface gravity, m/s^2
    pub radius: f64,       // m
    pub rho0: f64,         // kg/m^3
    pub scale_height: f64, // m
    /// Altitude above which drag is ignored entirely.
    pub drag_ceiling: Option<f64>,
}

impl Environment {
    /// Flat-ish sounding rocket world (vertical and planar models).
    pub const fn sounding() -> Self {
        Self {
            g0: G0,
            radius: EARTH_RADIUS,
            rho0: RHO_0,
            scale_height: SCALE_HEIGHT,
            drag_ceiling: None,
        }
    }

    /// Equatorial radius, GM/R^2 surface gravity, 8.5 km scale height and a
    /// 140 km drag ceiling.
    pub fn rotating_earth() -> Self {
        let radius = EARTH_RADIUS_EQUATORIAL;
        Self {
            g0: GRAVITATIONAL_CONSTANT * EARTH_MASS / (radius * radius),
            radius,
            rho0: RHO_0,
            scale_height: 8_500.0,
            drag_ceiling: Some(140_000.0),
        }
    }

    /// rho(h) = rho0 * exp(-h / H)
    pub fn air_density(&self, altitude: f64) -> f64 {
        let h = altitude.max(0.0);
        match self.drag_ceiling {
            Some(ceiling) if h >= ceiling => 0.0,
            _ => self.rho0 * (-h / self.scale_height).exp(),
        }
    }

    /// g(h) = g0 * (R / (R + h))^2
    pub fn gravity(&self, altitude: f64) -> f64 {
        let h = altitude.max(0.0);
        self.g0 * (self.radius / (self.radius + h)).powi(2)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::sounding()
    }
}

/// Air density in the sounding environment.
pub fn air_density(altitude: f64) -> f64 {
    Environment::sounding().air_density(altitude)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
