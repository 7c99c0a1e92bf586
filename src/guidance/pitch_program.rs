use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Pitch program: thrust direction as a function of mission time
// ---------------------------------------------------------------------------

/// Three phases:
/// - 0 to `vertical_until`: thrust along local up
/// - up to `pitchover_until`: tilt toward the heading at `pitch_rate` deg/s
/// - afterwards: prograde along the air-relative velocity, tilt limited to
///   `max_tilt` from vertical while below `tilt_limit_altitude`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchProgram {
    pub vertical_until: f64,      // s
    pub pitchover_until: f64,     // s
    pub pitch_rate: f64,          // deg/s
    pub prograde_min_speed: f64,  // m/s
    pub max_tilt: f64,            // rad from vertical
    pub tilt_limit_altitude: f64, // m
}

impl Default for PitchProgram {
    fn default() -> Self {
        Self {
            vertical_until: 15.0,
            pitchover_until: 35.0,
            pitch_rate: 0.3,
            prograde_min_speed: 10.0,
            max_tilt: 65.0_f64.to_radians(),
            tilt_limit_altitude: 100_000.0,
        }
    }
}

impl PitchProgram {
    /// `up` and `heading` are unit vectors, `heading` horizontal.
    pub fn thrust_direction(
        &self,
        time: f64,
        up: &Vector3<f64>,
        heading: &Vector3<f64>,
        v_rel: &Vector3<f64>,
        altitude: f64,
    ) -> Vector3<f64> {
        if time < self.vertical_until {
            return *up;
        }
        if time < self.pitchover_until {
            let tilt = ((time - self.vertical_until) * self.pitch_rate).to_radians();
            return tilted(up, heading, tilt);
        }

        let speed = v_rel.norm();
        let target = if speed > self.prograde_min_speed { v_rel / speed } else { *up };
        if altitude < self.tilt_limit_altitude {
            let tilt = up.dot(&target).clamp(-1.0, 1.0).acos();
            if tilt > self.max_tilt {
                let horizontal = target - up * up.dot(&target);
                let n = horizontal.norm();
                let toward = if n > 1e-9 { horizontal / n } else { *heading };
                return tilted(up, &toward, self.max_tilt);
            }
        }
        target
    }
}

fn tilted(up: &Vector3<f64>, toward: &Vector3<f64>, tilt: f64) -> Vector3<f64> {
    (up * tilt.cos() + toward * tilt.sin()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> (Vector3<f64>, Vector3<f64>) {
        (Vector3::x(), -Vector3::z())
    }

    #[test]
    fn vertical_at_start() {
        let (up, east) = frame();
        let d = PitchProgram::default().thrust_direction(3.0, &up, &east, &Vector3::zeros(), 0.0);
        assert!((d - up).norm() < 1e-12);
    }

    #[test]
    fn pitchover_midpoint() {
        let (up, east) = frame();
        let d = PitchProgram::default().thrust_direction(25.0, &up, &east, &up, 5_000.0);
        // 10 s at 0.3 deg/s
        let tilt = d.dot(&up).acos().to_degrees();
        assert!((tilt - 3.0).abs() < 1e-9, "tilt {tilt}");
        assert!(d.dot(&east) > 0.0);
    }

    #[test]
    fn prograde_is_tilt_limited_low_down() {
        let (up, east) = frame();
        let flat = east * 1_000.0;
        let p = PitchProgram::default();
        let low = p.thrust_direction(60.0, &up, &east, &flat, 20_000.0);
        assert!((low.dot(&up).acos().to_degrees() - 65.0).abs() < 1e-9);
        let high = p.thrust_direction(60.0, &up, &east, &flat, 120_000.0);
        assert!((high - east).norm() < 1e-12);
    }

    #[test]
    fn slow_vehicle_keeps_vertical_after_pitchover() {
        let (up, east) = frame();
        let d = PitchProgram::default().thrust_direction(40.0, &up, &east, &(east * 5.0), 0.0);
        assert!((d - up).norm() < 1e-12);
    }
}
