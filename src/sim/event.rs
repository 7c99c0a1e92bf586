use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Flight phases
// ---------------------------------------------------------------------------

/// Idle -> Powered -> Coast -> Descending -> terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlightPhase {
    Idle,
    Powered,
    Coast,
    Descending,
    Landed,
    TargetHit,
    Overshoot,
    Undershoot,
}

impl FlightPhase {
    pub fn label(&self) -> &'static str {
        match self {
            FlightPhase::Idle => "IDLE",
            FlightPhase::Powered => "BURN",
            FlightPhase::Coast => "COAST",
            FlightPhase::Descending => "DESC",
            FlightPhase::Landed => "LANDED",
            FlightPhase::TargetHit => "HIT",
            FlightPhase::Overshoot => "OVER",
            FlightPhase::Undershoot => "SHORT",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlightPhase::Landed
                | FlightPhase::TargetHit
                | FlightPhase::Overshoot
                | FlightPhase::Undershoot
        )
    }

    /// In-flight transitions. Terminal phases are set by impact detection.
    pub fn advance(self, time: f64, burn_time: f64, radial_speed: f64) -> FlightPhase {
        match self {
            FlightPhase::Powered if time > burn_time => {
                if radial_speed < 0.0 {
                    FlightPhase::Descending
                } else {
                    FlightPhase::Coast
                }
            }
            FlightPhase::Coast if radial_speed < 0.0 => FlightPhase::Descending,
            other => other,
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Landed,
    TargetHit,
    Overshoot,
    Undershoot,
    /// Stopped by the mission-duration cap; the phase is left as it was.
    TimeLimit,
}

impl Outcome {
    pub fn phase(&self) -> Option<FlightPhase> {
        match self {
            Outcome::Landed => Some(FlightPhase::Landed),
            Outcome::TargetHit => Some(FlightPhase::TargetHit),
            Outcome::Overshoot => Some(FlightPhase::Overshoot),
            Outcome::Undershoot => Some(FlightPhase::Undershoot),
            Outcome::TimeLimit => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Impact detection
// ---------------------------------------------------------------------------

/// Fraction of the step at which altitude crosses zero, `h_prev / (h_prev -
/// h_next)` clamped to `[0, 1]`. A step that never left the ground reports 1.
pub fn crossing_fraction(h_prev: f64, h_next: f64) -> f64 {
    let denom = h_prev - h_next;
    if denom > f64::EPSILON {
        (h_prev / denom).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Terminal classification. Unranged flights simply land.
pub fn classify_impact(ranged: bool, downrange: f64, target: f64, tolerance: f64) -> Outcome {
    if !ranged {
        Outcome::Landed
    } else if (downrange - target).abs() <= tolerance {
        Outcome::TargetHit
    } else if downrange > target {
        Outcome::Overshoot
    } else {
        Outcome::Undershoot
    }
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EventKind {
    Launch,
    Burnout,
    Apogee,
    Impact(Outcome),
    TimeLimit,
}

/// A discrete event that occurred during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightEvent {
    pub time: f64,
    pub altitude: f64,
    pub kind: EventKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_fraction_between_samples() {
        let f = crossing_fraction(10.0, -5.0);
        assert!((f - 10.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn crossing_fraction_is_clamped() {
        assert_eq!(crossing_fraction(-1.0, -5.0), 0.0);
        assert_eq!(crossing_fraction(0.0, 0.0), 1.0);
        assert_eq!(crossing_fraction(3.0, 0.0), 1.0);
    }

    #[test]
    fn powered_to_coast_to_descending() {
        let p = FlightPhase::Powered.advance(9.0, 10.0, 150.0);
        assert_eq!(p, FlightPhase::Powered);
        let p = p.advance(10.05, 10.0, 140.0);
        assert_eq!(p, FlightPhase::Coast);
        let p = p.advance(20.0, 10.0, 3.0);
        assert_eq!(p, FlightPhase::Coast);
        let p = p.advance(20.05, 10.0, -0.4);
        assert_eq!(p, FlightPhase::Descending);
        // never climbs back
        assert_eq!(p.advance(21.0, 10.0, 5.0), FlightPhase::Descending);
    }

    #[test]
    fn classification_band() {
        assert_eq!(classify_impact(false, 1e6, 0.0, 50e3), Outcome::Landed);
        assert_eq!(classify_impact(true, 520e3, 500e3, 50e3), Outcome::TargetHit);
        assert_eq!(classify_impact(true, 560e3, 500e3, 50e3), Outcome::Overshoot);
        assert_eq!(classify_impact(true, 300e3, 500e3, 50e3), Outcome::Undershoot);
    }

    #[test]
    fn only_impacts_are_terminal() {
        assert!(Outcome::Overshoot.phase().unwrap().is_terminal());
        assert!(Outcome::TimeLimit.phase().is_none());
        assert!(!FlightPhase::Descending.is_terminal());
    }
}
