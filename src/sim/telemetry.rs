use nalgebra::Vector3;
use serde::Serialize;

use super::event::{FlightEvent, FlightPhase, Outcome};

// ---------------------------------------------------------------------------
// Per-step records
// ---------------------------------------------------------------------------

/// One recorded sample: physical quantities plus where it sits in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    /// Scene position (see `SceneScale`).
    pub position: Vector3<f64>,
    /// Unit direction of travel in the scene.
    pub tangent: Vector3<f64>,
    pub altitude: f64,
    pub vertical_speed: f64,
    pub speed: f64,
    pub mass: f64,
    pub thrust: f64,
    pub drag: f64,
    pub gravity: f64,
    pub density: f64,
    pub downrange: f64,
    pub phase: FlightPhase,
}

impl TrajectoryPoint {
    /// Blend towards `other` by `f`. The phase is taken from `self`.
    pub fn interpolate(&self, other: &TrajectoryPoint, f: f64) -> TrajectoryPoint {
        let mix = |a: f64, b: f64| a + (b - a) * f;
        let tangent = self.tangent.lerp(&other.tangent, f);
        TrajectoryPoint {
            time: mix(self.time, other.time),
            position: self.position.lerp(&other.position, f),
            tangent: tangent.try_normalize(f64::EPSILON).unwrap_or(self.tangent),
            altitude: mix(self.altitude, other.altitude),
            vertical_speed: mix(self.vertical_speed, other.vertical_speed),
            speed: mix(self.speed, other.speed),
            mass: mix(self.mass, other.mass),
            thrust: mix(self.thrust, other.thrust),
            drag: mix(self.drag, other.drag),
            gravity: mix(self.gravity, other.gravity),
            density: mix(self.density, other.density),
            downrange: mix(self.downrange, other.downrange),
            phase: self.phase,
        }
    }
}

/// What the dashboard shows after every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub time: f64,
    pub altitude: f64,
    pub vertical_speed: f64,
    pub speed: f64,
    pub mass: f64,
    pub thrust: f64,
    pub drag: f64,
    pub gravity: f64,
    pub density: f64,
    pub downrange: f64,
    pub apogee: f64,
    pub max_speed: f64,
    pub phase: FlightPhase,
}

impl TelemetrySnapshot {
    pub fn idle() -> Self {
        Self {
            time: 0.0,
            altitude: 0.0,
            vertical_speed: 0.0,
            speed: 0.0,
            mass: 0.0,
            thrust: 0.0,
            drag: 0.0,
            gravity: 0.0,
            density: 0.0,
            downrange: 0.0,
            apogee: 0.0,
            max_speed: 0.0,
            phase: FlightPhase::Idle,
        }
    }

    pub(crate) fn from_point(point: &TrajectoryPoint, apogee: f64, max_speed: f64) -> Self {
        Self {
            time: point.time,
            altitude: point.altitude,
            vertical_speed: point.vertical_speed,
            speed: point.speed,
            mass: point.mass,
            thrust: point.thrust,
            drag: point.drag,
            gravity: point.gravity,
            density: point.density,
            downrange: point.downrange,
            apogee,
            max_speed,
            phase: point.phase,
        }
    }
}

// ---------------------------------------------------------------------------
// Whole-run record
// ---------------------------------------------------------------------------

/// Everything a finished (or stopped) run produced.
#[derive(Debug, Clone, Serialize)]
pub struct FlightRecord {
    pub model: &'static str,
    pub points: Vec<TrajectoryPoint>,
    pub events: Vec<FlightEvent>,
    pub outcome: Option<Outcome>,
    pub target_distance: f64,
    pub apogee: f64,
    pub max_speed: f64,
}

impl FlightRecord {
    pub fn flight_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.time)
    }

    pub fn final_downrange(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.downrange)
    }

    /// Speed at ground contact. `None` when the run never reached the
    /// ground (still idle, or stopped by the time cap).
    pub fn impact_speed(&self) -> Option<f64> {
        self.outcome
            .and_then(|o| o.phase())
            .and(self.points.last())
            .map(|p| p.speed)
    }

    /// Time of the highest recorded sample.
    pub fn apogee_time(&self) -> f64 {
        self.points
            .iter()
            .fold(None::<&TrajectoryPoint>, |best, p| match best {
                Some(b) if b.altitude >= p.altitude => Some(b),
                _ => Some(p),
            })
            .map_or(0.0, |p| p.time)
    }

    /// Signed miss distance; positive means long.
    pub fn miss_distance(&self) -> f64 {
        self.final_downrange() - self.target_distance
    }
}
