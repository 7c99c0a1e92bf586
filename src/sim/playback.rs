use super::telemetry::{FlightRecord, TrajectoryPoint};
use crate::error::{positive, Result};

/// Replays a precomputed flight against wall-clock time.
///
/// No integration happens here: samples are interpolated linearly, the
/// phase comes from the earlier sample, and the final sample is held once
/// the flight has ended.
#[derive(Debug, Clone)]
pub struct Playback {
    record: FlightRecord,
    speed: f64,
}

impl Playback {
    pub fn new(record: FlightRecord, speed: f64) -> Result<Self> {
        positive("playbackSpeed", speed)?;
        Ok(Self { record, speed })
    }

    pub fn record(&self) -> &FlightRecord {
        &self.record
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        self.speed = positive("playbackSpeed", speed)?;
        Ok(())
    }

    /// Simulated time reached after `elapsed` wall-clock seconds.
    pub fn sim_time(&self, elapsed: f64) -> f64 {
        elapsed.max(0.0) * self.speed
    }

    pub fn duration(&self) -> f64 {
        let points = &self.record.points;
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        self.sim_time(elapsed) >= self.duration()
    }

    pub fn sample(&self, elapsed: f64) -> Option<TrajectoryPoint> {
        self.sample_at(self.sim_time(elapsed))
    }

    /// Sample at simulated time `t` (relative to the first sample).
    pub fn sample_at(&self, t: f64) -> Option<TrajectoryPoint> {
        let points = &self.record.points;
        let first = points.first()?;
        let target = first.time + t.max(0.0);

        // first sample strictly after the target
        let idx = points.partition_point(|p| p.time <= target);
        if idx == 0 {
            return Some(*first);
        }
        if idx >= points.len() {
            return points.last().copied();
        }

        let (a, b) = (&points[idx - 1], &points[idx]);
        let span = b.time - a.time;
        let f = if span > f64::EPSILON { (target - a.time) / span } else { 0.0 };
        Some(a.interpolate(b, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FlightPhase, Outcome};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn point(time: f64, altitude: f64, phase: FlightPhase) -> TrajectoryPoint {
        TrajectoryPoint {
            time,
            position: Vector3::new(0.0, 5.0, 0.0),
            tangent: Vector3::y(),
            altitude,
            vertical_speed: 0.0,
            speed: 0.0,
            mass: 20.0,
            thrust: 0.0,
            drag: 0.0,
            gravity: 9.81,
            density: 1.2,
            downrange: 0.0,
            phase,
        }
    }

    fn playback(speed: f64) -> Playback {
        let record = FlightRecord {
            model: "vertical",
            points: vec![
                point(0.0, 0.0, FlightPhase::Powered),
                point(10.0, 1_000.0, FlightPhase::Coast),
                point(20.0, 0.0, FlightPhase::Landed),
            ],
            events: Vec::new(),
            outcome: Some(Outcome::Landed),
            target_distance: 0.0,
            apogee: 1_000.0,
            max_speed: 0.0,
        };
        Playback::new(record, speed).unwrap()
    }

    #[test]
    fn interpolates_between_bracketing_samples() {
        let p = playback(2.0);
        let s = p.sample(2.5).unwrap(); // sim time 5 s
        assert_relative_eq!(s.time, 5.0);
        assert_relative_eq!(s.altitude, 500.0);
        assert_eq!(s.phase, FlightPhase::Powered);
        assert!(!p.is_finished(2.5));
    }

    #[test]
    fn holds_final_sample() {
        let p = playback(1.0);
        let s = p.sample(100.0).unwrap();
        assert_eq!(s.phase, FlightPhase::Landed);
        assert_eq!(s.time, 20.0);
        assert!(p.is_finished(20.0));
    }

    #[test]
    fn exact_sample_time_is_reproduced() {
        let p = playback(1.0);
        let s = p.sample(10.0).unwrap();
        assert_eq!(s.altitude, 1_000.0);
        assert_eq!(s.phase, FlightPhase::Coast);
    }

    #[test]
    fn speed_must_be_positive() {
        let record = playback(1.0).record().clone();
        assert!(Playback::new(record, 0.0).is_err());
        let mut p = playback(1.0);
        assert!(p.set_speed(-1.0).is_err());
        assert_eq!(p.speed(), 1.0);
    }
}
