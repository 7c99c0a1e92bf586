use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::{FlightEvent, FlightRecord, Outcome};

/// Summary statistics computed from a flight record.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub model: &'static str,
    pub outcome: Option<Outcome>,
    pub apogee_m: f64,
    pub apogee_time_s: f64,
    pub max_speed_ms: f64,
    pub flight_time_s: f64,
    /// Absent when the run was stopped before ground contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_speed_ms: Option<f64>,
    pub downrange_m: f64,
    pub target_distance_m: f64,
    pub miss_distance_m: f64,
    pub events: Vec<FlightEvent>,
}

impl FlightSummary {
    pub fn from_record(record: &FlightRecord) -> Self {
        FlightSummary {
            model: record.model,
            outcome: record.outcome,
            apogee_m: record.apogee,
            apogee_time_s: record.apogee_time(),
            max_speed_ms: record.max_speed,
            flight_time_s: record.flight_time(),
            impact_speed_ms: record.impact_speed(),
            downrange_m: record.final_downrange(),
            target_distance_m: record.target_distance,
            miss_distance_m: record.miss_distance(),
            events: record.events.clone(),
        }
    }
}

/// Write flight summary as pretty-printed JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &FlightSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &FlightSummary) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_summary(&mut file, summary)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EventKind, FlightPhase, TrajectoryPoint};
    use nalgebra::Vector3;

    fn point(time: f64, altitude: f64, speed: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            time,
            position: Vector3::new(0.0, 5.0, 0.0),
            tangent: Vector3::y(),
            altitude,
            vertical_speed: 0.0,
            speed,
            mass: 20.0,
            thrust: 0.0,
            drag: 0.0,
            gravity: 9.81,
            density: 1.2,
            downrange: 0.0,
            phase: FlightPhase::Coast,
        }
    }

    fn simple_record() -> FlightRecord {
        FlightRecord {
            model: "vertical",
            points: vec![point(0.0, 0.0, 0.0), point(10.0, 5_000.0, 0.0), point(20.0, 0.0, 50.0)],
            events: vec![FlightEvent { time: 10.0, altitude: 5_000.0, kind: EventKind::Apogee }],
            outcome: Some(Outcome::Landed),
            target_distance: 0.0,
            apogee: 5_000.0,
            max_speed: 120.0,
        }
    }

    #[test]
    fn summary_computes_apogee() {
        let s = FlightSummary::from_record(&simple_record());
        assert!((s.apogee_m - 5000.0).abs() < 0.1);
        assert!((s.apogee_time_s - 10.0).abs() < 0.1);
        assert_eq!(s.impact_speed_ms, Some(50.0));
    }

    #[test]
    fn json_output_is_valid() {
        let summary = FlightSummary::from_record(&simple_record());

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["model"], "vertical");
        assert_eq!(value["outcome"], "Landed");
        assert_eq!(value["events"][0]["kind"], "Apogee");
        assert_eq!(value["apogee_m"], 5000.0);
        assert_eq!(value["impact_speed_ms"], 50.0);
    }

    #[test]
    fn time_capped_run_has_no_impact_speed() {
        let record = FlightRecord { outcome: Some(Outcome::TimeLimit), ..simple_record() };
        let summary = FlightSummary::from_record(&record);
        assert_eq!(summary.impact_speed_ms, None);

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value.get("impact_speed_ms").is_none());
        assert_eq!(value["outcome"], "TimeLimit");
    }
}
