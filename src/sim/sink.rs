use std::cell::RefCell;
use std::rc::Rc;

use super::telemetry::{TelemetrySnapshot, TrajectoryPoint};

// ---------------------------------------------------------------------------
// Presentation collaborators
// ---------------------------------------------------------------------------

/// Receives a snapshot after every step.
pub trait TelemetrySink {
    fn record(&mut self, snapshot: &TelemetrySnapshot);
}

/// Receives trajectory points as they are produced.
pub trait TrajectoryRenderer {
    fn append(&mut self, point: &TrajectoryPoint);
    fn clear(&mut self);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn record(&mut self, _snapshot: &TelemetrySnapshot) {}
}

impl TrajectoryRenderer for NullSink {
    fn append(&mut self, _point: &TrajectoryPoint) {}
    fn clear(&mut self) {}
}

impl TelemetrySink for Vec<TelemetrySnapshot> {
    fn record(&mut self, snapshot: &TelemetrySnapshot) {
        self.push(*snapshot);
    }
}

impl TrajectoryRenderer for Vec<TrajectoryPoint> {
    fn append(&mut self, point: &TrajectoryPoint) {
        self.push(*point);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

// Shared handles, so a caller can keep reading what the driver writes.

impl<T: TelemetrySink> TelemetrySink for Rc<RefCell<T>> {
    fn record(&mut self, snapshot: &TelemetrySnapshot) {
        self.borrow_mut().record(snapshot);
    }
}

impl<T: TrajectoryRenderer> TrajectoryRenderer for Rc<RefCell<T>> {
    fn append(&mut self, point: &TrajectoryPoint) {
        self.borrow_mut().append(point);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
}
