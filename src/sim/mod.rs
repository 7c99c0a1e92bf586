pub mod config;
pub mod event;
pub mod integrator;
pub mod playback;
pub mod runner;
pub mod sink;
pub mod telemetry;

pub use config::SimConfig;
pub use event::{EventKind, FlightEvent, FlightPhase, Outcome};
pub use integrator::rk4_step;
pub use playback::Playback;
pub use runner::{simulate, FlightSimulation, SimulationContext};
pub use sink::{NullSink, TelemetrySink, TrajectoryRenderer};
pub use telemetry::{FlightRecord, TelemetrySnapshot, TrajectoryPoint};
