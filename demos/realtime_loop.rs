use std::cell::RefCell;
use std::rc::Rc;

use suborbital_sim::sim::{FlightPhase, TelemetrySnapshot, TrajectoryPoint};
use suborbital_sim::{FlightSimulation, LaunchConfig, PlanarModel, SimConfig};

/// Frame-driven stepping: one `step()` per simulated frame, with the
/// telemetry and trajectory collected through shared `Vec` sinks.
fn main() {
    let telemetry = Rc::new(RefCell::new(Vec::<TelemetrySnapshot>::new()));
    let trail = Rc::new(RefCell::new(Vec::<TrajectoryPoint>::new()));

    let mut sim = FlightSimulation::<PlanarModel>::new(SimConfig::realtime())
        .with_telemetry(telemetry.clone())
        .with_renderer(trail.clone());

    if let Err(e) = sim.launch(&LaunchConfig::default()) {
        eprintln!("launch rejected: {e}");
        return;
    }

    let mut frame = 0usize;
    let mut last_phase = FlightPhase::Idle;
    while sim.is_running() {
        let snap = sim.step();
        frame += 1;
        if snap.phase != last_phase {
            println!(
                "frame {:>5}  t={:>6.2}s  {:<6}  alt={:>8.1}m  v={:>6.1}m/s",
                frame,
                snap.time,
                snap.phase.label(),
                snap.altitude,
                snap.speed
            );
            last_phase = snap.phase;
        }
    }

    println!();
    println!("Outcome:     {:?}", sim.outcome());
    println!("Frames:      {}", frame);
    println!("Snapshots:   {}", telemetry.borrow().len());
    println!("Rendered:    {}", trail.borrow().len());
    println!("Kept trail:  {} (ring buffer)", sim.trajectory().count());
}
