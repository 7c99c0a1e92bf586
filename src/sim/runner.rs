use std::collections::VecDeque;

use nalgebra::Vector3;
use tracing::{debug, info, warn};

use super::config::SimConfig;
use super::event::{classify_impact, crossing_fraction, EventKind, FlightEvent, FlightPhase, Outcome};
use super::integrator::model_step;
use super::sink::{NullSink, TelemetrySink, TrajectoryRenderer};
use super::telemetry::{FlightRecord, TelemetrySnapshot, TrajectoryPoint};
use crate::dynamics::{FlightModel, StateVector};
use crate::error::Result;
use crate::geo::{ProgressMode, TrajectoryMapper};
use crate::vehicle::LaunchConfig;

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Everything that changes while a flight is running.
#[derive(Debug, Clone)]
pub struct SimulationContext<S> {
    pub state: S,
    /// Reported time. Equals `steps * dt` except at an interpolated impact.
    pub time: f64,
    pub steps: u64,
    pub phase: FlightPhase,
    pub apogee: f64,
    pub max_speed: f64,
    /// Set once the vehicle has climbed above the pad clearance.
    pub cleared_pad: bool,
    pub running: bool,
    pub outcome: Option<Outcome>,
    pub events: Vec<FlightEvent>,
    pub trajectory: VecDeque<TrajectoryPoint>,
    pub snapshot: TelemetrySnapshot,
}

impl<S> SimulationContext<S> {
    fn new(state: S) -> Self {
        Self {
            state,
            time: 0.0,
            steps: 0,
            phase: FlightPhase::Powered,
            apogee: 0.0,
            max_speed: 0.0,
            cleared_pad: false,
            running: true,
            outcome: None,
            events: Vec::new(),
            trajectory: VecDeque::new(),
            snapshot: TelemetrySnapshot::idle(),
        }
    }
}

struct ActiveRun<M: FlightModel> {
    model: M,
    mapper: TrajectoryMapper,
    target_distance: f64,
    ctx: SimulationContext<M::State>,
}

impl<M: FlightModel> ActiveRun<M> {
    /// Sample of the current state, placed in the scene.
    fn sample(&self) -> TrajectoryPoint {
        let (state, time) = (&self.ctx.state, self.ctx.time);
        let forces = self.model.forces(state, time);
        let altitude = self.model.altitude(state).max(0.0);
        let downrange = self.model.downrange(state, time);
        let vertical_speed = self.model.radial_speed(state);

        let position = match self.model.ground_direction(state, time) {
            Some(direction) => self.mapper.scale.place(&direction, altitude),
            None => self.mapper.locate(time, downrange, altitude),
        };
        let tangent = self
            .ctx
            .trajectory
            .back()
            .and_then(|prev| (position - prev.position).try_normalize(1e-12))
            .unwrap_or_else(|| {
                let up = position.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::y);
                if vertical_speed < 0.0 {
                    -up
                } else {
                    up
                }
            });

        TrajectoryPoint {
            time,
            position,
            tangent,
            altitude,
            vertical_speed,
            speed: self.model.speed(state),
            mass: self.model.mass(state),
            thrust: forces.thrust,
            drag: forces.drag,
            gravity: forces.gravity,
            density: forces.density,
            downrange,
            phase: self.ctx.phase,
        }
    }

    fn log_event(&mut self, kind: EventKind) {
        let altitude = self.model.altitude(&self.ctx.state).max(0.0);
        self.ctx.events.push(FlightEvent { time: self.ctx.time, altitude, kind });
    }

    fn set_phase(&mut self, phase: FlightPhase) {
        if phase == self.ctx.phase {
            return;
        }
        info!(from = %self.ctx.phase, to = %phase, time = self.ctx.time, "phase change");
        if self.ctx.phase == FlightPhase::Powered && !phase.is_terminal() {
            self.log_event(EventKind::Burnout);
        }
        if phase == FlightPhase::Descending {
            // apogee was the previous sample; altitude of record is the maximum
            self.ctx.events.push(FlightEvent {
                time: self.ctx.time,
                altitude: self.ctx.apogee,
                kind: EventKind::Apogee,
            });
        }
        self.ctx.phase = phase;
    }

    fn record(&self) -> FlightRecord {
        FlightRecord {
            model: M::NAME,
            points: self.ctx.trajectory.iter().copied().collect(),
            events: self.ctx.events.clone(),
            outcome: self.ctx.outcome,
            target_distance: self.target_distance,
            apogee: self.ctx.apogee,
            max_speed: self.ctx.max_speed,
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Owns one flight at a time and drives it step by step.
///
/// `launch` freezes a copy of the parameters; edits to the caller's
/// configuration only take effect at the next launch.
pub struct FlightSimulation<M: FlightModel> {
    config: SimConfig,
    options: M::Options,
    run: Option<ActiveRun<M>>,
    telemetry: Box<dyn TelemetrySink>,
    renderer: Box<dyn TrajectoryRenderer>,
}

impl<M: FlightModel> FlightSimulation<M> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            options: M::Options::default(),
            run: None,
            telemetry: Box::new(NullSink),
            renderer: Box::new(NullSink),
        }
    }

    pub fn with_options(mut self, options: M::Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_telemetry(mut self, sink: impl TelemetrySink + 'static) -> Self {
        self.telemetry = Box::new(sink);
        self
    }

    pub fn with_renderer(mut self, renderer: impl TrajectoryRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Validate, build the model and start a fresh run.
    ///
    /// Nothing is touched when validation fails.
    pub fn launch(&mut self, launch: &LaunchConfig) -> Result<()> {
        launch.validate()?;
        self.config.validate()?;

        let params = launch.rocket;
        let geometry = launch.geometry();
        let model = M::build(params, geometry, &self.options);
        let target_distance = geometry.target_distance(model.environment().radius);
        let progress = self.config.progress.unwrap_or(if M::RANGED {
            ProgressMode::Downrange
        } else {
            ProgressMode::default()
        });
        let mapper = TrajectoryMapper::new(
            geometry,
            self.config.scene,
            progress,
            self.config.eased,
            target_distance,
        );

        info!(model = M::NAME, target_km = target_distance / 1_000.0, "launch");
        debug!(
            mass_flow = params.effective_mass_flow(),
            twr = params.twr(model.environment().g0),
            axis = ?geometry.rotation_axis(),
            "derived launch values"
        );

        let ctx = SimulationContext::new(model.initial_state());
        let mut run = ActiveRun { model, mapper, target_distance, ctx };
        run.log_event(EventKind::Launch);
        self.run = Some(run);

        self.renderer.clear();
        self.publish_sample();
        Ok(())
    }

    /// Stop and forget the current run.
    pub fn reset(&mut self) {
        if self.run.take().is_some() {
            info!("reset");
        }
        self.renderer.clear();
    }

    /// One fixed `dt` step. A stopped or idle simulation returns its last
    /// snapshot unchanged.
    pub fn step(&mut self) -> TelemetrySnapshot {
        let dt = self.config.dt;
        let Some(run) = self.run.as_mut() else {
            return TelemetrySnapshot::idle();
        };
        if !run.ctx.running {
            return run.ctx.snapshot;
        }

        let t0 = run.ctx.steps as f64 * dt;
        let t1 = (run.ctx.steps + 1) as f64 * dt;
        let prev = run.ctx.state;
        let next = model_step(&run.model, &prev, t0, dt);
        run.ctx.steps += 1;

        let h_prev = run.model.altitude(&prev);
        let h_next = run.model.altitude(&next);
        if h_next > self.config.pad_clearance {
            run.ctx.cleared_pad = true;
        }
        let armed = run.ctx.cleared_pad || t1 > self.config.grace_period;

        if armed && h_next <= 0.0 {
            let f = crossing_fraction(h_prev, h_next);
            run.ctx.state = run.model.constrain(&prev.lerp(&next, f), false);
            run.ctx.time = t0 + f * dt;

            let downrange = run.model.downrange(&run.ctx.state, run.ctx.time);
            let outcome = classify_impact(
                M::RANGED,
                downrange,
                run.target_distance,
                self.config.target_tolerance,
            );
            if let Some(phase) = outcome.phase() {
                run.set_phase(phase);
            }
            run.ctx.outcome = Some(outcome);
            run.ctx.running = false;
            run.log_event(EventKind::Impact(outcome));
            info!(
                outcome = ?outcome,
                time = run.ctx.time,
                downrange_km = downrange / 1_000.0,
                apogee_km = run.ctx.apogee / 1_000.0,
                "impact"
            );
        } else {
            run.ctx.state = run.model.constrain(&next, true);
            run.ctx.time = t1;
            let radial = run.model.radial_speed(&run.ctx.state);
            let phase = run.ctx.phase.advance(t1, run.model.params().burn_time, radial);
            run.set_phase(phase);

            if t1 >= self.config.max_time - dt * 1e-6 {
                run.ctx.outcome = Some(Outcome::TimeLimit);
                run.ctx.running = false;
                run.log_event(EventKind::TimeLimit);
                warn!(
                    time = t1,
                    altitude = run.model.altitude(&run.ctx.state),
                    phase = %run.ctx.phase,
                    "mission duration cap reached"
                );
            }
        }

        self.publish_sample()
    }

    /// Step until `sim_time` is reached or the run stops.
    pub fn advance_to(&mut self, sim_time: f64) -> TelemetrySnapshot {
        let eps = self.config.dt * 1e-6;
        while self.is_running() && self.time() < sim_time - eps {
            self.step();
        }
        self.snapshot()
    }

    /// Integrate what is left of the flight in one go.
    pub fn run_to_completion(&mut self) -> FlightRecord {
        while self.is_running() {
            self.step();
        }
        match &self.run {
            Some(run) => run.record(),
            None => FlightRecord {
                model: M::NAME,
                points: Vec::new(),
                events: Vec::new(),
                outcome: None,
                target_distance: 0.0,
                apogee: 0.0,
                max_speed: 0.0,
            },
        }
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.run.as_ref().map_or_else(TelemetrySnapshot::idle, |r| r.ctx.snapshot)
    }

    pub fn context(&self) -> Option<&SimulationContext<M::State>> {
        self.run.as_ref().map(|r| &r.ctx)
    }

    pub fn model(&self) -> Option<&M> {
        self.run.as_ref().map(|r| &r.model)
    }

    pub fn trajectory(&self) -> impl Iterator<Item = &TrajectoryPoint> + '_ {
        self.run.iter().flat_map(|r| r.ctx.trajectory.iter())
    }

    pub fn events(&self) -> &[FlightEvent] {
        match &self.run {
            Some(run) => &run.ctx.events,
            None => &[],
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.run.as_ref().map_or(FlightPhase::Idle, |r| r.ctx.phase)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.run.as_ref().and_then(|r| r.ctx.outcome)
    }

    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.ctx.running)
    }

    pub fn time(&self) -> f64 {
        self.run.as_ref().map_or(0.0, |r| r.ctx.time)
    }

    pub fn target_distance(&self) -> Option<f64> {
        self.run.as_ref().map(|r| r.target_distance)
    }

    /// Sample the current state, update the maxima and notify the sinks.
    fn publish_sample(&mut self) -> TelemetrySnapshot {
        let history_limit = self.config.history_limit;
        let Some(run) = self.run.as_mut() else {
            return TelemetrySnapshot::idle();
        };

        let point = run.sample();
        run.ctx.apogee = run.ctx.apogee.max(point.altitude);
        run.ctx.max_speed = run.ctx.max_speed.max(point.speed);

        run.ctx.trajectory.push_back(point);
        if let Some(limit) = history_limit {
            while run.ctx.trajectory.len() > limit.max(1) {
                run.ctx.trajectory.pop_front();
            }
        }

        let snapshot = TelemetrySnapshot::from_point(&point, run.ctx.apogee, run.ctx.max_speed);
        run.ctx.snapshot = snapshot;

        self.renderer.append(&point);
        self.telemetry.record(&snapshot);
        snapshot
    }
}

/// Launch and run one flight in batch mode.
pub fn simulate<M: FlightModel>(launch: &LaunchConfig, config: SimConfig) -> Result<FlightRecord> {
    let mut sim = FlightSimulation::<M>::new(config);
    sim.launch(launch)?;
    Ok(sim.run_to_completion())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{PlanarModel, VerticalModel};
    use crate::vehicle::presets;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn idle_until_launched() {
        let mut sim = FlightSimulation::<VerticalModel>::new(SimConfig::batch());
        assert_eq!(sim.phase(), FlightPhase::Idle);
        assert_eq!(sim.step().phase, FlightPhase::Idle);
        assert_eq!(sim.trajectory().count(), 0);
        assert!(sim.run_to_completion().outcome.is_none());
    }

    #[test]
    fn launch_starts_powered_with_launch_event() {
        let mut sim = FlightSimulation::<VerticalModel>::new(SimConfig::batch());
        sim.launch(&presets::vertical_hop()).unwrap();
        assert!(sim.is_running());
        assert_eq!(sim.phase(), FlightPhase::Powered);
        assert_eq!(sim.events()[0].kind, EventKind::Launch);
        assert_eq!(sim.trajectory().count(), 1);
    }

    #[test]
    fn time_is_step_count_times_dt() {
        let mut sim = FlightSimulation::<VerticalModel>::new(SimConfig::batch());
        sim.launch(&presets::vertical_hop()).unwrap();
        for _ in 0..137 {
            sim.step();
        }
        assert_eq!(sim.time(), 137.0 * 0.05);
    }

    #[test]
    fn no_impact_on_the_pad() {
        // too heavy to lift off: sits on the pad until the grace period ends
        let mut launch = presets::vertical_hop();
        launch.rocket.thrust = 100.0;
        let mut sim = FlightSimulation::<VerticalModel>::new(SimConfig::batch());
        sim.launch(&launch).unwrap();
        sim.advance_to(0.5);
        assert!(sim.is_running());
        let record = sim.run_to_completion();
        assert_eq!(record.outcome, Some(Outcome::Landed));
        assert!(record.flight_time() >= 1.0 && record.flight_time() <= 1.1);
    }

    #[test]
    fn time_cap_keeps_phase() {
        let config = SimConfig { max_time: 5.0, ..SimConfig::batch() };
        let mut sim = FlightSimulation::<VerticalModel>::new(config);
        sim.launch(&presets::vertical_hop()).unwrap();
        let record = sim.run_to_completion();
        assert_eq!(record.outcome, Some(Outcome::TimeLimit));
        assert_eq!(sim.phase(), FlightPhase::Powered);
        assert!(matches!(sim.events().last().map(|e| e.kind), Some(EventKind::TimeLimit)));
        assert!((record.flight_time() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn stopped_run_does_not_advance() {
        let mut sim = FlightSimulation::<VerticalModel>::new(SimConfig::batch());
        sim.launch(&presets::vertical_hop()).unwrap();
        let record = sim.run_to_completion();
        let last = sim.step();
        assert_eq!(last.time, record.flight_time());
        assert_eq!(sim.trajectory().count(), record.points.len());
    }

    #[test]
    fn renderer_sees_every_point_and_reset_clears() {
        let points = Rc::new(RefCell::new(Vec::<TrajectoryPoint>::new()));
        let mut sim = FlightSimulation::<PlanarModel>::new(SimConfig::batch())
            .with_renderer(points.clone());
        sim.launch(&LaunchConfig::default()).unwrap();
        let record = sim.run_to_completion();
        assert_eq!(points.borrow().len(), record.points.len());
        sim.reset();
        assert!(points.borrow().is_empty());
        assert_eq!(sim.phase(), FlightPhase::Idle);
    }
}
