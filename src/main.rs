use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use suborbital_sim::io::{csv, json, FlightSummary};
use suborbital_sim::physics::G0;
use suborbital_sim::sim::{EventKind, FlightRecord};
use suborbital_sim::vehicle::presets;
use suborbital_sim::{
    simulate, FlightModel, LaunchConfig, PlanarModel, RotatingEarthModel, SimConfig,
    VerticalModel,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    /// 1-D: straight up and back down
    Vertical,
    /// 2-D: downrange and altitude over flat ground
    Planar,
    /// 3-D: inertial frame over the spinning Earth
    Rotating,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// 50 kg sounding rocket, Paris -> Toulouse
    Sounding,
    /// Sounding rocket, launch and impact at the same point
    Hop,
    /// M51-class missile from Kourou
    M51,
}

#[derive(Parser, Debug)]
#[command(name = "suborbital-sim")]
#[command(about = "Suborbital rocket flight simulator")]
#[command(version)]
struct Args {
    #[arg(short, long, value_enum, default_value = "planar")]
    model: Model,

    /// Starting configuration (ignored when --config is given)
    #[arg(short, long, value_enum, default_value = "sounding")]
    preset: Preset,

    /// JSON launch configuration (camelCase keys, missing keys use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    // ── Overrides ─────────────────────────────────────────────
    #[arg(long)]
    launch_lat: Option<f64>,
    #[arg(long)]
    launch_lon: Option<f64>,
    #[arg(long)]
    impact_lat: Option<f64>,
    #[arg(long)]
    impact_lon: Option<f64>,
    #[arg(long)]
    initial_mass: Option<f64>,
    #[arg(long)]
    thrust: Option<f64>,
    #[arg(long)]
    mass_flow_rate: Option<f64>,
    #[arg(long)]
    burn_time: Option<f64>,
    #[arg(long)]
    dry_mass: Option<f64>,
    #[arg(long)]
    reference_area: Option<f64>,
    #[arg(long)]
    drag_coefficient: Option<f64>,

    // ── Integration ───────────────────────────────────────────
    /// Fixed integration step, s
    #[arg(long, default_value_t = 0.05)]
    dt: f64,

    /// Mission-duration cap, s
    #[arg(long, default_value_t = 800.0)]
    max_time: f64,

    /// Number of rows in the printed trajectory table
    #[arg(long, default_value_t = 30)]
    rows: usize,

    // ── Export ────────────────────────────────────────────────
    /// Write the full trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the flight summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Args {
    fn launch_config(&self) -> Result<LaunchConfig> {
        let mut launch = match &self.config {
            Some(path) => LaunchConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => match self.preset {
                Preset::Sounding => LaunchConfig::default(),
                Preset::Hop => presets::vertical_hop(),
                Preset::M51 => presets::kourou_m51(),
            },
        };

        let overrides = [
            (&mut launch.launch_lat, self.launch_lat),
            (&mut launch.launch_lon, self.launch_lon),
            (&mut launch.impact_lat, self.impact_lat),
            (&mut launch.impact_lon, self.impact_lon),
            (&mut launch.rocket.initial_mass, self.initial_mass),
            (&mut launch.rocket.thrust, self.thrust),
            (&mut launch.rocket.mass_flow_rate, self.mass_flow_rate),
            (&mut launch.rocket.burn_time, self.burn_time),
            (&mut launch.rocket.dry_mass, self.dry_mass),
            (&mut launch.rocket.reference_area, self.reference_area),
            (&mut launch.rocket.drag_coefficient, self.drag_coefficient),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        Ok(launch)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let launch = args.launch_config()?;
    let config = SimConfig { dt: args.dt, max_time: args.max_time, ..SimConfig::batch() };

    let record = match args.model {
        Model::Vertical => run::<VerticalModel>(&launch, config)?,
        Model::Planar => run::<PlanarModel>(&launch, config)?,
        Model::Rotating => run::<RotatingEarthModel>(&launch, config)?,
    };

    print_report(&launch, &record, &config, args.rows);

    if let Some(path) = &args.csv {
        csv::write_trajectory_file(path, &record.points)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("  Trajectory written to {}", path.display());
    }
    if let Some(path) = &args.json {
        json::write_summary_file(path, &FlightSummary::from_record(&record))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("  Summary written to {}", path.display());
    }

    Ok(())
}

fn run<M: FlightModel>(launch: &LaunchConfig, config: SimConfig) -> Result<FlightRecord> {
    simulate::<M>(launch, config).context("invalid launch configuration")
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

fn print_report(launch: &LaunchConfig, record: &FlightRecord, config: &SimConfig, rows: usize) {
    let rocket = &launch.rocket;
    let rule = "  ──────────────────────────────────────────────────────────────────";

    println!();
    println!("====================================================================");
    println!("  SUBORBITAL FLIGHT SIMULATION — {} model", record.model);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("{rule}");
    println!(
        "  Initial mass:  {:>8.1} kg    Dry mass:     {:>8.1} kg",
        rocket.initial_mass, rocket.dry_mass
    );
    println!(
        "  Thrust:        {:>8.0} N     TWR:          {:>8.2}",
        rocket.thrust,
        rocket.twr(G0)
    );
    println!(
        "  Mass flow:     {:>8.2} kg/s  Burn time:    {:>8.1} s",
        rocket.effective_mass_flow(),
        rocket.burn_time
    );
    println!(
        "  Cd:            {:>8.3}       Area:         {:>8.4} m^2",
        rocket.drag_coefficient, rocket.reference_area
    );
    println!(
        "  Launch:   {:>7.3}, {:>8.3}    Impact:  {:>7.3}, {:>8.3}",
        launch.launch_lat, launch.launch_lon, launch.impact_lat, launch.impact_lon
    );
    println!();

    println!("  Flight Events");
    println!("{rule}");
    for event in &record.events {
        let label = match event.kind {
            EventKind::Launch => "LAUNCH".to_string(),
            EventKind::Burnout => "BURNOUT".to_string(),
            EventKind::Apogee => "APOGEE".to_string(),
            EventKind::Impact(outcome) => format!("IMPACT ({outcome:?})"),
            EventKind::TimeLimit => "TIME LIMIT".to_string(),
        };
        println!("  {:<18} t={:>7.1}s   alt={:>10.0}m", label, event.time, event.altitude);
    }
    println!();

    println!("  Performance Summary");
    println!("{rule}");
    println!("  Max altitude:  {:>10.0} m   ({:.2} km)", record.apogee, record.apogee / 1000.0);
    println!("  Max speed:     {:>10.1} m/s", record.max_speed);
    println!("  Flight time:   {:>10.1} s", record.flight_time());
    match record.impact_speed() {
        Some(speed) => println!("  Impact speed:  {:>10.1} m/s", speed),
        None => println!("  Impact speed:  {:>10} (no ground contact)", "-"),
    }
    if record.target_distance > 0.0 || record.final_downrange() > 0.0 {
        println!("  Downrange:     {:>10.1} km", record.final_downrange() / 1000.0);
        println!("  Target:        {:>10.1} km", record.target_distance / 1000.0);
        println!("  Miss:          {:>+10.1} km", record.miss_distance() / 1000.0);
    }
    match record.outcome {
        Some(outcome) => println!("  Outcome:       {outcome:?}"),
        None => println!("  Outcome:       (none)"),
    }
    println!();

    println!("  Trajectory");
    println!("{rule}");
    println!(
        "  {:>7}  {:>10}  {:>9}  {:>9}  {:>8}  {:>10}  {:>6}",
        "t (s)", "alt (m)", "vz (m/s)", "v (m/s)", "mass(kg)", "range (km)", "phase"
    );
    println!("  {}", "─".repeat(70));

    let points = &record.points;
    let interval = (points.len() / rows.max(1)).max(1);
    for (i, p) in points.iter().enumerate() {
        let near_burnout = (p.time - rocket.burn_time).abs() < config.dt * 0.5;
        if i % interval != 0 && !near_burnout && i + 1 != points.len() {
            continue;
        }
        println!(
            "  {:>7.2}  {:>10.1}  {:>9.1}  {:>9.1}  {:>8.2}  {:>10.2}  {:>6}",
            p.time,
            p.altitude,
            p.vertical_speed,
            p.speed,
            p.mass,
            p.downrange / 1000.0,
            p.phase.label()
        );
    }

    println!();
    println!("  Simulation: {} samples, dt={} s", points.len(), config.dt);
    println!("====================================================================");
    println!();
}
