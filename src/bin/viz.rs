use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use suborbital_sim::sim::{FlightRecord, TrajectoryPoint};
use suborbital_sim::vehicle::presets;
use suborbital_sim::{
    simulate, LaunchConfig, PlanarModel, Playback, RotatingEarthModel, SimConfig, VerticalModel,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    Vertical,
    Planar,
    Rotating,
}

#[derive(Parser, Debug)]
#[command(name = "suborbital-viz")]
#[command(about = "Plot and replay a simulated flight")]
struct Args {
    #[arg(short, long, value_enum, default_value = "rotating")]
    model: Model,

    /// JSON launch configuration; defaults to the model's usual preset
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Simulated seconds per wall-clock second
    #[arg(short, long, default_value_t = 10.0)]
    speed: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let launch = match &args.config {
        Some(path) => LaunchConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => match args.model {
            Model::Vertical => presets::vertical_hop(),
            Model::Planar => LaunchConfig::default(),
            Model::Rotating => presets::kourou_m51(),
        },
    };

    let config = SimConfig::batch();
    let record = match args.model {
        Model::Vertical => simulate::<VerticalModel>(&launch, config),
        Model::Planar => simulate::<PlanarModel>(&launch, config),
        Model::Rotating => simulate::<RotatingEarthModel>(&launch, config),
    }
    .context("invalid launch configuration")?;

    let app = FlightViz {
        playback: Playback::new(record, args.speed)?,
        elapsed: 0.0,
        playing: true,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Suborbital Flight", options, Box::new(|_| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

struct FlightViz {
    playback: Playback,
    /// Wall-clock seconds since playback started.
    elapsed: f64,
    playing: bool,
}

/// One plot panel: the full curve plus a marker at the playback cursor.
fn panel(
    ui: &mut egui::Ui,
    id: &str,
    title: &str,
    x_label: &str,
    size: (f32, f32),
    samples: &[&TrajectoryPoint],
    cursor: Option<&TrajectoryPoint>,
    xy: impl Fn(&TrajectoryPoint) -> [f64; 2],
) {
    ui.vertical(|ui| {
        ui.label(title);
        let line: PlotPoints = samples.iter().map(|p| xy(p)).collect();
        let marker = cursor.map(|p| PlotPoints::new(vec![xy(p)]));
        Plot::new(id)
            .width(size.0)
            .height(size.1)
            .x_axis_label(x_label)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(title, line));
                if let Some(marker) = marker {
                    plot_ui.points(Points::new("now", marker).radius(4.0));
                }
            });
    });
}

impl eframe::App for FlightViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let speed = self.playback.speed();
        let end = self.playback.duration() / speed;
        if self.playing {
            self.elapsed += f64::from(ctx.input(|i| i.stable_dt));
            if self.playback.is_finished(self.elapsed) {
                self.elapsed = end;
                self.playing = false;
            }
            ctx.request_repaint();
        }

        let record: &FlightRecord = self.playback.record();
        let step = (record.points.len() / 2000).max(1);
        let sampled: Vec<&TrajectoryPoint> = record.points.iter().step_by(step).collect();
        let cursor = self.playback.sample(self.elapsed);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Model: {}", record.model));
            ui.label(format!(
                "Apogee: {:.1} km  |  Max speed: {:.0} m/s  |  Downrange: {:.0} km  |  Flight: {:.0} s  |  Outcome: {:?}",
                record.apogee / 1000.0,
                record.max_speed,
                record.final_downrange() / 1000.0,
                record.flight_time(),
                record.outcome,
            ));
            ui.horizontal(|ui| {
                let label = if self.playing { "Pause" } else { "Play" };
                if ui.button(label).clicked() {
                    if !self.playing && self.playback.is_finished(self.elapsed) {
                        self.elapsed = 0.0;
                    }
                    self.playing = !self.playing;
                }
                ui.add(egui::Slider::new(&mut self.elapsed, 0.0..=end).text("wall s"));
                if let Some(p) = &cursor {
                    ui.label(format!(
                        "t={:.1}s  alt={:.0}m  v={:.0}m/s  m={:.0}kg  {}",
                        p.time,
                        p.altitude,
                        p.speed,
                        p.mass,
                        p.phase.label()
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let size = (available.x / 2.0 - 8.0, available.y / 2.0 - 8.0);
            let cursor = cursor.as_ref();

            ui.horizontal(|ui| {
                panel(ui, "altitude", "Altitude (km)", "Time (s)", size, &sampled, cursor, |p| {
                    [p.time, p.altitude / 1000.0]
                });
                panel(ui, "speed", "Speed (m/s)", "Time (s)", size, &sampled, cursor, |p| {
                    [p.time, p.speed]
                });
            });

            ui.horizontal(|ui| {
                panel(ui, "mass", "Mass (kg)", "Time (s)", size, &sampled, cursor, |p| {
                    [p.time, p.mass]
                });
                panel(ui, "profile", "Trajectory Profile (km)", "Downrange (km)", size, &sampled, cursor, |p| {
                    [p.downrange / 1000.0, p.altitude / 1000.0]
                });
            });
        });
    }
}
