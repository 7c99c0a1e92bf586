use crate::error::{non_negative, positive, Result};
use crate::geo::{ProgressMode, SceneScale};

/// Integration and run-control settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Fixed step, s.
    pub dt: f64,
    /// Mission-duration cap, s.
    pub max_time: f64,
    /// Ground contact is ignored until this much time has passed...
    pub grace_period: f64,
    /// ...or the vehicle has climbed above this altitude, m.
    pub pad_clearance: f64,
    /// Half-width of the target-hit band, m.
    pub target_tolerance: f64,
    /// Keep only the newest points. `None` keeps the whole flight.
    pub history_limit: Option<usize>,
    pub scene: SceneScale,
    /// `None` picks downrange progress for ranged models, a 60 s clock
    /// otherwise.
    pub progress: Option<ProgressMode>,
    /// Ease the great-circle progress with a cubic in-out curve.
    pub eased: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::batch()
    }
}

impl SimConfig {
    /// Run to completion, keeping every point.
    pub fn batch() -> Self {
        Self {
            dt: 0.05,
            max_time: 800.0,
            grace_period: 1.0,
            pad_clearance: 1.0,
            target_tolerance: 50_000.0,
            history_limit: None,
            scene: SceneScale::default(),
            progress: None,
            eased: false,
        }
    }

    /// Frame-driven stepping with a bounded trail.
    pub fn realtime() -> Self {
        Self { history_limit: Some(1_000), eased: true, ..Self::batch() }
    }

    pub fn validate(&self) -> Result<()> {
        positive("dt", self.dt)?;
        positive("maxTime", self.max_time)?;
        non_negative("gracePeriod", self.grace_period)?;
        non_negative("padClearance", self.pad_clearance)?;
        non_negative("targetTolerance", self.target_tolerance)?;
        positive("visualRadius", self.scene.visual_radius)?;
        positive("lengthScale", self.scene.length_scale)?;
        positive("exaggeration", self.scene.exaggeration)?;
        if let Some(ProgressMode::Clock { span }) = self.progress {
            positive("progressSpan", span)?;
        }
        Ok(())
    }
}
