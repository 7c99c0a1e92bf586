use std::f64::consts::PI;

use nalgebra::Vector3;

use super::slerp::{ease_in_out_cubic, slerp};
use crate::vehicle::LaunchGeometry;

// ---------------------------------------------------------------------------
// Physical state -> scene position
// ---------------------------------------------------------------------------

/// Scene units: the globe is `visual_radius` wide and one metre is
/// `length_scale` units. `exaggeration` stretches altitude only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneScale {
    pub visual_radius: f64,
    pub length_scale: f64,
    pub exaggeration: f64,
}

impl Default for SceneScale {
    fn default() -> Self {
        Self {
            visual_radius: 5.0,
            length_scale: 1.0 / 100_000.0, // 1 unit = 100 km
            exaggeration: 1.0,
        }
    }
}

impl SceneScale {
    pub fn altitude_scale(&self) -> f64 {
        self.length_scale * self.exaggeration
    }

    /// `direction * (R_visual + altitude * altitude_scale)`
    pub fn place(&self, direction: &Vector3<f64>, altitude: f64) -> Vector3<f64> {
        direction.normalize() * (self.visual_radius + altitude * self.altitude_scale())
    }
}

/// Where along the launch-to-impact arc a sample sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressMode {
    /// Fraction of a fixed time span (the real-time front end used 60 s).
    Clock { span: f64 },
    /// Fraction of the target distance covered on the ground.
    Downrange,
}

impl Default for ProgressMode {
    fn default() -> Self {
        ProgressMode::Clock { span: 60.0 }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrajectoryMapper {
    pub geometry: LaunchGeometry,
    pub scale: SceneScale,
    pub progress: ProgressMode,
    pub eased: bool,
    target_distance: f64,
}

impl TrajectoryMapper {
    pub fn new(
        geometry: LaunchGeometry,
        scale: SceneScale,
        progress: ProgressMode,
        eased: bool,
        target_distance: f64,
    ) -> Self {
        Self { geometry, scale, progress, eased, target_distance }
    }

    /// Raw progress in `[0, 1]` (before easing).
    pub fn progress(&self, time: f64, downrange: f64) -> f64 {
        match self.progress {
            ProgressMode::Clock { span } if span > 0.0 => (time / span).clamp(0.0, 1.0),
            ProgressMode::Clock { .. } => 1.0,
            ProgressMode::Downrange if self.target_distance > f64::EPSILON => {
                (downrange / self.target_distance).clamp(0.0, 1.0)
            }
            ProgressMode::Downrange => 0.0,
        }
    }

    /// Unit direction on the launch-to-impact great circle.
    pub fn direction(&self, progress: f64) -> Vector3<f64> {
        let t = if self.eased { ease_in_out_cubic(progress) } else { progress };
        slerp(&self.geometry.launch, &self.geometry.impact, t)
    }

    pub fn locate(&self, time: f64, downrange: f64, altitude: f64) -> Vector3<f64> {
        let direction = self.direction(self.progress(time, downrange));
        self.scale.place(&direction, altitude)
    }
}

/// Preview arc between the endpoints with a `sin(pi t)` height profile
/// peaking at `apogee` metres. `steps + 1` points.
pub fn arc_preview(
    geometry: &LaunchGeometry,
    scale: &SceneScale,
    apogee: f64,
    steps: usize,
) -> Vec<Vector3<f64>> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let direction = slerp(&geometry.launch, &geometry.impact, t);
            scale.place(&direction, apogee * (t * PI).sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::lat_lon_to_unit_vector;
    use approx::assert_abs_diff_eq;

    fn geometry() -> LaunchGeometry {
        LaunchGeometry::new(
            lat_lon_to_unit_vector(48.85, 2.35),
            lat_lon_to_unit_vector(43.6, 1.44),
        )
    }

    #[test]
    fn ground_level_sits_on_visual_sphere() {
        let s = SceneScale::default();
        let p = s.place(&Vector3::x(), 0.0);
        assert_abs_diff_eq!(p.norm(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn exaggeration_scales_altitude_only() {
        let s = SceneScale { exaggeration: 10.0, ..Default::default() };
        // 100 km -> 1 unit, x10
        assert_abs_diff_eq!(s.place(&Vector3::y(), 100_000.0).norm(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn clock_progress_saturates() {
        let m = TrajectoryMapper::new(
            geometry(),
            SceneScale::default(),
            ProgressMode::Clock { span: 60.0 },
            false,
            0.0,
        );
        assert_eq!(m.progress(30.0, 0.0), 0.5);
        assert_eq!(m.progress(120.0, 0.0), 1.0);
    }

    #[test]
    fn downrange_progress_reaches_impact() {
        let g = geometry();
        let m = TrajectoryMapper::new(g, SceneScale::default(), ProgressMode::Downrange, true, 500e3);
        let end = m.locate(0.0, 600e3, 0.0);
        assert_abs_diff_eq!(end, g.impact * 5.0, epsilon = 1e-9);
        let start = m.locate(0.0, 0.0, 0.0);
        assert_abs_diff_eq!(start, g.launch * 5.0, epsilon = 1e-9);
    }

    #[test]
    fn nearly_antipodal_target_is_reached() {
        let g = LaunchGeometry::new(
            lat_lon_to_unit_vector(0.0, 0.0),
            lat_lon_to_unit_vector(1.5, 180.0),
        );
        let distance = g.target_distance(6_378_000.0);
        let m = TrajectoryMapper::new(g, SceneScale::default(), ProgressMode::Downrange, false, distance);
        assert_abs_diff_eq!(m.locate(0.0, distance, 0.0), g.impact * 5.0, epsilon = 1e-9);
    }

    #[test]
    fn preview_arc_is_grounded_at_both_ends() {
        let g = geometry();
        let arc = arc_preview(&g, &SceneScale::default(), 100_000.0, 100);
        assert_eq!(arc.len(), 101);
        assert_abs_diff_eq!(arc[0].norm(), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc[100].norm(), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc[50].norm(), 6.0, epsilon = 1e-9);
    }
}
