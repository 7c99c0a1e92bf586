use suborbital_sim::geo::{arc_preview, unit_vector_to_lat_lon, SceneScale};
use suborbital_sim::vehicle::presets;

/// Prints the launch-to-impact preview arc for the Kourou M51 shot: scene
/// position, the ground point under it and the arc height.
fn main() {
    let launch = presets::kourou_m51();
    let geometry = launch.geometry();
    let scale = SceneScale::default();
    let apogee = 1_000_000.0; // m, peak of the preview profile

    let arc = arc_preview(&geometry, &scale, apogee, 100);

    println!(
        "Kourou ({:.2}, {:.2}) -> ({:.2}, {:.2}), {:.0} km",
        launch.launch_lat,
        launch.launch_lon,
        launch.impact_lat,
        launch.impact_lon,
        geometry.target_distance(6_378_000.0) / 1000.0
    );
    println!("{:>4}  {:>8}  {:>9}  {:>10}  {:>24}", "i", "lat", "lon", "height(km)", "scene");

    for (i, p) in arc.iter().enumerate().step_by(10) {
        let (lat, lon) = unit_vector_to_lat_lon(p);
        let height = (p.norm() - scale.visual_radius) / scale.altitude_scale();
        println!(
            "{:>4}  {:>8.3}  {:>9.3}  {:>10.1}  ({:>6.3}, {:>6.3}, {:>6.3})",
            i,
            lat,
            lon,
            height / 1000.0,
            p.x,
            p.y,
            p.z
        );
    }
}
