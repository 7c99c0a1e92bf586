use std::io::{self, Write};
use std::path::Path;

use crate::sim::TrajectoryPoint;

/// Write trajectory data to CSV format.
///
/// Columns: time, altitude, vertical_speed, speed, mass, thrust, drag,
///          gravity, density, downrange, scene_x, scene_y, scene_z, phase
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[TrajectoryPoint]) -> io::Result<()> {
    writeln!(
        writer,
        "time,altitude,vertical_speed,speed,mass,thrust,drag,\
         gravity,density,downrange,scene_x,scene_y,scene_z,phase"
    )?;

    for p in trajectory {
        writeln!(
            writer,
            "{:.4},{:.3},{:.3},{:.3},{:.4},{:.2},{:.3},\
             {:.5},{:.6},{:.3},{:.6},{:.6},{:.6},{}",
            p.time,
            p.altitude,
            p.vertical_speed,
            p.speed,
            p.mass,
            p.thrust,
            p.drag,
            p.gravity,
            p.density,
            p.downrange,
            p.position.x, p.position.y, p.position.z,
            p.phase.label(),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &[TrajectoryPoint]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
