use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Latitude / longitude <-> unit vector
// ---------------------------------------------------------------------------
//
// Scene convention: +Y is the north pole (and the spin axis), longitude 0 on
// the equator maps to +X, and longitude increases toward -Z.

/// Point on the unit sphere for `lat`, `lon` in degrees.
pub fn lat_lon_to_unit_vector(lat: f64, lon: f64) -> Vector3<f64> {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    Vector3::new(
        -phi.sin() * theta.cos(),
        phi.cos(),
        phi.sin() * theta.sin(),
    )
}

/// Inverse of [`lat_lon_to_unit_vector`]. Longitude lands in `(-180, 180]`;
/// at the poles it is reported as 0.
pub fn unit_vector_to_lat_lon(direction: &Vector3<f64>) -> (f64, f64) {
    let n = direction.norm();
    if n < f64::EPSILON {
        return (0.0, 0.0);
    }
    let d = direction / n;
    let lat = 90.0 - d.y.clamp(-1.0, 1.0).acos().to_degrees();
    if d.x.hypot(d.z) < 1e-12 {
        return (lat, 0.0);
    }
    let theta = d.z.atan2(-d.x).to_degrees();
    let mut lon = theta - 180.0;
    if lon <= -180.0 {
        lon += 360.0;
    }
    (lat, lon)
}

/// Angle between two directions, robust near 0 and pi.
pub fn central_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

pub fn great_circle_distance(a: &Vector3<f64>, b: &Vector3<f64>, radius: f64) -> f64 {
    central_angle(a, b) * radius
}
