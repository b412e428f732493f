//! Earth-geometry helpers.
//!
//! Two models coexist here. [`flat_earth_offset`] moves a point with the local
//! 111 km-per-degree approximation used by the motion generator, while
//! [`haversine_m`] measures great-circle distance for speed derivation. At
//! the metre-scale steps the generator takes they agree closely but not
//! exactly; neither is adjusted to match the other.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree of latitude in the flat-earth approximation.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Great-circle distance in metres between two points given in degrees.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = phi2 - phi1;
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Moves `(lat, lon)` by `step_m` metres along `bearing_rad` (clockwise from
/// north) using the local flat-earth approximation. Not valid near the poles.
pub fn flat_earth_offset(lat: f64, lon: f64, step_m: f64, bearing_rad: f64) -> (f64, f64) {
    let dlat = (step_m / METERS_PER_DEGREE) * bearing_rad.cos();
    let dlon = (step_m / (METERS_PER_DEGREE * lat.to_radians().cos())) * bearing_rad.sin();
    (lat + dlat, lon + dlon)
}
