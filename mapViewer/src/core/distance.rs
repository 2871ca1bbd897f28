use crate::config::constants::EARTH_RADIUS_KM;
use crate::models::poi::Coordinate;

/// Great-circle distance in kilometres on a spherical Earth (haversine).
///
/// Total: never panics and never returns a negative value for finite input.
/// Out-of-range coordinates give a meaningless but finite result; NaN input
/// yields NaN.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let h = sin_lat * sin_lat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * sin_lon * sin_lon;

    // Rounding (or out-of-range input) can push h outside [0, 1]
    let arg = h.clamp(0.0, 1.0).sqrt();
    2.0 * EARTH_RADIUS_KM * arg.asin()
}
