//! Great-circle distance on a spherical Earth.

use crate::models::GeoPoint;

/// Mean Earth radius used for all proximity checks, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Haversine distance between two points, in kilometers.
///
/// Coordinates are not range-checked. Identical points give exactly zero.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}
