//! Great-circle distance between two coordinates.

use carefinder_core::Coordinate;

/// Earth radius in miles, matching the catalog's city-scale ranking needs.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine great-circle distance in miles between two points.
///
/// Pure and total over valid degree ranges; accurate enough for city-scale
/// ranking, not surveying.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    c * EARTH_RADIUS_MILES
}
