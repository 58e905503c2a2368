//! Great-circle distance and driving-time estimates.

use crate::domain::model::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average driving speed used when the configuration does not set one.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 80.0;

/// Haversine distance between two points in kilometers.
pub fn distance_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Driving time in minutes for `distance_km` at `average_speed_kmh`.
pub fn travel_time_minutes(distance_km: f64, average_speed_kmh: f64) -> f64 {
    (distance_km / average_speed_kmh) * 60.0
}
