//! Planar point-to-route distances over latitude/longitude.
//!
//! Degrees are treated as a flat grid and converted to meters with a single
//! factor. Good enough for the tens-of-meters scale of off-route detection,
//! not geodesically exact (longitude shrinks away from the equator).

use crate::location::Location;

/// Approximate meters per degree of arc.
pub const METERS_PER_DEGREE: f64 = 111_139.0;

/// Straight-line distance in meters between two positions.
pub fn planar_distance(a: &Location, b: &Location) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    (dlat * dlat + dlon * dlon).sqrt() * METERS_PER_DEGREE
}

/// Distance in meters from `point` to the closest point of segment `a→b`.
///
/// A zero-length segment degenerates to the distance from `point` to `a`.
pub fn distance_to_segment(point: &Location, a: &Location, b: &Location) -> f64 {
    let ab_lat = b.latitude - a.latitude;
    let ab_lon = b.longitude - a.longitude;
    let length_sq = ab_lat * ab_lat + ab_lon * ab_lon;

    if length_sq == 0.0 {
        return planar_distance(point, a);
    }

    let ap_lat = point.latitude - a.latitude;
    let ap_lon = point.longitude - a.longitude;
    let t = ((ap_lat * ab_lat + ap_lon * ab_lon) / length_sq).clamp(0.0, 1.0);

    let closest_lat = a.latitude + ab_lat * t;
    let closest_lon = a.longitude + ab_lon * t;

    let dlat = point.latitude - closest_lat;
    let dlon = point.longitude - closest_lon;
    (dlat * dlat + dlon * dlon).sqrt() * METERS_PER_DEGREE
}

/// Minimum segment distance over consecutive vertex pairs.
///
/// Returns `None` when fewer than two vertices are given.
pub fn distance_to_polyline(point: &Location, vertices: &[Location]) -> Option<f64> {
    if vertices.len() < 2 {
        return None;
    }

    vertices
        .windows(2)
        .map(|pair| distance_to_segment(point, &pair[0], &pair[1]))
        .reduce(f64::min)
}
