//! Geographic → Earth-centered Cartesian projection.
//!
//! This is a spherical approximation, not a geodetic library: the Earth is a
//! sphere of radius [`EARTH_RADIUS_M`] and elevation simply extends the radius.
//! It is only meant for straight-line distances between nearby track points.

use serde::Serialize;

use crate::models::GeoPoint;

/// Sphere radius in meters (the WGS84 equatorial radius).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A track point in the Earth-centered Cartesian frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// False when the source elevation was absent and sea level was used
    /// to place the point.
    pub elevation_known: bool,
}

impl ProjectedPoint {
    /// Straight-line (chord) distance in meters.
    #[inline]
    pub fn distance_to(&self, other: &ProjectedPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

/// Projects degrees + optional elevation onto the sphere.
///
/// Absent elevation is placed at sea level for the radius only; the result
/// records `elevation_known = false` so "sea level" and "unknown" stay apart.
pub fn project(latitude: f64, longitude: f64, elevation: Option<f64>) -> ProjectedPoint {
    let lat_rad = latitude.to_radians();
    let lon_rad = longitude.to_radians();

    let radius = elevation.unwrap_or(0.0) + EARTH_RADIUS_M;

    ProjectedPoint {
        x: radius * lat_rad.cos() * lon_rad.sin(),
        y: radius * lat_rad.sin(),
        z: radius * lat_rad.cos() * lon_rad.cos(),
        elevation_known: elevation.is_some(),
    }
}

/// Convenience wrapper over [`project`] for a validated point.
#[inline]
pub fn project_point(point: &GeoPoint) -> ProjectedPoint {
    project(point.latitude(), point.longitude(), point.elevation())
}
