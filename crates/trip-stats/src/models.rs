//! Track value types.
//!
//! A [`GeoPoint`] is validated once at construction and immutable afterwards;
//! a [`Track`] is the ordered sequence the analysis pipeline consumes.

use geo::{BoundingRect, Centroid, MultiPoint, Point, Rect};
use serde::Serialize;
use time::PrimitiveDateTime;

use crate::errors::PointError;

/// One recorded GPS sample.
///
/// Elevation and timestamp are optional; absence means "unknown" and is never
/// the same thing as zero meters or the epoch. Timestamps carry no offset: the
/// producer normalizes timezone information away before building the point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
    elevation: Option<f64>,
    timestamp: Option<PrimitiveDateTime>,
}

impl GeoPoint {
    /// Creates a point without elevation or timestamp.
    ///
    /// # Errors
    /// Returns [`PointError`] if latitude is outside [-90, 90] or longitude is
    /// outside [-180, 180] (NaN and infinities included).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PointError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PointError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PointError::LongitudeOutOfRange(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
            elevation: None,
            timestamp: None,
        })
    }

    /// Sets the elevation in meters.
    pub fn with_elevation(mut self, elevation: f64) -> Result<Self, PointError> {
        if !elevation.is_finite() {
            return Err(PointError::NonFiniteElevation(elevation));
        }
        self.elevation = Some(elevation);
        Ok(self)
    }

    /// Sets the elevation from an optional reading, keeping absence as absence.
    pub fn with_optional_elevation(self, elevation: Option<f64>) -> Result<Self, PointError> {
        match elevation {
            Some(ele) => self.with_elevation(ele),
            None => Ok(self),
        }
    }

    pub fn with_timestamp(mut self, timestamp: PrimitiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    #[inline]
    pub fn timestamp(&self) -> Option<PrimitiveDateTime> {
        self.timestamp
    }

    /// The point as a `geo` point (x = longitude, y = latitude).
    pub fn to_geo(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Ordered sequence of points in recording order.
///
/// Multi-track and multi-segment files are flattened into one `Track` by the
/// producer; the analysis never sees any finer topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Track {
    points: Vec<GeoPoint>,
}

impl Track {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    /// True if at least one point has a known elevation.
    pub fn has_elevation(&self) -> bool {
        self.points.iter().any(|p| p.elevation.is_some())
    }

    /// True if at least one point has a timestamp.
    pub fn has_timestamps(&self) -> bool {
        self.points.iter().any(|p| p.timestamp.is_some())
    }

    fn to_multi_point(&self) -> MultiPoint<f64> {
        self.points.iter().map(GeoPoint::to_geo).collect()
    }

    /// Mean position of all points as `(latitude, longitude)`.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        self.to_multi_point().centroid().map(|c| (c.y(), c.x()))
    }

    /// Bounding rectangle in degrees (x = longitude, y = latitude).
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.to_multi_point().bounding_rect()
    }

    /// Thins the track to roughly `max_points` by keeping every k-th point,
    /// where k = len / max_points. Returns every point when the track is
    /// already small enough (or when `max_points` is zero).
    pub fn decimate(&self, max_points: usize) -> Vec<&GeoPoint> {
        if max_points == 0 || self.points.len() <= max_points {
            return self.points.iter().collect();
        }
        let step = self.points.len() / max_points;
        self.points.iter().step_by(step).collect()
    }
}

impl From<Vec<GeoPoint>> for Track {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint> for Track {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
