//! Distance-indexed series for speed and elevation charts.

use serde::Serialize;

use crate::models::Track;
use crate::segments::SegmentMetric;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileSample {
    /// Distance from the track start to the end of this segment, in meters.
    pub cumulative_distance: f64,
    /// Segment speed in m/s; absent when the segment time is unknown or not positive.
    pub speed: Option<f64>,
    /// Elevation of the segment's starting point.
    pub elevation: Option<f64>,
}

/// Builds one sample per segment from metrics computed for `track`.
pub fn profile(track: &Track, segments: &[SegmentMetric]) -> Vec<ProfileSample> {
    let mut cumulative_distance = 0.0;

    track
        .points()
        .iter()
        .zip(segments)
        .map(|(start, segment)| {
            cumulative_distance += segment.distance;
            let speed = segment
                .elapsed_seconds
                .filter(|t| *t > 0.0)
                .map(|t| segment.distance / t);

            ProfileSample {
                cumulative_distance,
                speed,
                elevation: start.elevation(),
            }
        })
        .collect()
}
