//! Whole-track aggregation.
//!
//! [`summarize`] is the entry point: it runs the per-segment analysis and
//! folds the result into a [`TrackSummary`]. Every quantity that cannot be
//! computed from the data is reported as `None`, never as a stand-in zero.

use std::fmt;

use serde::Serialize;

use crate::config::Config;
use crate::models::Track;
use crate::segments::{self, SegmentMetric};

/// The segment with the largest |elevation change| / distance ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteepestSegment {
    /// Index into the segment sequence (segment `i` starts at point `i`).
    pub segment_index: usize,
    /// Latitude of the segment's starting point.
    pub latitude: f64,
    /// Longitude of the segment's starting point.
    pub longitude: f64,
    /// |Δelevation| / 3-D distance.
    pub grade: f64,
    /// `atan(grade)` in degrees. The denominator is the 3-D chord rather than
    /// the horizontal run, so this is a difficulty figure, not a true slope.
    pub angle_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub point_count: usize,
    pub segment_count: usize,
    /// Sum of segment distances in meters.
    pub total_distance: f64,
    /// Last timestamp minus first timestamp, in whole seconds. This is the
    /// duration used for [`average_velocity`](Self::average_velocity).
    pub total_elapsed_seconds: Option<i64>,
    /// Sum of the per-segment times that are known. Differs from
    /// `total_elapsed_seconds` when intermediate timestamps are missing or
    /// out of order; never used for velocity.
    pub summed_segment_seconds: Option<f64>,
    /// Meters per second; absent for an unknown or zero duration.
    pub average_velocity: Option<f64>,
    pub min_elevation: Option<f64>,
    pub max_elevation: Option<f64>,
    /// Sum of positive elevation deltas (≥ 0).
    pub ascent: f64,
    /// Sum of negative elevation deltas (≤ 0).
    pub descent: f64,
    /// Sum of all elevation deltas.
    pub net_elevation_change: f64,
    pub steepest: Option<SteepestSegment>,
    /// True only when the track has segments and every one of them has a
    /// known elapsed time.
    pub all_segments_have_time: bool,
}

/// Summarizes a track with the default [`Config`].
pub fn summarize(track: &Track) -> TrackSummary {
    summarize_with(track, &Config::default())
}

/// Summarizes a track, picking the sequential or parallel segment pass per `config`.
pub fn summarize_with(track: &Track, config: &Config) -> TrackSummary {
    let metrics = segments::analyze_with(track, config);
    summarize_segments(track, &metrics)
}

/// Folds precomputed segment metrics (as returned by [`segments::analyze`]
/// for the same track) into a summary.
pub fn summarize_segments(track: &Track, segments: &[SegmentMetric]) -> TrackSummary {
    let _span = tracing::debug_span!("summarize", points = track.len()).entered();
    debug_assert_eq!(segments.len(), track.len().saturating_sub(1));

    let total_distance: f64 = segments.iter().map(|s| s.distance).sum();

    let total_elapsed_seconds = endpoint_elapsed_seconds(track);
    if let Some(t) = total_elapsed_seconds {
        if t < 0 {
            tracing::warn!("Last timestamp precedes the first one by {}s", -t);
        }
    }

    let average_velocity = match total_elapsed_seconds {
        Some(0) => {
            tracing::warn!("Zero-duration track, average velocity is undefined");
            None
        }
        Some(t) => Some(total_distance / t as f64),
        None => None,
    };

    let (summed_segment_seconds, all_segments_have_time) = segment_timing(segments);

    let (min_elevation, max_elevation) = elevation_extremes(track);

    let mut ascent = 0.0;
    let mut descent = 0.0;
    let mut net_elevation_change = 0.0;
    for segment in segments {
        let dh = substituted_elevation_delta(segment);
        if dh > 0.0 {
            ascent += dh;
        } else if dh < 0.0 {
            descent += dh;
        }
        net_elevation_change += dh;
    }

    let steepest = steepest_segment(track, segments);

    TrackSummary {
        point_count: track.len(),
        segment_count: segments.len(),
        total_distance,
        total_elapsed_seconds,
        summed_segment_seconds,
        average_velocity,
        min_elevation,
        max_elevation,
        ascent,
        descent,
        net_elevation_change,
        steepest,
        all_segments_have_time,
    }
}

/// Elevation delta used for ascent/descent and grade.
///
/// A segment with an unknown endpoint counts as flat (zero delta) instead of
/// being dropped. This is a lossy stand-in kept apart from the sea-level
/// placement the projection uses for distance.
#[inline]
fn substituted_elevation_delta(segment: &SegmentMetric) -> f64 {
    segment.elevation_delta.unwrap_or(0.0)
}

fn endpoint_elapsed_seconds(track: &Track) -> Option<i64> {
    if track.len() < 2 {
        return None;
    }
    let start = track.first()?.timestamp()?;
    let end = track.last()?.timestamp()?;
    Some((end - start).whole_seconds())
}

fn segment_timing(segments: &[SegmentMetric]) -> (Option<f64>, bool) {
    let mut known = 0usize;
    let mut negative = 0usize;
    let mut sum = 0.0;

    for seconds in segments.iter().filter_map(|s| s.elapsed_seconds) {
        known += 1;
        if seconds < 0.0 {
            negative += 1;
        }
        sum += seconds;
    }

    if negative > 0 {
        tracing::warn!("{negative} segment(s) have negative elapsed time");
    }

    let summed = (known > 0).then_some(sum);
    let all_timed = !segments.is_empty() && known == segments.len();
    (summed, all_timed)
}

fn elevation_extremes(track: &Track) -> (Option<f64>, Option<f64>) {
    track
        .points()
        .iter()
        .filter_map(|p| p.elevation())
        .fold((None, None), |(min, max): (Option<f64>, Option<f64>), z| {
            (
                Some(min.map_or(z, |m| m.min(z))),
                Some(max.map_or(z, |m| m.max(z))),
            )
        })
}

fn steepest_segment(track: &Track, segments: &[SegmentMetric]) -> Option<SteepestSegment> {
    // Without a single known delta every grade would be a substituted zero;
    // there is nothing to locate.
    if !segments.iter().any(|s| s.elevation_delta.is_some()) {
        return None;
    }

    let mut best: Option<SteepestSegment> = None;

    for (index, (start, segment)) in track.points().iter().zip(segments).enumerate() {
        if segment.distance <= 0.0 {
            continue;
        }
        let grade = substituted_elevation_delta(segment).abs() / segment.distance;
        if best.is_none_or(|b| grade > b.grade) {
            best = Some(SteepestSegment {
                segment_index: index,
                latitude: start.latitude(),
                longitude: start.longitude(),
                grade,
                angle_degrees: grade.atan().to_degrees(),
            });
        }
    }

    best
}

/// Formats seconds as `{h}h {m}m {s}s`.
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let h = total / 3600;
    let m = (total / 60) % 60;
    let s = total % 60;
    format!("{sign}{h}h {m}m {s}s")
}

const NO_DATA: &str = "NO DATA";

fn meters(value: Option<f64>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| format!("{v:.3}m"))
}

impl TrackSummary {
    /// Human-readable multi-line report; absent values read `NO DATA`.
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Points: {}", self.point_count)?;
        writeln!(f, "Distance: {:.3}m", self.total_distance)?;
        writeln!(
            f,
            "Time: {}",
            self.total_elapsed_seconds
                .map_or_else(|| NO_DATA.to_string(), format_duration)
        )?;
        writeln!(
            f,
            "Average velocity: {}",
            self.average_velocity
                .map_or_else(|| NO_DATA.to_string(), |v| format!("{v:.3}m/s"))
        )?;
        writeln!(f, "Elevation change: {:.3}m", self.net_elevation_change)?;
        writeln!(f, "Ascent: {:.3}m", self.ascent)?;
        writeln!(f, "Descent: {:.3}m", self.descent)?;
        writeln!(f, "Min elevation: {}", meters(self.min_elevation))?;
        writeln!(f, "Max elevation: {}", meters(self.max_elevation))?;
        match &self.steepest {
            Some(s) => {
                writeln!(f, "Steepest segment: {:.4} {:.4}", s.latitude, s.longitude)?;
                writeln!(f, "Steepest angle: {:.2}°", s.angle_degrees)?;
            }
            None => {
                writeln!(f, "Steepest segment: {NO_DATA}")?;
                writeln!(f, "Steepest angle: {NO_DATA}")?;
            }
        }
        write!(
            f,
            "All segments timed: {}",
            if self.all_segments_have_time { "yes" } else { "no" }
        )
    }
}
