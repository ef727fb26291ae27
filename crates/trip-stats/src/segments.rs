//! Per-segment metrics over consecutive point pairs.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::models::{GeoPoint, Track};
use crate::projection::project_point;

/// Metrics for the interval between `Track[i]` and `Track[i + 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentMetric {
    /// Chord distance in meters. Always present: an endpoint without elevation
    /// is placed at sea level for this computation.
    pub distance: f64,
    /// `next.elevation - current.elevation`, only when both are known.
    pub elevation_delta: Option<f64>,
    /// `next.timestamp - current.timestamp` in seconds, only when both are
    /// known. Negative values (out-of-order samples) are kept as-is.
    pub elapsed_seconds: Option<f64>,
}

impl SegmentMetric {
    /// Computes the metric for one adjacent pair.
    pub fn between(current: &GeoPoint, next: &GeoPoint) -> Self {
        let distance = project_point(current).distance_to(&project_point(next));

        let elevation_delta = match (current.elevation(), next.elevation()) {
            (Some(a), Some(b)) => Some(b - a),
            _ => None,
        };

        let elapsed_seconds = match (current.timestamp(), next.timestamp()) {
            (Some(a), Some(b)) => Some((b - a).as_seconds_f64()),
            _ => None,
        };

        Self {
            distance,
            elevation_delta,
            elapsed_seconds,
        }
    }
}

/// Walks the track pairwise. Returns `len - 1` metrics, or none for tracks
/// shorter than two points.
pub fn analyze(track: &Track) -> Vec<SegmentMetric> {
    track
        .points()
        .windows(2)
        .map(|pair| SegmentMetric::between(&pair[0], &pair[1]))
        .collect()
}

/// Same as [`analyze`], with the per-pair map spread over the rayon pool.
/// Output order and values are identical to the sequential version.
pub fn analyze_par(track: &Track) -> Vec<SegmentMetric> {
    track
        .points()
        .par_windows(2)
        .map(|pair| SegmentMetric::between(&pair[0], &pair[1]))
        .collect()
}

/// Runs [`analyze`] or [`analyze_par`] depending on the track length and
/// `config`.
pub fn analyze_with(track: &Track, config: &Config) -> Vec<SegmentMetric> {
    let _span = tracing::debug_span!("analyze", points = track.len()).entered();

    if config.use_parallel(track.len()) {
        tracing::debug!("computing segment metrics in parallel");
        analyze_par(track)
    } else {
        analyze(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, macros::datetime};

    fn pt(lat: f64, lon: f64, ele: Option<f64>) -> GeoPoint {
        GeoPoint::new(lat, lon)
            .and_then(|p| p.with_optional_elevation(ele))
            .unwrap()
    }

    #[test]
    fn test_short_tracks_have_no_segments() {
        assert!(analyze(&Track::default()).is_empty());
        assert!(analyze(&Track::new(vec![pt(10.0, 10.0, None)])).is_empty());
    }

    #[test]
    fn test_one_metric_per_pair() {
        let track: Track = (0..5).map(|i| pt(0.0, i as f64 * 0.001, Some(0.0))).collect();
        let metrics = analyze(&track);
        assert_eq!(metrics.len(), 4);
        for m in &metrics {
            assert!((m.distance - 111.32).abs() < 0.05);
            assert_eq!(m.elevation_delta, Some(0.0));
            assert_eq!(m.elapsed_seconds, None);
        }
    }

    #[test]
    fn test_missing_elevation_keeps_distance_but_drops_delta() {
        let track = Track::new(vec![pt(0.0, 0.0, Some(100.0)), pt(0.0, 0.001, None)]);
        let metrics = analyze(&track);
        assert_eq!(metrics[0].elevation_delta, None);
        // the unknown endpoint sits at sea level for the distance, so the
        // 100 m radial gap is part of the chord
        assert!(metrics[0].distance > 100.0);
    }

    #[test]
    fn test_elapsed_seconds() {
        let t0 = datetime!(2024-06-01 10:00:00);
        let a = pt(0.0, 0.0, None).with_timestamp(t0);
        let b = pt(0.0, 0.001, None).with_timestamp(t0 + Duration::milliseconds(2500));
        let c = pt(0.0, 0.002, None);

        let metrics = analyze(&Track::new(vec![a, b, c]));
        assert_eq!(metrics[0].elapsed_seconds, Some(2.5));
        assert_eq!(metrics[1].elapsed_seconds, None);
    }

    #[test]
    fn test_negative_elapsed_time_is_passed_through() {
        let t0 = datetime!(2024-06-01 10:00:00);
        let a = pt(0.0, 0.0, None).with_timestamp(t0);
        let b = pt(0.0, 0.001, None).with_timestamp(t0 - Duration::seconds(30));

        let metrics = analyze(&Track::new(vec![a, b]));
        assert_eq!(metrics[0].elapsed_seconds, Some(-30.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let t0 = datetime!(2024-06-01 10:00:00);
        let track: Track = (0..2000)
            .map(|i| {
                let ele = if i % 7 == 0 { None } else { Some((i as f64).sin() * 40.0) };
                let p = pt(45.0 + i as f64 * 1e-5, 7.0 + i as f64 * 2e-5, ele);
                if i % 11 == 0 {
                    p
                } else {
                    p.with_timestamp(t0 + Duration::seconds(i))
                }
            })
            .collect();

        assert_eq!(analyze(&track), analyze_par(&track));
    }

    #[test]
    fn test_analyze_with_follows_threshold() {
        let track: Track = (0..10).map(|i| pt(0.0, i as f64 * 0.001, Some(i as f64))).collect();
        let sequential = analyze_with(&track, &Config { parallel_threshold: 0 });
        let parallel = analyze_with(&track, &Config { parallel_threshold: 5 });
        assert_eq!(sequential, analyze(&track));
        assert_eq!(parallel, sequential);
    }
}
