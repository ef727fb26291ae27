//! GPX → [`Track`] adapter.
//!
//! Wire-format parsing is delegated to the `gpx` crate; this module only
//! flattens the parsed document and normalizes what the core needs: every
//! track and track segment is concatenated in document order, elevations are
//! copied as-is and timestamps are moved to UTC with the offset dropped.

use std::io::{BufReader, Read};
use std::path::Path;

use gpx::Gpx;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::errors::ParseError;
use crate::models::{GeoPoint, Track};

/// Parses a GPX document from a reader.
pub fn parse_gpx<R: Read>(reader: R) -> Result<Track, ParseError> {
    let gpx: Gpx = gpx::read(BufReader::new(reader))?;
    track_from_gpx(&gpx)
}

/// Parses a GPX document held in memory.
pub fn parse_gpx_bytes(data: &[u8]) -> Result<Track, ParseError> {
    parse_gpx(data)
}

/// Opens and parses a GPX file.
pub fn load_gpx_file(path: impl AsRef<Path>) -> Result<Track, ParseError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let track = parse_gpx(file)?;
    tracing::info!("Loaded {} track points from {}", track.len(), path.display());
    Ok(track)
}

/// Flattens all track segments of a parsed document into one track.
/// Waypoints and routes are ignored.
pub fn track_from_gpx(gpx: &Gpx) -> Result<Track, ParseError> {
    let mut points = Vec::new();

    for track in &gpx.tracks {
        for segment in &track.segments {
            for waypoint in &segment.points {
                let index = points.len();
                let position = waypoint.point();

                let mut point = GeoPoint::new(position.y(), position.x())
                    .and_then(|p| p.with_optional_elevation(waypoint.elevation))
                    .map_err(|source| ParseError::InvalidPoint { index, source })?;

                if let Some(time) = waypoint.time {
                    point = point.with_timestamp(naive_utc(time.into()));
                }

                points.push(point);
            }
        }
    }

    if points.is_empty() {
        tracing::warn!("GPX document contains no track points");
    }

    Ok(Track::new(points))
}

/// Drops the offset after converting to UTC, so timestamps from mixed
/// timezones subtract correctly.
fn naive_utc(timestamp: OffsetDateTime) -> PrimitiveDateTime {
    let utc = timestamp.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="1.0" lon="1.0"><name>ignored</name></wpt>
  <trk>
    <name>Morning</name>
    <trkseg>
      <trkpt lat="50.0" lon="19.0"><ele>220.5</ele><time>2024-03-01T08:00:00Z</time></trkpt>
      <trkpt lat="50.001" lon="19.001"><time>2024-03-01T08:00:30Z</time></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="50.002" lon="19.002"><ele>230.0</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_flattens_segments_in_order() {
        let track = parse_gpx_bytes(TWO_SEGMENTS.as_bytes()).unwrap();
        assert_eq!(track.len(), 3);

        let p = track.points();
        assert_eq!(p[0].latitude(), 50.0);
        assert_eq!(p[0].longitude(), 19.0);
        assert_eq!(p[0].elevation(), Some(220.5));
        assert_eq!(p[1].elevation(), None);
        assert_eq!(p[2].elevation(), Some(230.0));

        assert_eq!(p[0].timestamp(), Some(datetime!(2024-03-01 08:00:00)));
        assert_eq!(p[1].timestamp(), Some(datetime!(2024-03-01 08:00:30)));
        assert_eq!(p[2].timestamp(), None);
    }

    #[test]
    fn test_naive_utc_strips_offset() {
        let local = datetime!(2024-03-01 10:00:00 +02:00);
        assert_eq!(naive_utc(local), datetime!(2024-03-01 08:00:00));
    }

    #[test]
    fn test_document_without_tracks_gives_empty_track() {
        let xml = r#"<?xml version="1.0"?><gpx version="1.1" creator="test"></gpx>"#;
        let track = parse_gpx_bytes(xml.as_bytes()).unwrap();
        assert!(track.is_empty());
    }

    #[test]
    fn test_garbage_is_a_gpx_error() {
        let err = parse_gpx_bytes(b"definitely not xml").unwrap_err();
        assert!(matches!(err, ParseError::Gpx(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_gpx_file("/nonexistent/path/track.gpx").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
