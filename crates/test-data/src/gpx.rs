//! GPX 1.1 writer for generated tracks.

use time::format_description::well_known::Rfc3339;
use trip_stats::Track;

/// Renders a track as a single-segment GPX 1.1 document.
///
/// Absent elevations and timestamps are omitted from the corresponding
/// `<trkpt>`; timestamps are written as UTC.
pub fn generate_gpx(track: &Track, name: &str) -> String {
    let mut gpx = String::new();
    let name = escape_xml(name);

    gpx.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    gpx.push_str(concat!(
        r#"<gpx version="1.1" creator="trip-stats-test-data""#,
        r#" xmlns="http://www.topografix.com/GPX/1/1">"#,
        "\n"
    ));
    gpx.push_str(&format!("  <metadata>\n    <name>{name}</name>\n  </metadata>\n"));
    gpx.push_str(&format!("  <trk>\n    <name>{name}</name>\n    <trkseg>\n"));

    for point in track.points() {
        gpx.push_str(&format!(
            r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
            point.latitude(),
            point.longitude()
        ));
        if let Some(ele) = point.elevation() {
            gpx.push_str(&format!("<ele>{ele:.2}</ele>"));
        }
        if let Some(formatted) = point
            .timestamp()
            .and_then(|ts| ts.assume_utc().format(&Rfc3339).ok())
        {
            gpx.push_str(&format!("<time>{formatted}</time>"));
        }
        gpx.push_str("</trkpt>\n");
    }

    gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
    gpx
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use trip_stats::GeoPoint;

    #[test]
    fn test_points_and_optional_fields() {
        let track = Track::new(vec![
            GeoPoint::new(49.2, 19.95)
                .unwrap()
                .with_elevation(1650.0)
                .unwrap()
                .with_timestamp(datetime!(2024-06-01 07:00:00)),
            GeoPoint::new(49.201, 19.951).unwrap(),
        ]);
        let gpx = generate_gpx(&track, "Test");

        assert!(gpx.contains(r#"version="1.1""#));
        assert!(gpx.contains(r#"lat="49.2000000" lon="19.9500000""#));
        assert!(gpx.contains("<ele>1650.00</ele>"));
        assert!(gpx.contains("<time>2024-06-01T07:00:00Z</time>"));
        assert_eq!(gpx.matches("<trkpt").count(), 2);
        assert_eq!(gpx.matches("<ele>").count(), 1);
        assert_eq!(gpx.matches("<time>").count(), 1);
    }

    #[test]
    fn test_name_is_escaped() {
        let gpx = generate_gpx(&Track::default(), "Up & <Down>");
        assert!(gpx.contains("Up &amp; &lt;Down&gt;"));
    }

    #[test]
    fn test_output_parses_back() {
        let track = Track::new(vec![
            GeoPoint::new(0.0, 0.0).unwrap().with_elevation(5.0).unwrap(),
            GeoPoint::new(0.0, 0.001).unwrap(),
        ]);
        let parsed = trip_stats::parse_gpx_bytes(generate_gpx(&track, "t").as_bytes()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.points()[0].elevation(), Some(5.0));
        assert_eq!(parsed.points()[1].elevation(), None);
    }
}
