use thiserror::Error;

/// Rejection of a coordinate or elevation at `GeoPoint` construction.
///
/// Non-finite latitude/longitude values fall into the range variants, since
/// NaN and infinities are never inside the valid interval.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PointError {
    #[error("Latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),

    #[error("Elevation is not a finite number: {0}")]
    NonFiniteElevation(f64),
}

/// Failure while turning a track file into a [`Track`](crate::models::Track).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse GPX file: {0}")]
    Gpx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid track point #{index}: {source}")]
    InvalidPoint {
        index: usize,
        #[source]
        source: PointError,
    },
}

impl From<gpx::errors::GpxError> for ParseError {
    fn from(e: gpx::errors::GpxError) -> Self {
        ParseError::Gpx(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_error_messages() {
        assert_eq!(
            PointError::LatitudeOutOfRange(91.0).to_string(),
            "Latitude out of range [-90, 90]: 91"
        );
        assert_eq!(
            PointError::LongitudeOutOfRange(-181.5).to_string(),
            "Longitude out of range [-180, 180]: -181.5"
        );
    }

    #[test]
    fn test_invalid_point_carries_index() {
        let err = ParseError::InvalidPoint {
            index: 7,
            source: PointError::LatitudeOutOfRange(100.0),
        };
        let msg = err.to_string();
        assert!(msg.contains("#7"));
        assert!(msg.contains("100"));
    }
}
