//! Trip statistics for recorded GPS tracks.
//!
//! The pipeline runs one way: points → projected coordinates → per-segment
//! metrics → aggregate summary. Every stage is a pure function over immutable
//! input, so tracks can be summarized concurrently from any number of threads.
//!
//! ```rust,ignore
//! use trip_stats::{GeoPoint, Track, summarize};
//!
//! let track = Track::new(vec![
//!     GeoPoint::new(0.0, 0.0)?.with_elevation(0.0)?,
//!     GeoPoint::new(0.0, 0.001)?.with_elevation(10.0)?,
//! ]);
//! let summary = summarize(&track);
//! println!("{summary}");
//! ```

pub mod config;
pub mod errors;
pub mod file_parsers;
pub mod models;
pub mod profile;
pub mod projection;
pub mod segments;
pub mod summary;

pub use config::Config;
pub use errors::{ParseError, PointError};
pub use file_parsers::{load_gpx_file, parse_gpx, parse_gpx_bytes};
pub use models::{GeoPoint, Track};
pub use profile::{ProfileSample, profile};
pub use projection::{EARTH_RADIUS_M, ProjectedPoint, project};
pub use segments::{SegmentMetric, analyze, analyze_par, analyze_with};
pub use summary::{SteepestSegment, TrackSummary, summarize, summarize_segments, summarize_with};
