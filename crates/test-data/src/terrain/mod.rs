//! Synthetic terrain for generated tracks.

mod elevation;

pub use elevation::{ElevationGenerator, add_elevation_jitter};
