//! Synthetic GPS tracks for exercising trip-stats.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rand::{SeedableRng, rngs::StdRng};
//! use test_data::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let track = ProceduralGenerator::new(42)
//!     .with_distance(5_000.0)
//!     .with_dropouts(0.05, 0.02)
//!     .generate(&HikerProfile::default(), &mut rng);
//! let gpx = generate_gpx(&track, "Morning hike");
//! ```

pub mod config;
pub mod gpx;
pub mod profiles;
pub mod sources;
pub mod terrain;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{BoundingBox, Region};
    pub use crate::gpx::generate_gpx;
    pub use crate::profiles::{
        AthleteProfile, CyclistProfile, HikerProfile, RunnerProfile, sample_variance,
        speed_at_grade,
    };
    pub use crate::sources::{ProceduralGenerator, TrackConfig};
    pub use crate::terrain::ElevationGenerator;
}
