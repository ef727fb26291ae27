//! Track geometry sources.
//!
//! [`ProceduralGenerator`] random-walks over synthetic terrain and records the
//! walk the way a GPS device would, including the gaps real devices leave.

mod procedural;

pub use procedural::{ProceduralGenerator, TrackConfig};
