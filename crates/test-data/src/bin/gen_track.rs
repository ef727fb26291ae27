//! Writes a synthetic GPX track to stdout.
//!
//! Run with:
//! ```text
//! cargo run -p test-data --bin gen-track -- --distance 10000 --profile hiker > hike.gpx
//! ```

use clap::{Parser, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Hiker,
    Runner,
    Cyclist,
}

#[derive(Debug, Parser)]
#[command(name = "gen-track", about = "Generate a synthetic GPX track")]
struct Args {
    /// Path length in meters.
    #[arg(long, default_value_t = 5_000.0)]
    distance: f64,

    #[arg(long, value_enum, default_value_t = Profile::Hiker)]
    profile: Profile,

    /// Seed for both terrain and randomness.
    #[arg(long, default_value_t = 12345)]
    seed: u32,

    /// Probability of a sample without elevation.
    #[arg(long, default_value_t = 0.0)]
    elevation_dropout: f64,

    /// Probability of a sample without timestamp.
    #[arg(long, default_value_t = 0.0)]
    timestamp_dropout: f64,

    /// Track name written into the GPX metadata.
    #[arg(long, default_value = "Generated track")]
    name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(u64::from(args.seed));

    let profile: Box<dyn AthleteProfile> = match args.profile {
        Profile::Hiker => Box::new(HikerProfile::default()),
        Profile::Runner => Box::new(RunnerProfile::default()),
        Profile::Cyclist => Box::new(CyclistProfile::default()),
    };

    let track = ProceduralGenerator::new(args.seed)
        .with_distance(args.distance)
        .with_dropouts(args.elevation_dropout, args.timestamp_dropout)
        .generate(profile.as_ref(), &mut rng);

    tracing::info!("Generated {} points", track.len());
    print!("{}", generate_gpx(&track, &args.name));

    Ok(())
}
