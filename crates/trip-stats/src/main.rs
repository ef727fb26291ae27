use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trip_stats::{Config, ProfileSample, TrackSummary, analyze_with, load_gpx_file};

/// Print trip statistics for a GPX track.
#[derive(Debug, Parser)]
#[command(name = "trip-stats", version, about)]
struct Cli {
    /// GPX file to analyze.
    file: PathBuf,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Include the per-segment distance/speed/elevation series.
    #[arg(long)]
    profile: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: &'a TrackSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a [ProfileSample]>,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = Config::from_env();

    let track = load_gpx_file(&cli.file)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    let metrics = analyze_with(&track, &config);
    let summary = trip_stats::summarize_segments(&track, &metrics);
    let profile = cli
        .profile
        .then(|| trip_stats::profile(&track, &metrics));

    if cli.json {
        let output = JsonOutput {
            summary: &summary,
            profile: profile.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{summary}");
    if let Some(samples) = profile {
        println!();
        println!("distance_m,speed_mps,elevation_m");
        for sample in samples {
            println!(
                "{:.3},{},{}",
                sample.cumulative_distance,
                sample.speed.map(|v| format!("{v:.3}")).unwrap_or_default(),
                sample.elevation.map(|v| format!("{v:.3}")).unwrap_or_default(),
            );
        }
    }

    Ok(())
}
