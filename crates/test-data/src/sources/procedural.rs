//! Procedural track generation.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use time::{Duration, PrimitiveDateTime, macros::datetime};
use trip_stats::{GeoPoint, Track, projection::project};

use crate::config::{BoundingBox, Region};
use crate::profiles::{self, AthleteProfile};
use crate::terrain::{ElevationGenerator, add_elevation_jitter};

/// Knobs for [`ProceduralGenerator`].
#[derive(Debug, Clone)]
pub struct TrackConfig {
    /// Approximate path length in meters.
    pub distance_meters: f64,
    /// Start `(lat, lon)`; random inside `bounds` when unset.
    pub start_point: Option<(f64, f64)>,
    pub bounds: BoundingBox,
    /// Recording start time of the first point.
    pub start_time: PrimitiveDateTime,
    /// Mean spacing between consecutive samples in meters.
    pub point_spacing_m: f64,
    /// Horizontal position noise (std dev, meters).
    pub gps_jitter_m: f64,
    /// Elevation noise (std dev, meters).
    pub elevation_jitter_m: f64,
    /// Chance that a sample is followed by a stop.
    pub pause_probability: f64,
    /// Stop duration range in seconds.
    pub pause_duration_range: (f64, f64),
    /// Chance that a sample is recorded without elevation.
    pub elevation_dropout: f64,
    /// Chance that a sample is recorded without a timestamp.
    pub timestamp_dropout: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            distance_meters: 5_000.0,
            start_point: None,
            bounds: Region::TATRAS,
            start_time: datetime!(2024-06-01 07:00:00),
            point_spacing_m: 10.0,
            gps_jitter_m: 2.0,
            elevation_jitter_m: 3.0,
            pause_probability: 0.01,
            pause_duration_range: (20.0, 120.0),
            elevation_dropout: 0.0,
            timestamp_dropout: 0.0,
        }
    }
}

/// Random-walk tracks over synthetic terrain, timed by an athlete profile.
#[derive(Debug, Clone)]
pub struct ProceduralGenerator {
    config: TrackConfig,
    terrain: ElevationGenerator,
}

impl ProceduralGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            config: TrackConfig::default(),
            terrain: ElevationGenerator::alpine(seed),
        }
    }

    pub fn with_config(mut self, config: TrackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_distance(mut self, meters: f64) -> Self {
        self.config.distance_meters = meters;
        self
    }

    pub fn with_start(mut self, lat: f64, lon: f64) -> Self {
        self.config.start_point = Some((lat, lon));
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.config.bounds = bounds;
        self
    }

    pub fn with_terrain(mut self, terrain: ElevationGenerator) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_point_spacing(mut self, meters: f64) -> Self {
        self.config.point_spacing_m = meters;
        self
    }

    pub fn with_jitter(mut self, position_m: f64, elevation_m: f64) -> Self {
        self.config.gps_jitter_m = position_m;
        self.config.elevation_jitter_m = elevation_m;
        self
    }

    pub fn with_pauses(mut self, probability: f64, min_sec: f64, max_sec: f64) -> Self {
        self.config.pause_probability = probability;
        self.config.pause_duration_range = (min_sec, max_sec);
        self
    }

    /// Probabilities of losing the elevation or the timestamp of a sample.
    pub fn with_dropouts(mut self, elevation: f64, timestamp: f64) -> Self {
        self.config.elevation_dropout = elevation;
        self.config.timestamp_dropout = timestamp;
        self
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Generates a complete track.
    pub fn generate(&self, profile: &dyn AthleteProfile, rng: &mut impl Rng) -> Track {
        let start = self
            .config
            .start_point
            .unwrap_or_else(|| self.config.bounds.random_point(rng));

        let path = self.generate_path(start, rng);
        let track = self.record(&path, profile, rng);
        tracing::debug!(points = track.len(), "generated procedural track");
        track
    }

    /// Random walk with heading momentum, reflected at the bounds.
    pub fn generate_path(&self, start: (f64, f64), rng: &mut impl Rng) -> Vec<(f64, f64)> {
        let mut path = vec![start];
        let (mut lat, mut lon) = start;
        let mut heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let mut walked = 0.0;

        while walked < self.config.distance_meters {
            heading += rng.gen_range(-0.3..0.3);
            let step = self.config.point_spacing_m * rng.gen_range(0.8..1.2);

            lat += step * heading.cos() / 111_320.0;
            lon += step * heading.sin() / (111_320.0 * lat.to_radians().cos());

            let b = &self.config.bounds;
            if lat < b.min_lat || lat > b.max_lat {
                heading = std::f64::consts::PI - heading;
                lat = lat.clamp(b.min_lat, b.max_lat);
            }
            if lon < b.min_lon || lon > b.max_lon {
                heading = -heading;
                lon = lon.clamp(b.min_lon, b.max_lon);
            }

            path.push((lat, lon));
            walked += step;
        }

        path
    }

    /// Turns a path into recorded samples: terrain height plus noise,
    /// profile-driven timing, pauses and dropouts.
    fn record(
        &self,
        path: &[(f64, f64)],
        profile: &dyn AthleteProfile,
        rng: &mut impl Rng,
    ) -> Track {
        let position_noise = Normal::new(0.0, self.config.gps_jitter_m.max(0.0) / 111_320.0).ok();
        let mut clock = self.config.start_time;
        let mut points = Vec::with_capacity(path.len());

        for (i, &(lat, lon)) in path.iter().enumerate() {
            let terrain_height = self.terrain.elevation_at(lat, lon);

            if i > 0 {
                let (prev_lat, prev_lon) = path[i - 1];
                let prev_height = self.terrain.elevation_at(prev_lat, prev_lon);
                let run = project(prev_lat, prev_lon, None).distance_to(&project(lat, lon, None));
                let grade = if run > 0.0 {
                    (terrain_height - prev_height) / run
                } else {
                    0.0
                };

                let variance = profiles::sample_variance(profile, rng);
                let speed = profiles::speed_at_grade(profile, grade, variance);
                let pause = if rng.gen_bool(self.config.pause_probability.clamp(0.0, 1.0)) {
                    let (lo, hi) = self.config.pause_duration_range;
                    if hi > lo { rng.gen_range(lo..hi) } else { lo }
                } else {
                    0.0
                };
                clock += Duration::seconds_f64(run / speed + pause);
            }

            let (jitter_lat, jitter_lon) = match &position_noise {
                Some(noise) => (noise.sample(rng), noise.sample(rng)),
                None => (0.0, 0.0),
            };
            let lat = (lat + jitter_lat).clamp(-90.0, 90.0);
            let lon = (lon + jitter_lon).clamp(-180.0, 180.0);

            let Ok(mut point) = GeoPoint::new(lat, lon) else {
                continue;
            };

            if !rng.gen_bool(self.config.elevation_dropout.clamp(0.0, 1.0)) {
                let height =
                    add_elevation_jitter(terrain_height, rng, self.config.elevation_jitter_m);
                if let Ok(with_height) = point.with_elevation(height) {
                    point = with_height;
                }
            }
            if !rng.gen_bool(self.config.timestamp_dropout.clamp(0.0, 1.0)) {
                point = point.with_timestamp(clock);
            }

            points.push(point);
        }

        Track::new(points)
    }
}
