//! Perlin noise terrain.

use noise::{NoiseFn, Perlin};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Meters per degree of latitude, close enough for noise sampling.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Terrain height as fractal Brownian motion over Perlin noise.
///
/// Coordinates are scaled to approximate meters before sampling, so
/// `wavelength_m` is the horizontal size of the largest hills.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    perlin: Perlin,
    base_elevation: f64,
    amplitude: f64,
    wavelength_m: f64,
    octaves: u32,
}

impl ElevationGenerator {
    /// Rolling hills around 300 m.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 300.0,
            amplitude: 60.0,
            wavelength_m: 3_000.0,
            octaves: 3,
        }
    }

    /// High mountains: ~1600 m base with several hundred meters of relief.
    pub fn alpine(seed: u32) -> Self {
        Self {
            base_elevation: 1_600.0,
            amplitude: 600.0,
            wavelength_m: 4_000.0,
            octaves: 5,
            ..Self::new(seed)
        }
    }

    /// Nearly flat lowland.
    pub fn lowland(seed: u32) -> Self {
        Self {
            base_elevation: 200.0,
            amplitude: 8.0,
            octaves: 2,
            ..Self::new(seed)
        }
    }

    pub fn with_base_elevation(mut self, meters: f64) -> Self {
        self.base_elevation = meters;
        self
    }

    pub fn with_amplitude(mut self, meters: f64) -> Self {
        self.amplitude = meters;
        self
    }

    pub fn base_elevation(&self) -> f64 {
        self.base_elevation
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Height at a coordinate, always within `base ± amplitude`.
    pub fn elevation_at(&self, lat: f64, lon: f64) -> f64 {
        let y = lat * METERS_PER_DEGREE / self.wavelength_m;
        let x = lon * METERS_PER_DEGREE * lat.to_radians().cos() / self.wavelength_m;

        let (mut total, mut weight, mut norm, mut scale) = (0.0, 1.0, 0.0, 1.0);
        for _ in 0..self.octaves {
            total += self.perlin.get([x * scale, y * scale]) * weight;
            norm += weight;
            weight *= 0.5;
            scale *= 2.0;
        }

        self.base_elevation + (total / norm).clamp(-1.0, 1.0) * self.amplitude
    }
}

/// Adds barometer/GPS elevation noise with the given standard deviation.
pub fn add_elevation_jitter(elevation: f64, rng: &mut impl Rng, std_dev: f64) -> f64 {
    match Normal::new(0.0, std_dev) {
        Ok(normal) => elevation + normal.sample(rng),
        Err(_) => elevation,
    }
}
