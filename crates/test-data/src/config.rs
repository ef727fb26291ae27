//! Geographic areas for generated tracks.

use serde::{Deserialize, Serialize};

/// Latitude/longitude box, southwest corner first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// A uniformly random `(lat, lon)` inside the box. Degenerate (zero
    /// width or height) boxes are fine.
    pub fn random_point(&self, rng: &mut impl rand::Rng) -> (f64, f64) {
        (
            rng.gen_range(self.min_lat..=self.max_lat),
            rng.gen_range(self.min_lon..=self.max_lon),
        )
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Preset areas.
#[derive(Debug, Clone, Copy)]
pub struct Region;

impl Region {
    /// Tatra mountains: steep alpine terrain.
    pub const TATRAS: BoundingBox = BoundingBox::new(49.15, 19.75, 49.30, 20.25);

    /// Straddles the equator and the prime meridian.
    pub const NULL_ISLAND: BoundingBox = BoundingBox::new(-0.05, -0.05, 0.05, 0.05);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_random_point_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (lat, lon) = Region::TATRAS.random_point(&mut rng);
            assert!(Region::TATRAS.contains(lat, lon));
        }
    }

    #[test]
    fn test_center() {
        let (lat, lon) = Region::NULL_ISLAND.center();
        assert!(lat.abs() < 1e-12);
        assert!(lon.abs() < 1e-12);
    }

    #[test]
    fn test_random_point_in_degenerate_box() {
        let mut rng = StdRng::seed_from_u64(3);
        let line = BoundingBox::new(49.2, 19.8, 49.2, 20.0);
        let (lat, lon) = line.random_point(&mut rng);
        assert_eq!(lat, 49.2);
        assert!(line.contains(lat, lon));

        let spot = BoundingBox::new(1.0, 2.0, 1.0, 2.0);
        assert_eq!(spot.random_point(&mut rng), (1.0, 2.0));
    }
}
