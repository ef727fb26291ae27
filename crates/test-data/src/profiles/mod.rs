//! Movement profiles: how fast a generated athlete travels on a given grade.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Slowest speed any profile returns, in m/s. Keeps segment times finite.
pub const MIN_SPEED_MPS: f64 = 0.5;

pub trait AthleteProfile: Send + Sync {
    /// Speed on flat ground in m/s.
    fn base_speed_mps(&self) -> f64;

    /// Multiplier applied to the base speed for a grade (rise / run, so
    /// 0.05 is a 5% climb and -0.05 a 5% descent).
    fn grade_factor(&self, grade: f64) -> f64;

    /// Day-to-day variation as a coefficient of variation.
    fn variance(&self) -> f64;
}

/// Speed on `grade` scaled by a sampled `variance_factor`.
pub fn speed_at_grade(profile: &dyn AthleteProfile, grade: f64, variance_factor: f64) -> f64 {
    (profile.base_speed_mps() * profile.grade_factor(grade) * variance_factor).max(MIN_SPEED_MPS)
}

/// A multiplier around 1.0 drawn from the profile's variance, clamped to [0.7, 1.4].
pub fn sample_variance(profile: &dyn AthleteProfile, rng: &mut impl Rng) -> f64 {
    match Normal::new(1.0, profile.variance()) {
        Ok(normal) if profile.variance() > 0.0 => normal.sample(rng).clamp(0.7, 1.4),
        _ => 1.0,
    }
}

/// Piecewise-linear grade response shared by the built-in profiles.
#[derive(Debug, Clone, Copy)]
struct GradeResponse {
    uphill_loss: f64,
    downhill_gain: f64,
    floor: f64,
    ceiling: f64,
}

impl GradeResponse {
    fn factor(&self, grade: f64) -> f64 {
        if grade >= 0.0 {
            (1.0 - grade * self.uphill_loss).max(self.floor)
        } else {
            (1.0 - grade * self.downhill_gain).min(self.ceiling)
        }
    }
}

macro_rules! profile {
    ($(#[$doc:meta])* $name:ident, $speed:expr, $variance:expr, $response:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base_speed: f64,
            variance: f64,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    base_speed: $speed,
                    variance: $variance,
                }
            }
        }

        impl $name {
            /// Same profile with a different flat-ground speed in km/h.
            pub fn with_speed_kmh(speed_kmh: f64) -> Self {
                Self {
                    base_speed: speed_kmh / 3.6,
                    ..Default::default()
                }
            }
        }

        impl AthleteProfile for $name {
            fn base_speed_mps(&self) -> f64 {
                self.base_speed
            }

            fn grade_factor(&self, grade: f64) -> f64 {
                const RESPONSE: GradeResponse = $response;
                RESPONSE.factor(grade)
            }

            fn variance(&self) -> f64 {
                self.variance
            }
        }
    };
}

profile!(
    /// ~5.4 km/h walker; climbs cost little, descents are taken carefully.
    HikerProfile,
    1.5,
    0.12,
    GradeResponse { uphill_loss: 12.0, downhill_gain: 5.0, floor: 0.25, ceiling: 1.3 }
);

profile!(
    /// ~12.6 km/h (4:45/km) runner.
    RunnerProfile,
    3.5,
    0.08,
    GradeResponse { uphill_loss: 15.0, downhill_gain: 8.0, floor: 0.2, ceiling: 1.5 }
);

profile!(
    /// ~28.8 km/h road cyclist; grade matters a lot both ways.
    CyclistProfile,
    8.0,
    0.10,
    GradeResponse { uphill_loss: 25.0, downhill_gain: 15.0, floor: 0.15, ceiling: 2.0 }
);
