//! Analysis configuration.

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable read by [`Config::from_env`].
pub const PARALLEL_THRESHOLD_ENV: &str = "TRIP_STATS_PARALLEL_THRESHOLD";

const DEFAULT_PARALLEL_THRESHOLD: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracks with at least this many points get their per-segment metrics
    /// computed on the rayon pool. `0` disables the parallel path.
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Config {
    /// Reads overrides from the environment, keeping defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with variables resolved through `get`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = get(PARALLEL_THRESHOLD_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(threshold) => config.parallel_threshold = threshold,
                Err(e) => tracing::warn!(
                    "Ignoring {PARALLEL_THRESHOLD_ENV}={raw:?}: {e}; using {}",
                    config.parallel_threshold
                ),
            }
        }

        config
    }

    /// Whether a track of `point_count` points should take the parallel path.
    pub fn use_parallel(&self, point_count: usize) -> bool {
        self.parallel_threshold > 0 && point_count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let config = Config::default();
        assert_eq!(config.parallel_threshold, 50_000);
        assert!(!config.use_parallel(49_999));
        assert!(config.use_parallel(50_000));
    }

    #[test]
    fn test_zero_disables_parallel() {
        let config = Config {
            parallel_threshold: 0,
        };
        assert!(!config.use_parallel(0));
        assert!(!config.use_parallel(10_000_000));
    }

    #[test]
    fn test_deserialize() {
        let config: Config = serde_json::from_str(r#"{"parallel_threshold": 16}"#).unwrap();
        assert_eq!(config.parallel_threshold, 16);
        assert!(config.use_parallel(16));
    }

    fn lookup(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| {
            assert_eq!(key, PARALLEL_THRESHOLD_ENV);
            value.map(str::to_string)
        }
    }

    #[test]
    fn test_threshold_override() {
        assert_eq!(Config::from_lookup(lookup(Some("16"))).parallel_threshold, 16);
        assert_eq!(Config::from_lookup(lookup(Some(" 0 "))).parallel_threshold, 0);
    }

    #[test]
    fn test_unparsable_or_unset_threshold_keeps_default() {
        assert_eq!(Config::from_lookup(lookup(Some("abc"))), Config::default());
        assert_eq!(Config::from_lookup(lookup(Some("-5"))), Config::default());
        assert_eq!(Config::from_lookup(lookup(None)), Config::default());
    }
}
