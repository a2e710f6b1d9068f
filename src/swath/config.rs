use chrono::Duration;
use serde::Deserialize;

use crate::config::deserialize_duration;
use crate::geometry::intersect::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::swath::error::SwathConfigError;

pub const DEFAULT_SIDE_ANGLE_DEG: f64 = 20.0;
pub const DEFAULT_SAMPLE_COUNT: usize = 288;
pub const DEFAULT_CADENCE_SECONDS: i64 = 300;
pub const DEFAULT_FALLBACK_OFFSET_DEG: f64 = 1.0;
/// Upper bound on samples per satellite
pub const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwathConfig {
    pub side_angle_deg: f64,
    pub sample_count: usize,
    #[serde(deserialize_with = "deserialize_duration")]
    pub cadence: Duration,
    /// Longitude shift of substituted swath edges
    pub fallback_offset_deg: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for SwathConfig {
    fn default() -> Self {
        Self {
            side_angle_deg: DEFAULT_SIDE_ANGLE_DEG,
            sample_count: DEFAULT_SAMPLE_COUNT,
            cadence: Duration::seconds(DEFAULT_CADENCE_SECONDS),
            fallback_offset_deg: DEFAULT_FALLBACK_OFFSET_DEG,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SwathConfig {
    /// Rejects settings the generator cannot honour
    pub fn validate(&self) -> Result<(), SwathConfigError> {
        if !self.side_angle_deg.is_finite() {
            return Err(SwathConfigError::NonFiniteSideAngle(self.side_angle_deg));
        }
        if !self.fallback_offset_deg.is_finite() {
            return Err(SwathConfigError::NonFiniteOffset(self.fallback_offset_deg));
        }
        if self.cadence <= Duration::zero() {
            return Err(SwathConfigError::NonPositiveCadence);
        }
        if self.sample_count > MAX_SAMPLES {
            return Err(SwathConfigError::TooManySamples {
                count: self.sample_count,
                max: MAX_SAMPLES,
            });
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SwathConfigError::InvalidTolerance(self.tolerance));
        }
        self.horizon().ok_or(SwathConfigError::EpochOutOfRange)?;
        Ok(())
    }

    /// Time covered by the sample grid, `None` if it overflows
    pub fn horizon(&self) -> Option<Duration> {
        self.offset(self.sample_count)
    }

    /// `index * cadence`, `None` if it overflows
    pub fn offset(&self, index: usize) -> Option<Duration> {
        self.cadence.checked_mul(i32::try_from(index).ok()?)
    }

    /// Sample count needed to cover `duration` at the configured cadence
    pub fn samples_for(&self, duration: Duration) -> usize {
        let cadence_ms = self.cadence.num_milliseconds();
        if cadence_ms <= 0 {
            return 0;
        }
        (duration.num_milliseconds().max(0) / cadence_ms) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_one_day_in_five_minute_steps() {
        let config = SwathConfig::default();
        assert_eq!(config.sample_count, 288);
        assert_eq!(config.cadence, Duration::minutes(5));
        assert_eq!(config.horizon(), Some(Duration::hours(24)));
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.side_angle_deg, 20.0);
    }

    #[test]
    fn sample_count_from_duration() {
        let config = SwathConfig::default();
        assert_eq!(config.samples_for(Duration::hours(24)), 288);
        assert_eq!(config.samples_for(Duration::hours(6)), 72);
        assert_eq!(config.samples_for(Duration::seconds(-5)), 0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: SwathConfig =
            serde_yaml::from_str("side_angle_deg: 30\ncadence: 1m\n").unwrap();
        assert_eq!(config.side_angle_deg, 30.0);
        assert_eq!(config.cadence, Duration::minutes(1));
        assert_eq!(config.sample_count, DEFAULT_SAMPLE_COUNT);
    }

    #[test]
    fn out_of_range_settings_are_rejected() {
        let defaults = SwathConfig::default();
        let huge_cadence = SwathConfig {
            cadence: Duration::milliseconds(i64::MAX / 100),
            ..defaults.clone()
        };
        assert_eq!(huge_cadence.horizon(), None);
        assert_eq!(
            huge_cadence.validate(),
            Err(SwathConfigError::EpochOutOfRange)
        );

        let cases = [
            (
                SwathConfig {
                    cadence: Duration::zero(),
                    ..defaults.clone()
                },
                SwathConfigError::NonPositiveCadence,
            ),
            (
                SwathConfig {
                    sample_count: MAX_SAMPLES + 1,
                    ..defaults.clone()
                },
                SwathConfigError::TooManySamples {
                    count: MAX_SAMPLES + 1,
                    max: MAX_SAMPLES,
                },
            ),
            (
                SwathConfig {
                    side_angle_deg: f64::INFINITY,
                    ..defaults.clone()
                },
                SwathConfigError::NonFiniteSideAngle(f64::INFINITY),
            ),
            (
                SwathConfig {
                    tolerance: 0.0,
                    ..defaults.clone()
                },
                SwathConfigError::InvalidTolerance(0.0),
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn offsets_beyond_i32_indices_overflow_cleanly() {
        let config = SwathConfig::default();
        assert_eq!(config.offset(3), Some(Duration::minutes(15)));
        assert_eq!(config.offset(i32::MAX as usize + 1), None);
    }
}
