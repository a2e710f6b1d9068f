use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::propagation::{Propagator, SatelliteTle};
use crate::swath::config::SwathConfig;
use crate::swath::error::SwathConfigError;
use crate::swath::fallback::FallbackPolicy;
use crate::swath::sample::{propagate_sample, SolverSettings};
use crate::swath::types::{SampleResult, SatelliteOrbitResult};

/// Ground tracks and swath edges for a list of satellites over a fixed
/// time grid.
#[derive(Debug, Clone)]
pub struct SwathGenerator {
    config: SwathConfig,
    policy: FallbackPolicy,
}

impl SwathGenerator {
    pub fn new(config: SwathConfig) -> Self {
        let policy = FallbackPolicy::new(config.fallback_offset_deg);
        Self { config, policy }
    }

    pub fn config(&self) -> &SwathConfig {
        &self.config
    }

    fn solver(&self) -> SolverSettings {
        SolverSettings {
            max_iterations: self.config.max_iterations,
            tolerance: self.config.tolerance,
        }
    }

    /// `start + i * cadence` for every sample index
    pub fn sample_epochs(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, SwathConfigError> {
        (0..self.config.sample_count)
            .map(|i| {
                self.config
                    .offset(i)
                    .and_then(|offset| start.checked_add_signed(offset))
                    .ok_or(SwathConfigError::EpochOutOfRange)
            })
            .collect()
    }

    /// One result per satellite, in input order.
    pub fn generate<P: Propagator + ?Sized>(
        &self,
        satellites: &[SatelliteTle],
        propagator: &P,
        start: DateTime<Utc>,
    ) -> Result<Vec<SatelliteOrbitResult>, SwathConfigError> {
        if satellites.is_empty() {
            return Ok(Vec::new());
        }
        self.config.validate()?;
        let epochs = self.sample_epochs(start)?;

        log::info!(
            "Generating {} samples for {} satellites from {} (side angle {} deg)",
            self.config.sample_count,
            satellites.len(),
            start,
            self.config.side_angle_deg
        );

        Ok(satellites
            .par_iter()
            .map(|tle| self.generate_at(tle, propagator, &epochs))
            .collect())
    }

    pub fn generate_one<P: Propagator + ?Sized>(
        &self,
        tle: &SatelliteTle,
        propagator: &P,
        start: DateTime<Utc>,
    ) -> Result<SatelliteOrbitResult, SwathConfigError> {
        self.config.validate()?;
        let epochs = self.sample_epochs(start)?;
        Ok(self.generate_at(tle, propagator, &epochs))
    }

    fn generate_at<P: Propagator + ?Sized>(
        &self,
        tle: &SatelliteTle,
        propagator: &P,
        epochs: &[DateTime<Utc>],
    ) -> SatelliteOrbitResult {
        let side_angle = self.config.side_angle_deg;
        let solver = self.solver();

        let samples: Vec<SampleResult> = epochs
            .par_iter()
            .map(|&epoch| propagate_sample(propagator, tle, epoch, side_angle, solver))
            .collect();

        let resolved = self.policy.resolve(&samples);
        if !resolved.flags.is_empty() {
            log::warn!(
                "{}: {} of {} sample points substituted",
                tle.name,
                resolved.flags.len(),
                samples.len() * 3
            );
        }

        SatelliteOrbitResult {
            name: tle.name.clone(),
            epochs: resolved.epochs,
            track: resolved.track,
            left: resolved.left,
            right: resolved.right,
            fallbacks: resolved.flags,
        }
    }
}

impl Default for SwathGenerator {
    fn default() -> Self {
        Self::new(SwathConfig::default())
    }
}
