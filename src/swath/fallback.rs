use chrono::{DateTime, Utc};

use crate::geometry::GeodeticPoint;
use crate::swath::config::DEFAULT_FALLBACK_OFFSET_DEG;
use crate::swath::types::{FallbackFlag, SampleFailure, SampleResult, Series, SwathBoundary, Track};

/// Substitutes failed sample points so that every series keeps one point
/// per timestamp.
///
/// A failed nominal point repeats the nearest earlier good nominal point (or
/// the first good one when nothing earlier succeeded). A failed swath edge is
/// the resolved nominal point moved `offset_deg` of longitude west (left) or
/// east (right) onto the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
    pub offset_deg: f64,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            offset_deg: DEFAULT_FALLBACK_OFFSET_DEG,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSeries {
    pub epochs: Vec<DateTime<Utc>>,
    pub track: Track,
    pub left: SwathBoundary,
    pub right: SwathBoundary,
    pub flags: Vec<FallbackFlag>,
}

impl FallbackPolicy {
    pub fn new(offset_deg: f64) -> Self {
        Self { offset_deg }
    }

    pub fn left_substitute(&self, nominal: &GeodeticPoint) -> GeodeticPoint {
        nominal.shifted_on_surface(-self.offset_deg)
    }

    pub fn right_substitute(&self, nominal: &GeodeticPoint) -> GeodeticPoint {
        nominal.shifted_on_surface(self.offset_deg)
    }

    pub fn resolve(&self, samples: &[SampleResult]) -> ResolvedSeries {
        let n = samples.len();
        let mut resolved = ResolvedSeries {
            epochs: Vec::with_capacity(n),
            track: Track::with_capacity(n),
            left: SwathBoundary::with_capacity(n),
            right: SwathBoundary::with_capacity(n),
            flags: Vec::new(),
        };

        let first_good = samples
            .iter()
            .find_map(|s| s.nominal.as_ref().ok().copied())
            .unwrap_or_default();
        let mut last_good: Option<GeodeticPoint> = None;

        for (index, sample) in samples.iter().enumerate() {
            let nominal = match &sample.nominal {
                Ok(p) => {
                    last_good = Some(*p);
                    *p
                }
                Err(e) => {
                    resolved.flag(index, Series::Nominal, e);
                    last_good.unwrap_or(first_good)
                }
            };

            let left = match &sample.left {
                Ok(p) => *p,
                Err(e) => {
                    resolved.flag(index, Series::Left, e);
                    self.left_substitute(&nominal)
                }
            };

            let right = match &sample.right {
                Ok(p) => *p,
                Err(e) => {
                    resolved.flag(index, Series::Right, e);
                    self.right_substitute(&nominal)
                }
            };

            resolved.epochs.push(sample.epoch);
            resolved.track.push(nominal);
            resolved.left.push(left);
            resolved.right.push(right);
        }

        resolved
    }
}

impl ResolvedSeries {
    fn flag(&mut self, index: usize, series: Series, failure: &SampleFailure) {
        log::debug!("sample {} {} substituted: {}", index, series, failure);
        self.flags.push(FallbackFlag {
            index,
            series,
            kind: failure.kind(),
        });
    }
}
