use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::geometry::{GeodeticPoint, GeometryError};
use crate::propagation::PropagationError;

/// Why a sample point had to be substituted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    Propagation,
    DegenerateFrame,
    NoIntersection,
    ConversionFailure,
}

/// Which of the three polylines of a satellite a point belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Series {
    Nominal,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleFailure {
    #[error(transparent)]
    Propagation(#[from] PropagationError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl SampleFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            SampleFailure::Propagation(_) => FailureKind::Propagation,
            SampleFailure::Geometry(GeometryError::DegenerateFrame) => {
                FailureKind::DegenerateFrame
            }
            SampleFailure::Geometry(GeometryError::NoIntersection(_)) => {
                FailureKind::NoIntersection
            }
            SampleFailure::Geometry(GeometryError::ConversionFailure) => {
                FailureKind::ConversionFailure
            }
        }
    }
}

/// Quality signal: the point at `index` of `series` is a substitute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FallbackFlag {
    pub index: usize,
    pub series: Series,
    pub kind: FailureKind,
}

/// The three points of one timestamp, before any fallback is applied
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResult {
    pub epoch: DateTime<Utc>,
    pub nominal: Result<GeodeticPoint, SampleFailure>,
    pub left: Result<GeodeticPoint, SampleFailure>,
    pub right: Result<GeodeticPoint, SampleFailure>,
}

impl SampleResult {
    /// A sample whose state vector could not be obtained
    pub fn failed(epoch: DateTime<Utc>, failure: SampleFailure) -> Self {
        Self {
            epoch,
            nominal: Err(failure.clone()),
            left: Err(failure.clone()),
            right: Err(failure),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.nominal.is_ok() && self.left.is_ok() && self.right.is_ok()
    }
}

/// Chronologically ordered geodetic points, one per sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    points: Vec<GeodeticPoint>,
}

/// A swath edge has the shape of a track and is index-aligned with it
pub type SwathBoundary = Track;

impl Track {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: GeodeticPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[GeodeticPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&GeodeticPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `lon, lat, h` triplets laid out flat
    pub fn flat_triplets(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| p.triplet()).collect()
    }
}

/// Ground track and swath edges of one satellite
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteOrbitResult {
    pub name: String,
    pub epochs: Vec<DateTime<Utc>>,
    pub track: Track,
    pub left: SwathBoundary,
    pub right: SwathBoundary,
    pub fallbacks: Vec<FallbackFlag>,
}

impl SatelliteOrbitResult {
    pub fn initial_position(&self) -> Option<GeodeticPoint> {
        self.track.get(0).copied()
    }

    pub fn len(&self) -> usize {
        self.track.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }
}

/// Serialized form of a [`SatelliteOrbitResult`] for the display client
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrbitPayload {
    pub id: usize,
    pub name: String,
    pub color_index: usize,
    /// Nominal ground track as flat `lon, lat, h` triplets
    pub positions: Vec<f64>,
    pub left_swath: Vec<f64>,
    pub right_swath: Vec<f64>,
    pub initial_position: Option<Vec<f64>>,
    pub fallbacks: Vec<FallbackFlag>,
}

const PALETTE_SIZE: usize = 10;

impl OrbitPayload {
    pub fn new(index: usize, result: &SatelliteOrbitResult) -> Self {
        Self {
            id: index + 1,
            name: result.name.clone(),
            color_index: index % PALETTE_SIZE,
            positions: result.track.flat_triplets(),
            left_swath: result.left.flat_triplets(),
            right_swath: result.right.flat_triplets(),
            initial_position: result.initial_position().map(|p| p.triplet().to_vec()),
            fallbacks: result.fallbacks.clone(),
        }
    }

    pub fn from_results(results: &[SatelliteOrbitResult]) -> Vec<Self> {
        results
            .iter()
            .enumerate()
            .map(|(i, r)| Self::new(i, r))
            .collect()
    }
}
