use chrono::{DateTime, Utc};
use geo::{Distance, Haversine, Point};
use std::collections::HashSet;

use crate::coverage::error::RevisitError;
use crate::coverage::types::{
    CoverageEvent, QueryPoint, RevisitQuery, RevisitStats, RevisitSummary, SatellitePosition,
};
use crate::propagation::{Propagator, SatelliteTle};
use crate::swath::{SatelliteOrbitResult, Series, SwathConfig, SwathGenerator};

const M_PER_KM: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Generates tracks over the query duration and counts the passes over the
/// query point.
pub fn analyze_revisit<P: Propagator + ?Sized>(
    satellites: &[SatelliteTle],
    propagator: &P,
    swath: &SwathConfig,
    query: &RevisitQuery,
    start: DateTime<Utc>,
) -> Result<RevisitStats, RevisitError> {
    query.validate()?;
    if satellites.is_empty() {
        return Err(RevisitError::NoSatellites);
    }

    let config = SwathConfig {
        side_angle_deg: query.side_angle_deg,
        sample_count: swath.samples_for(query.duration),
        ..swath.clone()
    };
    let results = SwathGenerator::new(config).generate(satellites, propagator, start)?;
    revisit(&results, query)
}

/// Coverage events and revisit gaps of `query` over already generated tracks
pub fn revisit(
    results: &[SatelliteOrbitResult],
    query: &RevisitQuery,
) -> Result<RevisitStats, RevisitError> {
    query.validate()?;
    if results.is_empty() {
        return Err(RevisitError::NoSatellites);
    }

    let target = Point::new(query.longitude_deg, query.latitude_deg);
    let mut events = Vec::new();
    let mut total_samples = 0;
    for result in results {
        // substituted nominal points are not observations
        let substituted: HashSet<usize> = result
            .fallbacks
            .iter()
            .filter(|f| f.series == Series::Nominal)
            .map(|f| f.index)
            .collect();

        for (index, (epoch, p)) in result.epochs.iter().zip(result.track.points()).enumerate() {
            if substituted.contains(&index) {
                continue;
            }
            total_samples += 1;

            let here = Point::new(p.longitude_deg, p.latitude_deg);
            let distance_km = Haversine.distance(target, here) / M_PER_KM;
            if distance_km < query.radius_km {
                events.push(CoverageEvent {
                    satellite: result.name.clone(),
                    time: *epoch,
                    distance_km,
                    satellite_position: SatellitePosition {
                        longitude: p.longitude_deg,
                        latitude: p.latitude_deg,
                        altitude: p.height_m,
                    },
                });
            }
        }
    }
    events.sort_by_key(|e: &CoverageEvent| e.time);

    let summary = summarize(&events, total_samples);
    log::debug!(
        "{} coverage events within {} km of ({}, {})",
        events.len(),
        query.radius_km,
        query.latitude_deg,
        query.longitude_deg
    );

    let total_coverage_events = events.len();
    events.truncate(query.max_events);

    Ok(RevisitStats {
        total_coverage_events,
        coverage_times: events,
        query_point: QueryPoint {
            latitude: query.latitude_deg,
            longitude: query.longitude_deg,
        },
        duration_hours: query.duration_hours(),
        side_angle_degrees: query.side_angle_deg,
        summary,
    })
}

fn summarize(events: &[CoverageEvent], total_samples: usize) -> Option<RevisitSummary> {
    match events.len() {
        0 => None,
        1 => Some(RevisitSummary::default()),
        n => {
            let gaps: Vec<f64> = events
                .windows(2)
                .map(|w| {
                    (w[1].time - w[0].time).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR
                })
                .collect();
            let total: f64 = gaps.iter().sum();
            Some(RevisitSummary {
                average_revisit_hours: total / gaps.len() as f64,
                min_revisit_hours: gaps.iter().cloned().fold(f64::INFINITY, f64::min),
                max_revisit_hours: gaps.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                coverage_percentage: n as f64 / total_samples.max(1) as f64 * 100.0,
            })
        }
    }
}
