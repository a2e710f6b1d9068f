use approx::assert_abs_diff_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};

use swath_track::geometry::from_geodetic;
use swath_track::propagation::{PropagationError, Propagator, SatelliteTle, StateVector};
use swath_track::swath::{FailureKind, OrbitPayload, Series, SwathConfig, SwathGenerator};

const RADIUS_KM: f64 = 7000.0;
const SPEED_KM_S: f64 = 7.5;

/// Circular orbit of 7000 km radius, inclined about the x axis, passing
/// through `(7000, 0, 0)` at `epoch`
struct CircularOrbit {
    epoch: DateTime<Utc>,
    inclination_deg: f64,
}

impl Propagator for CircularOrbit {
    fn propagate(
        &self,
        _tle: &SatelliteTle,
        at: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError> {
        let dt = (at - self.epoch).num_milliseconds() as f64 / 1000.0;
        let (s, c) = (SPEED_KM_S / RADIUS_KM * dt).sin_cos();
        let (si, ci) = self.inclination_deg.to_radians().sin_cos();

        let in_plane = [RADIUS_KM * c, RADIUS_KM * s];
        let v_in_plane = [-SPEED_KM_S * s, SPEED_KM_S * c];
        Ok(StateVector::new(
            [in_plane[0], in_plane[1] * ci, in_plane[1] * si],
            [v_in_plane[0], v_in_plane[1] * ci, v_in_plane[1] * si],
            at,
        ))
    }
}

/// Fails exactly at one instant and delegates otherwise
struct FailingAt<P> {
    inner: P,
    at: DateTime<Utc>,
}

impl<P: Propagator> Propagator for FailingAt<P> {
    fn propagate(
        &self,
        tle: &SatelliteTle,
        at: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError> {
        if at == self.at {
            Err(PropagationError::Propagation("injected".into()))
        } else {
            self.inner.propagate(tle, at)
        }
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 21, 12, 0, 0).unwrap()
}

fn sat(name: &str) -> SatelliteTle {
    SatelliteTle::new(name, "1", "2")
}

fn config(sample_count: usize) -> SwathConfig {
    SwathConfig {
        sample_count,
        cadence: Duration::minutes(2),
        ..SwathConfig::default()
    }
}

#[test]
fn equatorial_circular_orbit_scenario() {
    let orbit = CircularOrbit {
        epoch: epoch(),
        inclination_deg: 0.0,
    };
    let results = SwathGenerator::new(config(1))
        .generate(&[sat("EQ")], &orbit, epoch())
        .unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.fallbacks.is_empty());

    let nominal = result.track.get(0).unwrap();
    let left = result.left.get(0).unwrap();
    let right = result.right.get(0).unwrap();
    for p in [nominal, left, right] {
        assert!(p.is_finite());
    }

    assert_abs_diff_eq!(nominal.latitude_deg, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(nominal.height_m, 621_863.0, epsilon = 1e-3);
    assert_eq!(left.height_m, 0.0);
    assert_eq!(right.height_m, 0.0);

    let (lo, hi) = if left.longitude_deg <= right.longitude_deg {
        (left.longitude_deg, right.longitude_deg)
    } else {
        (right.longitude_deg, left.longitude_deg)
    };
    assert!(lo - 1e-9 <= nominal.longitude_deg && nominal.longitude_deg <= hi + 1e-9);

    // the swath opens across the track: north and south of the equator
    assert!(left.latitude_deg > 1.0);
    assert!(right.latitude_deg < -1.0);
    assert_abs_diff_eq!(left.latitude_deg, -right.latitude_deg, epsilon = 1e-9);
}

#[test]
fn injected_failure_is_isolated() {
    let k = 17;
    let generator = SwathGenerator::new(config(48));
    let orbit = || CircularOrbit {
        epoch: epoch(),
        inclination_deg: 51.6,
    };

    let baseline = generator.generate_one(&sat("INC"), &orbit(), epoch()).unwrap();
    let failing = FailingAt {
        inner: orbit(),
        at: generator.sample_epochs(epoch()).unwrap()[k],
    };
    let degraded = generator.generate_one(&sat("INC"), &failing, epoch()).unwrap();

    assert!(baseline.fallbacks.is_empty());
    assert_eq!(degraded.len(), baseline.len());
    assert_eq!(degraded.left.len(), baseline.left.len());
    assert_eq!(degraded.right.len(), baseline.right.len());
    assert_eq!(degraded.epochs, baseline.epochs);

    for i in (0..baseline.len()).filter(|&i| i != k) {
        assert_eq!(degraded.track.get(i), baseline.track.get(i), "track {i}");
        assert_eq!(degraded.left.get(i), baseline.left.get(i), "left {i}");
        assert_eq!(degraded.right.get(i), baseline.right.get(i), "right {i}");
    }

    let flagged: Vec<_> = degraded.fallbacks.iter().map(|f| (f.index, f.series)).collect();
    assert_eq!(
        flagged,
        [(k, Series::Nominal), (k, Series::Left), (k, Series::Right)]
    );
    assert!(degraded
        .fallbacks
        .iter()
        .all(|f| f.kind == FailureKind::Propagation));

    // substitutes stay finite and on the surface for the edges
    assert_eq!(degraded.track.get(k), baseline.track.get(k - 1));
    assert!(degraded.left.get(k).unwrap().is_finite());
    assert_eq!(degraded.right.get(k).unwrap().height_m, 0.0);
}

#[test]
fn swath_edges_lie_on_opposite_sides_of_the_track() {
    let orbit = CircularOrbit {
        epoch: epoch(),
        inclination_deg: 97.5,
    };
    let result = SwathGenerator::new(config(30))
        .generate_one(&sat("SSO"), &orbit, epoch())
        .unwrap();
    assert!(result.fallbacks.is_empty());

    for i in 0..result.len() {
        let track = from_geodetic(result.track.get(i).unwrap()).normalize();
        let left = from_geodetic(result.left.get(i).unwrap());
        let right = from_geodetic(result.right.get(i).unwrap());
        let to_left = left - track * left.norm();
        let to_right = right - track * right.norm();
        assert!(to_left.dot(&to_right) < 0.0, "sample {i}");
    }
}

#[test]
fn empty_satellite_list_yields_empty_result() {
    let orbit = CircularOrbit {
        epoch: epoch(),
        inclination_deg: 0.0,
    };
    let results = SwathGenerator::default()
        .generate(&[], &orbit, epoch())
        .unwrap();
    assert!(results.is_empty());
    assert!(OrbitPayload::from_results(&results).is_empty());
}

#[test]
fn payload_keeps_satellite_order_and_triplets() {
    let orbit = CircularOrbit {
        epoch: epoch(),
        inclination_deg: 30.0,
    };
    let sats = [sat("FIRST"), sat("SECOND"), sat("THIRD")];
    let results = SwathGenerator::new(config(10))
        .generate(&sats, &orbit, epoch())
        .unwrap();
    let payload = OrbitPayload::from_results(&results);

    let names: Vec<_> = payload.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["FIRST", "SECOND", "THIRD"]);
    for (i, p) in payload.iter().enumerate() {
        assert_eq!(p.id, i + 1);
        assert_eq!(p.positions.len(), 30);
        assert_eq!(p.left_swath.len(), 30);
        assert_eq!(p.right_swath.len(), 30);
        assert_eq!(p.initial_position.as_deref(), Some(&p.positions[..3]));
    }

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json[0]["rightSwath"].is_array());
    assert!(json[0]["initialPosition"].is_array());
}
