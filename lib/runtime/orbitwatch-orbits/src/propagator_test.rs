use chrono::{TimeZone, Utc};

use orbitwatch_domain::PropagationStatus;

use crate::geodetic::{geodetic, geodetic_spherical, wrap_longitude_deg};
use crate::propagator::propagate;
use crate::tle::parse_element_set;
use crate::tle_test::iss_element_set;

#[test]
fn propagation_is_deterministic() {
    let elements = parse_element_set(&iss_element_set()).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 6, 30, 0).unwrap();
    let first = propagate(&elements, at);
    let second = propagate(&elements, at);
    assert_eq!(first, second);
}

#[test]
fn leo_object_stays_near_400_km() {
    let elements = parse_element_set(&iss_element_set()).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap();
    let state = propagate(&elements, at);
    assert!(state.status.is_ok());

    let position = geodetic(&state);
    assert!(
        (position.altitude_km - 400.0).abs() < 70.0,
        "altitude {} km too far from 400 km",
        position.altitude_km
    );
    let speed = state.speed_km_s();
    assert!((7.0..8.1).contains(&speed), "speed {speed} km/s outside LEO band");
    // Geodetic latitude exceeds the geocentric bound by the ellipsoid
    // correction, so allow a little past the inclination.
    assert!(position.latitude_deg.abs() <= 52.0);
}

#[test]
fn geodetic_policies_agree_within_spherical_error() {
    let elements = parse_element_set(&iss_element_set()).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 14, 45, 0).unwrap();
    let state = propagate(&elements, at);
    assert!(state.status.is_ok());

    let oblate = geodetic(&state);
    let spherical = geodetic_spherical(&state);
    assert!((oblate.altitude_km - spherical.altitude_km).abs() < 25.0);
    assert!((oblate.latitude_deg - spherical.latitude_deg).abs() < 0.5);
    assert!((oblate.longitude_deg - spherical.longitude_deg).abs() < 1e-6);
    for position in [oblate, spherical] {
        assert!((-180.0..180.0).contains(&position.longitude_deg));
    }
}

#[test]
fn longitude_wraps_to_half_open_interval() {
    assert_eq!(wrap_longitude_deg(190.0), -170.0);
    assert_eq!(wrap_longitude_deg(-190.0), 170.0);
    assert_eq!(wrap_longitude_deg(180.0), -180.0);
    assert_eq!(wrap_longitude_deg(-180.0), -180.0);
    assert_eq!(wrap_longitude_deg(540.0), -180.0);
}

#[test]
fn degenerate_elements_fail_without_panicking() {
    let mut elements = parse_element_set(&iss_element_set()).unwrap();
    elements.eccentricity = 1.2;
    let at = elements.epoch;
    assert_eq!(
        propagate(&elements, at).status,
        PropagationStatus::EccentricityOutOfRange
    );

    let mut elements = parse_element_set(&iss_element_set()).unwrap();
    elements.mean_motion_rev_day = 0.0;
    assert_eq!(
        propagate(&elements, at).status,
        PropagationStatus::MeanMotionNonPositive
    );

    // 17.5 rev/day puts the semi-major axis under the Earth's surface.
    let mut elements = parse_element_set(&iss_element_set()).unwrap();
    elements.mean_motion_rev_day = 17.5;
    assert_eq!(propagate(&elements, at).status, PropagationStatus::Decayed);
}

#[test]
fn failed_propagation_reports_nonzero_code() {
    assert_eq!(PropagationStatus::Ok.code(), 0);
    for status in [
        PropagationStatus::MeanMotionNonPositive,
        PropagationStatus::EccentricityOutOfRange,
        PropagationStatus::KeplerDiverged,
        PropagationStatus::Decayed,
    ] {
        assert_ne!(status.code(), 0);
    }
}
