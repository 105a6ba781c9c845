//! Inertial-to-geodetic conversion. Two documented policies: a spherical
//! approximation (fast, roughly 10 km altitude error) and the default
//! iterative oblate-ellipsoid conversion (sub-km).

use chrono::{DateTime, TimeZone, Utc};

use orbitwatch_domain::{GeodeticPosition, OrbitalState};

use crate::propagator::EARTH_EQ_RADIUS_KM;

const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;
const FLATTENING: f64 = 1.0 / 298.26;

/// Greenwich mean sidereal time at `at`, radians.
pub fn gmst_rad(at: DateTime<Utc>) -> f64 {
    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).single().unwrap_or_default();
    let days = (at - j2000).num_milliseconds() as f64 / 86_400_000.0;
    (280.460_618_37 + 360.985_647_366_29 * days).rem_euclid(360.0).to_radians()
}

/// Wraps a longitude in degrees to [-180, 180).
pub fn wrap_longitude_deg(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

fn true_longitude_deg(x: f64, y: f64, at: DateTime<Utc>) -> f64 {
    let inertial = y.atan2(x);
    wrap_longitude_deg((inertial - gmst_rad(at)).to_degrees())
}

/// Spherical-Earth policy: latitude from the position direction, altitude
/// above the mean radius.
pub fn geodetic_spherical(state: &OrbitalState) -> GeodeticPosition {
    let [x, y, z] = state.position_km;
    let r = state.radius_km();
    GeodeticPosition {
        latitude_deg: (z / r).asin().to_degrees(),
        longitude_deg: true_longitude_deg(x, y, state.timestamp),
        altitude_km: r - EARTH_MEAN_RADIUS_KM,
    }
}

/// Oblate-ellipsoid policy: iterative latitude refinement against the
/// reference ellipsoid. Converges well inside five iterations for any
/// orbital altitude.
pub fn geodetic(state: &OrbitalState) -> GeodeticPosition {
    let [x, y, z] = state.position_km;
    let e_sq = FLATTENING * (2.0 - FLATTENING);
    let rho = (x * x + y * y).sqrt();

    if rho < 1e-6 {
        // On the polar axis the iteration degenerates; altitude is measured
        // against the polar radius directly.
        let polar_radius = EARTH_EQ_RADIUS_KM * (1.0 - FLATTENING);
        return GeodeticPosition {
            latitude_deg: if z >= 0.0 { 90.0 } else { -90.0 },
            longitude_deg: 0.0,
            altitude_km: z.abs() - polar_radius,
        };
    }

    let mut lat = (z / (rho * (1.0 - e_sq))).atan();
    let mut n = EARTH_EQ_RADIUS_KM;
    for _ in 0..5 {
        n = EARTH_EQ_RADIUS_KM / (1.0 - e_sq * lat.sin().powi(2)).sqrt();
        lat = ((z + e_sq * n * lat.sin()) / rho).atan();
    }

    GeodeticPosition {
        latitude_deg: lat.to_degrees(),
        longitude_deg: true_longitude_deg(x, y, state.timestamp),
        altitude_km: rho / lat.cos() - n,
    }
}
