//! SGP4-class secular propagation: Keplerian two-body motion with
//! first-order J2 secular rates on the node, perigee and mean anomaly.

use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

use orbitwatch_domain::{OrbitalState, PropagationStatus};

use crate::tle::MeanElements;

pub const MU_KM3_S2: f64 = 398_600.8;
pub const EARTH_EQ_RADIUS_KM: f64 = 6378.135;
const J2: f64 = 1.082_629_989_05e-3;

const KEPLER_TOL: f64 = 1e-12;
const KEPLER_MAX_ITER: usize = 30;

fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Option<f64> {
    let m = mean_anomaly.rem_euclid(TAU);
    let mut e_anom = if eccentricity > 0.8 { std::f64::consts::PI } else { m };
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (e_anom - eccentricity * e_anom.sin() - m)
            / (1.0 - eccentricity * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < KEPLER_TOL {
            return Some(e_anom);
        }
    }
    None
}

/// Propagates mean elements to `at`. Failure is reported through the state's
/// `status`; the caller skips the object for the cycle and moves on.
pub fn propagate(elements: &MeanElements, at: DateTime<Utc>) -> OrbitalState {
    let n = elements.mean_motion_rev_day * TAU / 86_400.0;
    if n <= 0.0 || !n.is_finite() {
        return OrbitalState::failed(PropagationStatus::MeanMotionNonPositive, at);
    }
    let ecc = elements.eccentricity;
    if !(0.0..1.0).contains(&ecc) {
        return OrbitalState::failed(PropagationStatus::EccentricityOutOfRange, at);
    }

    let a = (MU_KM3_S2 / (n * n)).cbrt();
    let incl = elements.inclination_deg.to_radians();
    let p = a * (1.0 - ecc * ecc);

    // First-order J2 secular rates, rad/s.
    let j2_factor = 1.5 * J2 * (EARTH_EQ_RADIUS_KM / p).powi(2) * n;
    let sin_i_sq = incl.sin().powi(2);
    let raan_dot = -j2_factor * incl.cos();
    let argp_dot = j2_factor * (2.0 - 2.5 * sin_i_sq);
    let m_dot = n + j2_factor * (1.0 - ecc * ecc).sqrt() * (1.0 - 1.5 * sin_i_sq);

    let dt = (at - elements.epoch).num_milliseconds() as f64 / 1000.0;
    let mean_anomaly = elements.mean_anomaly_deg.to_radians() + m_dot * dt;
    let raan = elements.raan_deg.to_radians() + raan_dot * dt;
    let argp = elements.arg_perigee_deg.to_radians() + argp_dot * dt;

    let Some(e_anom) = solve_kepler(mean_anomaly, ecc) else {
        return OrbitalState::failed(PropagationStatus::KeplerDiverged, at);
    };

    let radius = a * (1.0 - ecc * e_anom.cos());
    if radius < EARTH_EQ_RADIUS_KM {
        return OrbitalState::failed(PropagationStatus::Decayed, at);
    }

    let true_anom = ((1.0 - ecc * ecc).sqrt() * e_anom.sin()).atan2(e_anom.cos() - ecc);
    let (sin_v, cos_v) = true_anom.sin_cos();

    // Perifocal position/velocity.
    let r_pf = [radius * cos_v, radius * sin_v, 0.0];
    let v_scale = (MU_KM3_S2 / p).sqrt();
    let v_pf = [-v_scale * sin_v, v_scale * (ecc + cos_v), 0.0];

    let (sin_o, cos_o) = raan.sin_cos();
    let (sin_w, cos_w) = argp.sin_cos();
    let (sin_i, cos_i) = incl.sin_cos();

    // Perifocal -> inertial rotation, R3(-raan) R1(-i) R3(-argp).
    let rot = [
        [
            cos_o * cos_w - sin_o * sin_w * cos_i,
            -cos_o * sin_w - sin_o * cos_w * cos_i,
            sin_o * sin_i,
        ],
        [
            sin_o * cos_w + cos_o * sin_w * cos_i,
            -sin_o * sin_w + cos_o * cos_w * cos_i,
            -cos_o * sin_i,
        ],
        [sin_w * sin_i, cos_w * sin_i, cos_i],
    ];

    let apply = |v: [f64; 3]| {
        [
            rot[0][0] * v[0] + rot[0][1] * v[1] + rot[0][2] * v[2],
            rot[1][0] * v[0] + rot[1][1] * v[1] + rot[1][2] * v[2],
            rot[2][0] * v[0] + rot[2][1] * v[1] + rot[2][2] * v[2],
        ]
    };

    OrbitalState {
        position_km: apply(r_pf),
        velocity_km_s: apply(v_pf),
        timestamp: at,
        status: PropagationStatus::Ok,
    }
}
