use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one propagation attempt. `Ok` maps to error code 0; every
/// other variant names the degenerate condition that made the element set
/// unusable at the requested instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropagationStatus {
    Ok,
    MeanMotionNonPositive,
    EccentricityOutOfRange,
    KeplerDiverged,
    Decayed,
}

impl PropagationStatus {
    pub fn code(self) -> u8 {
        match self {
            PropagationStatus::Ok => 0,
            PropagationStatus::MeanMotionNonPositive => 1,
            PropagationStatus::EccentricityOutOfRange => 2,
            PropagationStatus::KeplerDiverged => 3,
            PropagationStatus::Decayed => 4,
        }
    }

    pub fn is_ok(self) -> bool {
        self == PropagationStatus::Ok
    }
}

/// Inertial state at one instant. Derived from an element set, never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalState {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
    pub timestamp: DateTime<Utc>,
    pub status: PropagationStatus,
}

impl OrbitalState {
    pub fn failed(status: PropagationStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            position_km: [0.0; 3],
            velocity_km_s: [0.0; 3],
            timestamp,
            status,
        }
    }

    pub fn speed_km_s(&self) -> f64 {
        let [vx, vy, vz] = self.velocity_km_s;
        (vx * vx + vy * vy + vz * vz).sqrt()
    }

    pub fn radius_km(&self) -> f64 {
        let [x, y, z] = self.position_km;
        (x * x + y * y + z * z).sqrt()
    }
}

/// Latitude/longitude/altitude above a reference Earth model. Longitude is
/// always wrapped to [-180, 180).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}
