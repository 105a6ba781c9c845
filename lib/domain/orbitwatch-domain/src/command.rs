//! Inbound command shapes consumed by the core. Transport mechanics live
//! outside the core; these are the payloads it accepts.

use serde::{Deserialize, Serialize};

use crate::anomaly::AnomalyEvent;
use crate::elements::ElementSet;
use crate::telemetry::TelemetrySample;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Reference to a monitored object in manual requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsoRef {
    pub norad_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualTrainRequest {
    pub data: Vec<TelemetrySample>,
    pub objects: Vec<ElementSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPredictRequest {
    pub telemetry: TelemetrySample,
    pub object: RsoRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualAlertRequest {
    pub event: AnomalyEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub telemetry: TelemetrySample,
}
