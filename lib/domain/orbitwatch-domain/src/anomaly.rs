use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::orbit::GeodeticPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyType {
    PowerSystemDegradation,
    ThermalAnomaly,
    SensorMalfunction,
    DataExfiltration,
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnomalyType::PowerSystemDegradation => "Power System Degradation",
            AnomalyType::ThermalAnomaly => "Thermal Anomaly",
            AnomalyType::SensorMalfunction => "Sensor Malfunction",
            AnomalyType::DataExfiltration => "Data Exfiltration",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Raw model outputs alongside their 0-100 health mappings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelScores {
    pub reconstruction_error: f64,
    pub isolation_score: f64,
    pub margin_score: f64,
    pub reconstruction_health: f64,
    pub isolation_health: f64,
    pub margin_health: f64,
}

impl ModelScores {
    /// Neutral scores for an object without a trained model set.
    pub fn untrained() -> Self {
        Self {
            reconstruction_error: 0.0,
            isolation_score: 0.0,
            margin_score: 0.0,
            reconstruction_health: 100.0,
            isolation_health: 100.0,
            margin_health: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
}

/// Result of scoring one telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub norad_id: u32,
    pub trained: bool,
    pub is_anomaly: bool,
    pub aggregate_health: f64,
    pub scores: ModelScores,
    pub classification: Option<Classification>,
}

impl ScoreReport {
    /// The untrained-default healthy report: scoring must not fail the
    /// caller just because training has not completed yet.
    pub fn untrained(norad_id: u32) -> Self {
        Self {
            norad_id,
            trained: false,
            is_anomaly: false,
            aggregate_health: 100.0,
            scores: ModelScores::untrained(),
            classification: None,
        }
    }
}

/// One entry in the append-only anomaly log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    pub id: String,
    pub object_id: String,
    pub object_name: String,
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub scores: ModelScores,
    pub aggregate_health: f64,
    pub timestamp: DateTime<Utc>,
    pub location: Option<GeodeticPosition>,
    pub flagged: bool,
}
