use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::anomaly::AnomalyEvent;
use crate::orbit::GeodeticPosition;
use crate::telemetry::TelemetrySample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subframe {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsoStatus {
    Operational,
    Maintenance,
    Anomalous,
}

/// Dashboard row for one monitored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsoSummary {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub threat_level: crate::anomaly::Severity,
    pub orbit: String,
}

/// Live per-cycle state of one monitored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsoState {
    pub norad_id: u32,
    pub name: String,
    pub position: GeodeticPosition,
    pub speed_km_s: f64,
    pub status: RsoStatus,
    pub telemetry: TelemetrySample,
    pub timestamp: DateTime<Utc>,
}

/// Threat-technique coverage row for the alignment summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueCoverage {
    pub id: String,
    pub name: String,
    pub coverage: u8,
}

/// Per-cycle aggregation handed to the emitter boundary. Rebuilt from
/// scratch every cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub subframes: Vec<Subframe>,
    pub logs: Vec<LogEntry>,
    pub rsos: Vec<RsoSummary>,
    pub threat_alignment: Vec<TechniqueCoverage>,
    pub generated_at: DateTime<Utc>,
}

/// Payloads the core hands to the emitter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutboundEvent {
    Snapshot(DashboardSnapshot),
    Alert(AnomalyEvent),
}
