//! Per-cycle dashboard snapshot assembly.

use chrono::Utc;

use orbitwatch_domain::{
    AnomalyType, DashboardSnapshot, LogEntry, LogLevel, RsoSummary, Severity, Subframe,
    TechniqueCoverage, TelemetryChannel, TelemetrySample,
};

use crate::context::MonitorContext;

/// The threat-technique table tracked by the coverage summary.
const TECHNIQUES: [(&str, &str); 8] = [
    ("T001", "On-board Power System Disruption"),
    ("T002", "Thermal System Disruption"),
    ("T003", "Sensor Data Manipulation"),
    ("T004", "Data Exfiltration from Satellite"),
    ("T005", "Power Supply Interference"),
    ("T006", "Heating/Cooling System Attack"),
    ("T007", "Sensor Calibration Attack"),
    ("T008", "Unauthorized Data Transmission"),
];

fn techniques_for(anomaly_type: AnomalyType) -> [&'static str; 2] {
    match anomaly_type {
        AnomalyType::PowerSystemDegradation => ["T001", "T005"],
        AnomalyType::ThermalAnomaly => ["T002", "T006"],
        AnomalyType::SensorMalfunction => ["T003", "T007"],
        AnomalyType::DataExfiltration => ["T004", "T008"],
    }
}

fn orbit_band(altitude_km: f64) -> &'static str {
    if altitude_km < 2_000.0 {
        "LEO"
    } else if altitude_km < 35_000.0 {
        "MEO"
    } else {
        "GEO"
    }
}

fn subframes(telemetry: &TelemetrySample) -> Vec<Subframe> {
    TelemetryChannel::ALL
        .iter()
        .enumerate()
        .map(|(index, channel)| Subframe {
            id: format!("sf_{index}"),
            name: channel.label().to_string(),
            timestamp: telemetry.timestamp,
            description: format!("{}: {:.2}", channel.label(), telemetry.channel(*channel)),
        })
        .collect()
}

/// Builds the full snapshot from current context state. `telemetry` is the
/// sample the subframe panel renders; snapshots without one carry no
/// subframes.
pub fn build_snapshot(
    context: &MonitorContext,
    telemetry: Option<&TelemetrySample>,
) -> DashboardSnapshot {
    let events = context.events();

    let logs = events
        .iter()
        .map(|event| LogEntry {
            id: format!("log_{}", event.id),
            timestamp: event.timestamp,
            level: match event.severity {
                Severity::Medium | Severity::High => LogLevel::Warning,
                Severity::Low | Severity::Critical => LogLevel::Error,
            },
            message: format!(
                "Anomaly detected on {}: {}",
                event.object_name, event.anomaly_type
            ),
        })
        .collect();

    let rsos = context
        .objects()
        .iter()
        .map(|object| {
            let norad_id = object.set.norad_id;
            let threat_level = events
                .iter()
                .find(|event| event.object_id == object.set.object_id())
                .map_or(Severity::Low, |event| event.severity);
            let orbit = context
                .state_of(norad_id)
                .map_or("LEO", |state| orbit_band(state.position.altitude_km));
            RsoSummary {
                id: format!("rso_{norad_id}"),
                name: object.set.name.clone(),
                kind: "satellite".to_string(),
                threat_level,
                orbit: orbit.to_string(),
            }
        })
        .collect();

    let threat_alignment = TECHNIQUES
        .iter()
        .map(|(id, name)| {
            let hits = events
                .iter()
                .filter(|event| techniques_for(event.anomaly_type).contains(id))
                .count() as u32;
            TechniqueCoverage {
                id: (*id).to_string(),
                name: (*name).to_string(),
                coverage: (hits * 25).min(100) as u8,
            }
        })
        .collect();

    DashboardSnapshot {
        subframes: telemetry.map(subframes).unwrap_or_default(),
        logs,
        rsos,
        threat_alignment,
        generated_at: Utc::now(),
    }
}
