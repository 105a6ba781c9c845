use chrono::{TimeZone, Utc};

use orbitwatch_domain::{
    AnomalyType, GeodeticPosition, LogLevel, MonitorConfig, RsoState, RsoStatus, Severity,
};
use orbitwatch_orbits::parse_element_set;

use crate::context::{MonitorContext, MonitoredObject};
use crate::context_test::{event, sample};
use crate::dashboard::build_snapshot;
use crate::service_test::iss_set;

fn context_with_iss() -> MonitorContext {
    let context = MonitorContext::new(MonitorConfig::default());
    let set = iss_set();
    let elements = parse_element_set(&set).unwrap();
    context.replace_objects(vec![MonitoredObject { set, elements }]);
    context
}

#[test]
fn subframes_cover_every_channel() {
    let context = context_with_iss();
    let snapshot = build_snapshot(&context, Some(&sample()));
    assert_eq!(snapshot.subframes.len(), 9);
    assert_eq!(snapshot.subframes[0].id, "sf_0");
    assert_eq!(snapshot.subframes[0].name, "Altitude");
    assert!(snapshot.subframes[0].description.contains("412.00"));

    let without = build_snapshot(&context, None);
    assert!(without.subframes.is_empty());
}

#[test]
fn log_levels_follow_the_severity_rule() {
    let context = context_with_iss();
    context.append_event(event("low", Severity::Low, AnomalyType::SensorMalfunction));
    context.append_event(event("med", Severity::Medium, AnomalyType::ThermalAnomaly));
    context.append_event(event("high", Severity::High, AnomalyType::ThermalAnomaly));
    context.append_event(event("crit", Severity::Critical, AnomalyType::ThermalAnomaly));

    let snapshot = build_snapshot(&context, None);
    let level_of = |id: &str| {
        snapshot
            .logs
            .iter()
            .find(|entry| entry.id == format!("log_{id}"))
            .unwrap()
            .level
    };
    assert_eq!(level_of("med"), LogLevel::Warning);
    assert_eq!(level_of("high"), LogLevel::Warning);
    assert_eq!(level_of("low"), LogLevel::Error);
    assert_eq!(level_of("crit"), LogLevel::Error);
    assert!(snapshot.logs[0].message.contains("ISS (ZARYA)"));
}

#[test]
fn threat_coverage_increments_per_observed_anomaly_and_caps() {
    let context = context_with_iss();
    let coverage_of = |snapshot: &orbitwatch_domain::DashboardSnapshot, id: &str| {
        snapshot
            .threat_alignment
            .iter()
            .find(|row| row.id == id)
            .unwrap()
            .coverage
    };

    let empty = build_snapshot(&context, None);
    assert_eq!(coverage_of(&empty, "T001"), 0);

    context.append_event(event("p1", Severity::High, AnomalyType::PowerSystemDegradation));
    context.append_event(event("p2", Severity::High, AnomalyType::PowerSystemDegradation));
    let two = build_snapshot(&context, None);
    assert_eq!(coverage_of(&two, "T001"), 50);
    assert_eq!(coverage_of(&two, "T005"), 50);
    assert_eq!(coverage_of(&two, "T002"), 0);

    for index in 0..4 {
        context.append_event(event(
            &format!("p{}", index + 3),
            Severity::High,
            AnomalyType::PowerSystemDegradation,
        ));
    }
    let capped = build_snapshot(&context, None);
    assert_eq!(coverage_of(&capped, "T001"), 100);
}

#[test]
fn rso_rows_carry_latest_threat_and_orbit_band() {
    let context = context_with_iss();

    let quiet = build_snapshot(&context, None);
    assert_eq!(quiet.rsos.len(), 1);
    assert_eq!(quiet.rsos[0].threat_level, Severity::Low);
    assert_eq!(quiet.rsos[0].orbit, "LEO");

    context.update_state(RsoState {
        norad_id: 25544,
        name: "ISS (ZARYA)".to_string(),
        position: GeodeticPosition {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: 20_000.0,
        },
        speed_km_s: 3.9,
        status: RsoStatus::Operational,
        telemetry: sample(),
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    });
    context.append_event(event("t1", Severity::Critical, AnomalyType::ThermalAnomaly));

    let snapshot = build_snapshot(&context, None);
    assert_eq!(snapshot.rsos[0].threat_level, Severity::Critical);
    assert_eq!(snapshot.rsos[0].orbit, "MEO");
    assert_eq!(snapshot.rsos[0].id, "rso_25544");
}
