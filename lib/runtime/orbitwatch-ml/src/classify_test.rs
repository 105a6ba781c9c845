use chrono::{TimeZone, Utc};

use orbitwatch_domain::{AnomalyType, Severity, TelemetrySample};

use crate::classify::{classify, default_rules};

fn sample(power: f64, temperature: f64) -> TelemetrySample {
    TelemetrySample {
        altitude_km: 400.0,
        velocity_km_s: 7.66,
        power_pct: power,
        temperature_c: temperature,
        communication_pct: 95.0,
        voltage_v: 12.0,
        solar_efficiency_pct: 85.0,
        attitude_control_pct: 95.0,
        fuel_level_pct: 80.0,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn power_rule_escalates_below_fifty_percent() {
    let classification = classify(&sample(40.0, 20.0), default_rules());
    assert_eq!(classification.anomaly_type, AnomalyType::PowerSystemDegradation);
    assert_eq!(classification.severity, Severity::High);

    let classification = classify(&sample(60.0, 20.0), default_rules());
    assert_eq!(classification.anomaly_type, AnomalyType::PowerSystemDegradation);
    assert_eq!(classification.severity, Severity::Medium);
}

#[test]
fn thermal_rule_escalates_outside_the_wide_band() {
    let classification = classify(&sample(95.0, 90.0), default_rules());
    assert_eq!(classification.anomaly_type, AnomalyType::ThermalAnomaly);
    assert_eq!(classification.severity, Severity::Critical);

    let classification = classify(&sample(95.0, 65.0), default_rules());
    assert_eq!(classification.severity, Severity::Medium);

    let classification = classify(&sample(95.0, -15.0), default_rules());
    assert_eq!(classification.severity, Severity::Medium);

    let classification = classify(&sample(95.0, -25.0), default_rules());
    assert_eq!(classification.severity, Severity::Critical);
}

#[test]
fn first_matching_rule_wins() {
    // Both the power and thermal conditions hold; the power rule is
    // earlier in the table and must take precedence.
    let classification = classify(&sample(40.0, 90.0), default_rules());
    assert_eq!(classification.anomaly_type, AnomalyType::PowerSystemDegradation);
}

#[test]
fn unmatched_samples_fall_through_to_sensor_malfunction() {
    let classification = classify(&sample(95.0, 20.0), default_rules());
    assert_eq!(classification.anomaly_type, AnomalyType::SensorMalfunction);
    assert_eq!(classification.severity, Severity::High);
}

#[test]
fn classification_is_deterministic() {
    let s = sample(40.0, 90.0);
    let first = classify(&s, default_rules());
    for _ in 0..10 {
        assert_eq!(classify(&s, default_rules()), first);
    }
}
