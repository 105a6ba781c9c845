//! Anomaly classification as an explicit ordered decision table. The
//! first matching rule wins and the order is part of the contract; tests
//! pin both the order and the severity escalation thresholds.

use orbitwatch_domain::{AnomalyType, Classification, Severity, TelemetrySample};

pub struct ClassificationRule {
    pub name: &'static str,
    pub anomaly_type: AnomalyType,
    matches: fn(&TelemetrySample) -> Option<Severity>,
}

impl ClassificationRule {
    pub fn evaluate(&self, sample: &TelemetrySample) -> Option<Classification> {
        (self.matches)(sample).map(|severity| Classification {
            anomaly_type: self.anomaly_type,
            severity,
        })
    }
}

fn power_degradation(sample: &TelemetrySample) -> Option<Severity> {
    if sample.power_pct < 70.0 {
        Some(if sample.power_pct < 50.0 {
            Severity::High
        } else {
            Severity::Medium
        })
    } else {
        None
    }
}

fn thermal_band(sample: &TelemetrySample) -> Option<Severity> {
    let t = sample.temperature_c;
    if t > 60.0 || t < -10.0 {
        Some(if t > 80.0 || t < -20.0 {
            Severity::Critical
        } else {
            Severity::Medium
        })
    } else {
        None
    }
}

fn sensor_default(_sample: &TelemetrySample) -> Option<Severity> {
    Some(Severity::High)
}

static RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        name: "power-degradation",
        anomaly_type: AnomalyType::PowerSystemDegradation,
        matches: power_degradation,
    },
    ClassificationRule {
        name: "thermal-band",
        anomaly_type: AnomalyType::ThermalAnomaly,
        matches: thermal_band,
    },
    ClassificationRule {
        name: "sensor-default",
        anomaly_type: AnomalyType::SensorMalfunction,
        matches: sensor_default,
    },
];

pub fn default_rules() -> &'static [ClassificationRule] {
    &RULES
}

/// First matching rule wins; the final rule is total, so every anomalous
/// sample classifies.
pub fn classify(sample: &TelemetrySample, rules: &[ClassificationRule]) -> Classification {
    rules
        .iter()
        .find_map(|rule| rule.evaluate(sample))
        .unwrap_or(Classification {
            anomaly_type: AnomalyType::SensorMalfunction,
            severity: Severity::High,
        })
}
