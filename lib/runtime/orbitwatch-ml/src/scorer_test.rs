use chrono::{TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use orbitwatch_domain::config::ScoringConfig;
use orbitwatch_domain::{AnomalyType, MonitorError, Severity, TelemetrySample};

use crate::registry::ModelRegistry;
use crate::scorer::Scorer;
use crate::trainer::Trainer;

pub(crate) fn healthy_sample(noise: &mut ChaCha8Rng) -> TelemetrySample {
    let mut jitter = |spread: f64| noise.gen_range(-spread..spread);
    TelemetrySample {
        altitude_km: 412.0 + jitter(2.0),
        velocity_km_s: 7.66 + jitter(0.02),
        power_pct: 90.0 + jitter(2.0),
        temperature_c: 20.0 + jitter(2.0),
        communication_pct: 95.0 + jitter(2.0),
        voltage_v: 12.0 + jitter(0.4),
        solar_efficiency_pct: 85.0 + jitter(2.0),
        attitude_control_pct: 95.0 + jitter(2.0),
        fuel_level_pct: 80.0 + jitter(3.0),
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub(crate) fn healthy_corpus(len: usize, seed: u64) -> Vec<TelemetrySample> {
    let mut noise = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| healthy_sample(&mut noise)).collect()
}

fn trained_registry() -> (ModelRegistry, Scorer) {
    let config = ScoringConfig::default();
    let registry = ModelRegistry::new();
    let trainer = Trainer::new(config.min_training_samples, config.model_seed);
    let set = trainer.fit(&healthy_corpus(128, 5)).unwrap();
    registry.install(25544, set);
    (registry, Scorer::from_config(&config))
}

#[test]
fn untrained_object_scores_neutral_and_healthy() {
    let registry = ModelRegistry::new();
    let scorer = Scorer::from_config(&ScoringConfig::default());
    let mut noise = ChaCha8Rng::seed_from_u64(9);
    let report = scorer.score(&registry, 99999, &healthy_sample(&mut noise));

    assert!(!report.trained);
    assert!(!report.is_anomaly);
    assert_eq!(report.aggregate_health, 100.0);
    assert!(report.classification.is_none());
}

#[test]
fn empty_corpus_defers_training_and_scoring_stays_neutral() {
    let config = ScoringConfig::default();
    let trainer = Trainer::new(config.min_training_samples, config.model_seed);
    let err = trainer.fit(&[]).unwrap_err();
    assert!(matches!(
        err,
        MonitorError::TrainingDataInsufficient { got: 0, required: 1 }
    ));

    // Nothing was installed, so a subsequent score returns the
    // untrained-default healthy result.
    let registry = ModelRegistry::new();
    let scorer = Scorer::from_config(&config);
    let mut noise = ChaCha8Rng::seed_from_u64(2);
    let report = scorer.score(&registry, 25544, &healthy_sample(&mut noise));
    assert!(!report.trained);
    assert!(!report.is_anomaly);
}

#[test]
fn nominal_telemetry_is_not_anomalous() {
    let (registry, scorer) = trained_registry();
    // The centre of the training distribution: normalizes to roughly the
    // zero vector, so all three models should report full health.
    let centred = TelemetrySample {
        altitude_km: 412.0,
        velocity_km_s: 7.66,
        power_pct: 90.0,
        temperature_c: 20.0,
        communication_pct: 95.0,
        voltage_v: 12.0,
        solar_efficiency_pct: 85.0,
        attitude_control_pct: 95.0,
        fuel_level_pct: 80.0,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    };
    let report = scorer.score(&registry, 25544, &centred);

    assert!(report.trained);
    assert!(
        report.aggregate_health >= scorer.anomaly_health_threshold,
        "healthy sample scored {}",
        report.aggregate_health
    );
    assert!(!report.is_anomaly);
}

#[test]
fn degraded_power_classifies_high_severity() {
    let (registry, scorer) = trained_registry();
    let mut noise = ChaCha8Rng::seed_from_u64(6);
    let mut sample = healthy_sample(&mut noise);
    sample.power_pct = 40.0;
    sample.voltage_v = 10.2;
    sample.solar_efficiency_pct = 38.0;

    let report = scorer.score(&registry, 25544, &sample);
    assert!(report.is_anomaly, "aggregate {}", report.aggregate_health);
    let classification = report.classification.unwrap();
    assert_eq!(classification.anomaly_type, AnomalyType::PowerSystemDegradation);
    assert_eq!(classification.severity, Severity::High);
}

#[test]
fn overheating_classifies_critical_thermal() {
    let (registry, scorer) = trained_registry();
    let mut noise = ChaCha8Rng::seed_from_u64(7);
    let mut sample = healthy_sample(&mut noise);
    sample.power_pct = 95.0;
    sample.temperature_c = 90.0;

    let report = scorer.score(&registry, 25544, &sample);
    assert!(report.is_anomaly, "aggregate {}", report.aggregate_health);
    let classification = report.classification.unwrap();
    assert_eq!(classification.anomaly_type, AnomalyType::ThermalAnomaly);
    assert_eq!(classification.severity, Severity::Critical);
}

#[test]
fn aggregate_health_is_bounded_for_extreme_inputs() {
    let (registry, scorer) = trained_registry();
    let mut noise = ChaCha8Rng::seed_from_u64(8);
    let mut sample = healthy_sample(&mut noise);
    sample.power_pct = 0.0;
    sample.temperature_c = 1.0e9;
    sample.fuel_level_pct = -1.0e9;

    let report = scorer.score(&registry, 25544, &sample);
    assert!((0.0..=100.0).contains(&report.aggregate_health));
    for health in [
        report.scores.reconstruction_health,
        report.scores.isolation_health,
        report.scores.margin_health,
    ] {
        assert!((0.0..=100.0).contains(&health));
    }
}

#[test]
fn training_is_reproducible_for_a_fixed_seed() {
    let config = ScoringConfig::default();
    let corpus = healthy_corpus(64, 21);
    let trainer = Trainer::new(config.min_training_samples, config.model_seed);
    let scorer = Scorer::from_config(&config);

    let first = trainer.fit(&corpus).unwrap();
    let second = trainer.fit(&corpus).unwrap();
    let mut noise = ChaCha8Rng::seed_from_u64(23);
    let probe = healthy_sample(&mut noise);

    let a = scorer.score_with(&first, 1, &probe);
    let b = scorer.score_with(&second, 1, &probe);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.aggregate_health, b.aggregate_health);
}
