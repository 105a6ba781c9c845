use orbitwatch_domain::config::ScoringConfig;
use orbitwatch_domain::{ModelScores, ScoreReport, TelemetrySample};

use crate::classify::{classify, default_rules};
use crate::registry::ModelRegistry;
use crate::trainer::ModelSet;

/// Maps raw model outputs onto the common 0-100 health scale and applies
/// the anomaly threshold. Higher is healthier on every axis.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub reconstruction_error_threshold: f64,
    pub anomaly_health_threshold: f64,
}

impl Scorer {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            reconstruction_error_threshold: config.reconstruction_error_threshold,
            anomaly_health_threshold: config.anomaly_health_threshold,
        }
    }

    /// `100 * (1 - min(e / T_r, 1))`: zero error is perfect health, the
    /// configured knee and anything beyond it is zero.
    pub fn health_from_error(&self, error: f64) -> f64 {
        let ratio = (error / self.reconstruction_error_threshold).clamp(0.0, 1.0);
        100.0 * (1.0 - ratio)
    }

    /// `100 * (1 - min(max(-s, 0), 1))` for signed scores where negative
    /// means anomalous: non-negative scores are perfect health, -1 and
    /// below is zero.
    pub fn health_from_signed(&self, score: f64) -> f64 {
        100.0 * (1.0 - (-score).clamp(0.0, 1.0))
    }

    /// Scores one sample against the object's installed model set. A
    /// missing entry is the untrained condition: the caller gets the
    /// neutral healthy report rather than an error.
    pub fn score(
        &self,
        registry: &ModelRegistry,
        norad_id: u32,
        sample: &TelemetrySample,
    ) -> ScoreReport {
        match registry.get(norad_id) {
            Some(set) => self.score_with(&set, norad_id, sample),
            None => {
                tracing::debug!(norad_id, "no trained model set, returning neutral result");
                ScoreReport::untrained(norad_id)
            }
        }
    }

    pub fn score_with(
        &self,
        set: &ModelSet,
        norad_id: u32,
        sample: &TelemetrySample,
    ) -> ScoreReport {
        let normalized = set.stats.apply(&sample.as_vector());

        let reconstruction_error = set.reconstruction.raw_score(&normalized);
        let isolation_score = set.isolation.raw_score(&normalized);
        let margin_score = set.margin.raw_score(&normalized);

        let scores = ModelScores {
            reconstruction_error,
            isolation_score,
            margin_score,
            reconstruction_health: self.health_from_error(reconstruction_error),
            isolation_health: self.health_from_signed(isolation_score),
            margin_health: self.health_from_signed(margin_score),
        };

        let aggregate_health = ((scores.reconstruction_health
            + scores.isolation_health
            + scores.margin_health)
            / 3.0)
            .clamp(0.0, 100.0);
        let is_anomaly = aggregate_health < self.anomaly_health_threshold;

        ScoreReport {
            norad_id,
            trained: true,
            is_anomaly,
            aggregate_health,
            scores,
            classification: is_anomaly.then(|| classify(sample, default_rules())),
        }
    }
}
