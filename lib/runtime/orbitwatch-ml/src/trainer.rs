use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use orbitwatch_domain::{MonitorError, TelemetrySample, CHANNEL_COUNT};

use crate::isolation::IsolationForest;
use crate::margin::MarginModel;
use crate::normalize::NormalizationStats;
use crate::reconstruction::ReconstructionModel;

const TREE_COUNT: usize = 100;
const MAX_TREE_SAMPLES: usize = 256;
const VARIANCE_TARGET: f64 = 0.9;

/// The scoring contract every model satisfies. Fitting happens in each
/// model's constructor; the core never depends on anything beyond this.
pub trait AnomalyModel: Send + Sync {
    fn raw_score(&self, sample: &Array1<f64>) -> f64;
}

/// One object's trained models plus the statistics they were fitted
/// under. Created whole by the trainer, read-only afterwards, and only
/// ever replaced as a unit.
pub struct ModelSet {
    pub stats: NormalizationStats,
    pub reconstruction: Box<dyn AnomalyModel>,
    pub isolation: Box<dyn AnomalyModel>,
    pub margin: Box<dyn AnomalyModel>,
    pub trained_at: DateTime<Utc>,
    pub corpus_len: usize,
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet")
            .field("stats", &self.stats)
            .field("trained_at", &self.trained_at)
            .field("corpus_len", &self.corpus_len)
            .finish_non_exhaustive()
    }
}

/// Flattens samples into a row-per-sample matrix in canonical channel
/// order. The same function feeds training and inference so the order
/// cannot drift between them.
pub fn corpus_matrix(samples: &[TelemetrySample]) -> Array2<f64> {
    let mut flat = Vec::with_capacity(samples.len() * CHANNEL_COUNT);
    for sample in samples {
        flat.extend_from_slice(&sample.as_vector());
    }
    Array2::from_shape_vec((samples.len(), CHANNEL_COUNT), flat)
        .unwrap_or_else(|_| Array2::zeros((0, CHANNEL_COUNT)))
}

#[derive(Debug, Clone)]
pub struct Trainer {
    pub min_samples: usize,
    pub seed: u64,
}

impl Trainer {
    pub fn new(min_samples: usize, seed: u64) -> Self {
        Self {
            min_samples: min_samples.max(1),
            seed,
        }
    }

    /// Fits the full model set for one object. This can take a while on a
    /// large corpus; callers must not hold any shared lock across it.
    pub fn fit(&self, samples: &[TelemetrySample]) -> Result<ModelSet, MonitorError> {
        if samples.len() < self.min_samples {
            return Err(MonitorError::TrainingDataInsufficient {
                got: samples.len(),
                required: self.min_samples,
            });
        }

        let corpus = corpus_matrix(samples);
        let stats = NormalizationStats::fit(&corpus);
        let normalized = stats.apply_matrix(&corpus);

        let reconstruction = ReconstructionModel::fit(&normalized, VARIANCE_TARGET);
        let isolation = IsolationForest::fit(
            &normalized,
            TREE_COUNT,
            MAX_TREE_SAMPLES,
            ChaCha8Rng::seed_from_u64(self.seed),
        );
        let margin = MarginModel::fit(&normalized);

        Ok(ModelSet {
            stats,
            reconstruction: Box::new(reconstruction),
            isolation: Box::new(isolation),
            margin: Box::new(margin),
            trained_at: Utc::now(),
            corpus_len: samples.len(),
        })
    }
}
