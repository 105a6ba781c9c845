use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MonitorError;

/// Default NORAD catalog ids monitored when the config names none: ISS and
/// a spread of LEO/MEO science and communication objects.
pub const DEFAULT_OBJECT_IDS: [u32; 10] = [
    25544, 28654, 39084, 25994, 27424, 39634, 41866, 20580, 40697, 40115,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub object_ids: Vec<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.space-track.org".to_string(),
            object_ids: DEFAULT_OBJECT_IDS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between monitoring cycles.
    pub cycle_interval_secs: u64,
    /// New samples accumulated per object before a retrain fires.
    pub retrain_threshold: usize,
    /// Newest anomaly events kept in the in-memory log.
    pub max_log_entries: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cycle_interval_secs: 30,
            retrain_threshold: 100,
            max_log_entries: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Reconstruction-error knee `T_r` of the health transform.
    pub reconstruction_error_threshold: f64,
    /// Aggregate health below this declares an anomaly.
    pub anomaly_health_threshold: f64,
    /// Hard floor on the training corpus size.
    pub min_training_samples: usize,
    /// Seed for the isolation-tree sampler.
    pub model_seed: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            reconstruction_error_threshold: 0.5,
            anomaly_health_threshold: 75.0,
            min_training_samples: 1,
            model_seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Seed for the telemetry noise source. `None` draws from entropy.
    pub noise_seed: Option<u64>,
    /// Synthetic samples per object for the initial training corpus.
    pub training_corpus_size: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            noise_seed: None,
            training_corpus_size: 64,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub provider: ProviderConfig,
    pub scheduler: SchedulerConfig,
    pub scoring: ScoringConfig,
    pub synthesis: SynthesisConfig,
}

impl MonitorConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, MonitorError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::Config(format!("read {}: {e}", path.display())))?;
        serde_yaml::from_str(&raw)
            .map_err(|e| MonitorError::Config(format!("parse {}: {e}", path.display())))
    }
}
