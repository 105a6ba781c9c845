//! Anomaly model training and scoring for monitored objects.

pub mod classify;
pub mod isolation;
pub mod margin;
pub mod normalize;
pub mod reconstruction;
pub mod registry;
pub mod scorer;
pub mod trainer;

pub use classify::{classify, default_rules, ClassificationRule};
pub use isolation::IsolationForest;
pub use margin::MarginModel;
pub use normalize::NormalizationStats;
pub use reconstruction::ReconstructionModel;
pub use registry::ModelRegistry;
pub use scorer::Scorer;
pub use trainer::{corpus_matrix, AnomalyModel, ModelSet, Trainer};

#[cfg(test)]
mod classify_test;
#[cfg(test)]
mod normalize_test;
#[cfg(test)]
mod registry_test;
#[cfg(test)]
mod scorer_test;
