//! Domain models and invariants.

pub mod anomaly;
pub mod command;
pub mod config;
pub mod elements;
pub mod error;
pub mod orbit;
pub mod snapshot;
pub mod telemetry;

pub use anomaly::{
    AnomalyEvent, AnomalyType, Classification, ModelScores, ScoreReport, Severity,
};
pub use command::{
    Credentials, DashboardRequest, ManualAlertRequest, ManualPredictRequest, ManualTrainRequest,
    RsoRef,
};
pub use config::{MonitorConfig, ProviderConfig, SchedulerConfig, ScoringConfig, SynthesisConfig};
pub use elements::ElementSet;
pub use error::MonitorError;
pub use orbit::{GeodeticPosition, OrbitalState, PropagationStatus};
pub use snapshot::{
    DashboardSnapshot, LogEntry, LogLevel, OutboundEvent, RsoState, RsoStatus, RsoSummary,
    Subframe, TechniqueCoverage,
};
pub use telemetry::{TelemetryChannel, TelemetrySample, CHANNEL_COUNT};

#[cfg(test)]
mod telemetry_test;
