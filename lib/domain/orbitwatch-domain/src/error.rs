use thiserror::Error;

use crate::orbit::PropagationStatus;

/// Recoverable, object- or cycle-local failures of the monitoring core.
/// Only `Config` is fatal, and only at startup.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("propagation failed for object {norad_id}: {status:?} (code {})", .status.code())]
    Propagation {
        norad_id: u32,
        status: PropagationStatus,
    },

    #[error("element set fetch failed: {0}")]
    DataFetch(String),

    #[error("element set provider rejected the supplied credentials")]
    AuthenticationFailed,

    #[error("malformed element set for object {norad_id}: {reason}")]
    ElementSetMalformed { norad_id: u32, reason: String },

    #[error("training corpus too small: got {got}, required {required}")]
    TrainingDataInsufficient { got: usize, required: usize },

    #[error("no trained model set for object {norad_id}")]
    ModelNotTrained { norad_id: u32 },

    #[error("telemetry channel {channel} carries a non-finite value {value}")]
    TelemetryInvalid { channel: &'static str, value: f64 },

    #[error("a monitoring session is still stopping; retry after it has joined")]
    ConcurrencyConflict,

    #[error("configuration error: {0}")]
    Config(String),
}
