//! Port traits at the seams of the monitoring core.

use async_trait::async_trait;

use orbitwatch_domain::{
    AnomalyEvent, Credentials, DashboardSnapshot, ElementSet, MonitorError,
};

/// External element-set provider. Authentication failures must surface as
/// `MonitorError::AuthenticationFailed`, not as an empty result, so the
/// scheduler can report them without crashing.
#[async_trait]
pub trait ElementSetProvider: Send + Sync {
    async fn fetch_element_sets(
        &self,
        credentials: &Credentials,
        object_ids: &[u32],
    ) -> Result<Vec<ElementSet>, MonitorError>;
}

/// Outbound fan-out boundary. Emission is fire-and-forget: the core never
/// blocks on subscriber delivery.
pub trait EventEmitter: Send + Sync {
    fn emit_snapshot(&self, snapshot: DashboardSnapshot);
    fn emit_alert(&self, event: AnomalyEvent);
}

/// Emitter that drops everything; used in tests and as a wiring default.
#[derive(Clone, Default)]
pub struct NullEmitter;

impl EventEmitter for NullEmitter {
    fn emit_snapshot(&self, _snapshot: DashboardSnapshot) {}

    fn emit_alert(&self, _event: AnomalyEvent) {}
}
