use tokio::sync::broadcast;

use orbitwatch_domain::{AnomalyEvent, DashboardSnapshot, OutboundEvent};
use orbitwatch_ports::EventEmitter;

/// Fans outbound events to any number of subscribers over a broadcast
/// channel. Sending never blocks and never fails the core: with no
/// subscribers, or with lagging ones, events are simply dropped at the
/// boundary.
pub struct BroadcastEmitter {
    tx: broadcast::Sender<OutboundEvent>,
}

impl BroadcastEmitter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OutboundEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventEmitter for BroadcastEmitter {
    fn emit_snapshot(&self, snapshot: DashboardSnapshot) {
        let _ = self.tx.send(OutboundEvent::Snapshot(snapshot));
    }

    fn emit_alert(&self, event: AnomalyEvent) {
        let _ = self.tx.send(OutboundEvent::Alert(event));
    }
}
