//! Monitoring orchestration: shared context, background scheduler,
//! dashboard assembly and the inbound command surface.

pub mod context;
pub mod dashboard;
pub mod emitter;
pub mod scheduler;
pub mod service;

pub use context::{MonitorContext, MonitoredObject};
pub use emitter::BroadcastEmitter;
pub use scheduler::{Scheduler, SchedulerState};
pub use service::MonitorService;

#[cfg(test)]
mod dashboard_test;
