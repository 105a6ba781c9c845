//! Background task lifecycle: an explicit Idle/Running/Stopping state
//! machine with watch-channel cancellation and a join-before-restart
//! guarantee.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::{watch, MutexGuard};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopping,
}

#[derive(Default)]
struct SchedulerInner {
    stop: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

/// Owns the one long-lived cycle task. `restart` serializes callers on an
/// async mutex: whoever holds the guard has stopped and joined the
/// previous task, so no two cycles ever overlap for one object set.
pub struct Scheduler {
    inner: tokio::sync::Mutex<SchedulerInner>,
    state: Arc<Mutex<SchedulerState>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: tokio::sync::Mutex::new(SchedulerInner::default()),
            state: Arc::new(Mutex::new(SchedulerState::Idle)),
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.lock().expect("scheduler state lock poisoned")
    }

    fn set_state(state: &Arc<Mutex<SchedulerState>>, next: SchedulerState) {
        *state.lock().expect("scheduler state lock poisoned") = next;
    }

    /// Signals the running task, waits for it to fully exit, and returns a
    /// guard that may launch the replacement. Shared state must only be
    /// mutated while holding the guard.
    pub async fn restart(&self) -> RestartGuard<'_> {
        let mut inner = self.inner.lock().await;
        if let Some(stop) = inner.stop.take() {
            Self::set_state(&self.state, SchedulerState::Stopping);
            let _ = stop.send(true);
        }
        if let Some(handle) = inner.handle.take() {
            if let Err(error) = handle.await {
                tracing::warn!(%error, "previous cycle task ended abnormally");
            }
        }
        Self::set_state(&self.state, SchedulerState::Idle);
        RestartGuard {
            inner,
            state: self.state.clone(),
        }
    }

    /// Stop without launching a replacement.
    pub async fn stop(&self) {
        let _guard = self.restart().await;
    }
}

pub struct RestartGuard<'a> {
    inner: MutexGuard<'a, SchedulerInner>,
    state: Arc<Mutex<SchedulerState>>,
}

impl RestartGuard<'_> {
    /// Launches the new cycle task. The task receives the stop receiver
    /// and must exit promptly once it observes `true`.
    pub fn launch<F, Fut>(mut self, task: F)
    where
        F: FnOnce(watch::Receiver<bool>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let state = self.state.clone();
        Scheduler::set_state(&state, SchedulerState::Running);
        let future = task(stop_rx);
        let handle = tokio::spawn(async move {
            future.await;
            // A task that ran to completion on its own also returns the
            // scheduler to Idle; a stop-triggered exit is set by restart.
            let mut state = state.lock().expect("scheduler state lock poisoned");
            if *state == SchedulerState::Running {
                *state = SchedulerState::Idle;
            }
        });
        self.inner.stop = Some(stop_tx);
        self.inner.handle = Some(handle);
    }
}
