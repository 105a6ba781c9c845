use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use uuid::Uuid;

use orbitwatch_domain::{AnomalyEvent, ElementSet, MonitorConfig, RsoState, TelemetrySample};
use orbitwatch_ml::ModelRegistry;
use orbitwatch_orbits::MeanElements;

/// An element set together with its parsed mean elements.
#[derive(Debug, Clone)]
pub struct MonitoredObject {
    pub set: ElementSet,
    pub elements: MeanElements,
}

/// The one owner of all shared monitoring state. Components receive the
/// context explicitly; synchronization is an internal detail of it, not
/// ambient module state.
///
/// Locks guard short reads and writes only. Model fitting never runs under
/// any of these locks; the registry install is the single atomic step.
pub struct MonitorContext {
    pub config: MonitorConfig,
    pub registry: ModelRegistry,
    objects: RwLock<Vec<MonitoredObject>>,
    states: RwLock<HashMap<u32, RsoState>>,
    log: Mutex<VecDeque<AnomalyEvent>>,
    buffers: Mutex<HashMap<u32, Vec<TelemetrySample>>>,
    sequence: AtomicU64,
}

impl MonitorContext {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            registry: ModelRegistry::new(),
            objects: RwLock::new(Vec::new()),
            states: RwLock::new(HashMap::new()),
            log: Mutex::new(VecDeque::new()),
            buffers: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Clears all session state. Only called after the previous cycle task
    /// has fully stopped; the scheduler enforces that ordering.
    pub fn reset_session(&self) {
        self.registry.clear();
        self.objects.write().expect("object list lock poisoned").clear();
        self.states.write().expect("state map lock poisoned").clear();
        self.log.lock().expect("anomaly log lock poisoned").clear();
        self.buffers.lock().expect("sample buffer lock poisoned").clear();
        self.sequence.store(0, Ordering::SeqCst);
    }

    pub fn replace_objects(&self, objects: Vec<MonitoredObject>) {
        *self.objects.write().expect("object list lock poisoned") = objects;
    }

    pub fn extend_objects(&self, additions: Vec<MonitoredObject>) {
        let mut objects = self.objects.write().expect("object list lock poisoned");
        for addition in additions {
            if let Some(existing) = objects
                .iter_mut()
                .find(|object| object.set.norad_id == addition.set.norad_id)
            {
                *existing = addition;
            } else {
                objects.push(addition);
            }
        }
    }

    pub fn objects(&self) -> Vec<MonitoredObject> {
        self.objects.read().expect("object list lock poisoned").clone()
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().expect("object list lock poisoned").len()
    }

    /// Monotonic per-session sequence joined to a uuid: ordered within a
    /// session, unique across them.
    pub fn next_event_id(&self) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        format!("{sequence}-{}", Uuid::new_v4())
    }

    /// Prepends the newest event and drops the oldest beyond the
    /// configured cap.
    pub fn append_event(&self, event: AnomalyEvent) {
        let mut log = self.log.lock().expect("anomaly log lock poisoned");
        log.push_front(event);
        log.truncate(self.config.scheduler.max_log_entries);
    }

    /// Events newest first.
    pub fn events(&self) -> Vec<AnomalyEvent> {
        self.log
            .lock()
            .expect("anomaly log lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub fn flag_event(&self, id: &str) -> bool {
        let mut log = self.log.lock().expect("anomaly log lock poisoned");
        match log.iter_mut().find(|event| event.id == id) {
            Some(event) => {
                event.flagged = true;
                true
            }
            None => false,
        }
    }

    /// Buffers a sample for retraining. Once the buffer crosses the
    /// configured threshold it is handed back drained; the caller fits on
    /// it outside any lock.
    pub fn record_sample(&self, norad_id: u32, sample: TelemetrySample) -> Option<Vec<TelemetrySample>> {
        let mut buffers = self.buffers.lock().expect("sample buffer lock poisoned");
        let buffer = buffers.entry(norad_id).or_default();
        buffer.push(sample);
        if buffer.len() > self.config.scheduler.retrain_threshold {
            Some(std::mem::take(buffer))
        } else {
            None
        }
    }

    pub fn buffered_len(&self, norad_id: u32) -> usize {
        self.buffers
            .lock()
            .expect("sample buffer lock poisoned")
            .get(&norad_id)
            .map_or(0, Vec::len)
    }

    pub fn update_state(&self, state: RsoState) {
        self.states
            .write()
            .expect("state map lock poisoned")
            .insert(state.norad_id, state);
    }

    pub fn state_of(&self, norad_id: u32) -> Option<RsoState> {
        self.states
            .read()
            .expect("state map lock poisoned")
            .get(&norad_id)
            .cloned()
    }
}
