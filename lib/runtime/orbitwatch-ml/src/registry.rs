use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::trainer::ModelSet;

/// Owner of every trained model set, keyed by NORAD id. Readers get an
/// `Arc` snapshot; retraining replaces the entry in one swap, so a
/// concurrent scorer sees either the complete old set or the complete new
/// one, never a mix.
#[derive(Default)]
pub struct ModelRegistry {
    inner: RwLock<HashMap<u32, Arc<ModelSet>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, norad_id: u32) -> Option<Arc<ModelSet>> {
        self.inner
            .read()
            .expect("model registry lock poisoned")
            .get(&norad_id)
            .cloned()
    }

    /// Atomic install; the lock is held only for the map insert, never for
    /// a fit.
    pub fn install(&self, norad_id: u32, set: ModelSet) {
        self.inner
            .write()
            .expect("model registry lock poisoned")
            .insert(norad_id, Arc::new(set));
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .expect("model registry lock poisoned")
            .clear();
    }

    pub fn trained_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .inner
            .read()
            .expect("model registry lock poisoned")
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("model registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
