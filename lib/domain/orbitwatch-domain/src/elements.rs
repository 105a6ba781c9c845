use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetched element set for a tracked object.
///
/// Immutable once fetched; a provider refresh replaces the whole value
/// rather than patching fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSet {
    pub norad_id: u32,
    pub name: String,
    pub line1: String,
    pub line2: String,
    pub epoch: DateTime<Utc>,
}

impl ElementSet {
    pub fn object_id(&self) -> String {
        format!("sat_{}", self.norad_id)
    }
}
