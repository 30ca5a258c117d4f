use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::source::domain::frame_source::FrameSource;

/// String-id keyed lookup of live frame sources.
///
/// The registration side (UI wiring, capture setup) and the query side (a
/// render loop calling detect) share this through an `Arc`; registration may
/// happen at any time relative to queries.
pub struct FrameSourceRegistry {
    sources: Mutex<HashMap<String, Arc<dyn FrameSource>>>,
}

impl FrameSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Mutex::new(HashMap::new()),
        }
    }

    /// Register `source` under `id`, replacing any previous entry.
    pub fn register(&self, id: impl Into<String>, source: Arc<dyn FrameSource>) {
        self.lock().insert(id.into(), source);
    }

    /// Remove the entry for `id`. Returns whether one existed.
    pub fn unregister(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn FrameSource>> {
        self.lock().get(id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<dyn FrameSource>>> {
        self.sources.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FrameSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
