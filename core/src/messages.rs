//! Process-wide, append-only activity log.

use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to an ordered list of human-readable messages.
///
/// Clones share the same underlying list, so the composition root can hand
/// one copy to the service and keep another for display.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "message logged");
        self.lock().push(message);
    }

    /// Snapshot of all entries in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
