use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vhscan_common::models::ProbeResult;

/// Append-only result collection shared by every probe task.
///
/// Clones share the same storage. Entries keep completion order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    inner: Arc<Mutex<Vec<ProbeResult>>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: ProbeResult) {
        self.lock().push(result);
    }

    /// Takes the collected results, copying them out if other handles are still alive.
    pub fn into_vec(self) -> Vec<ProbeResult> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    // A panic while holding the lock can only interrupt a Vec::push, which leaves the Vec intact.
    fn lock(&self) -> MutexGuard<'_, Vec<ProbeResult>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
