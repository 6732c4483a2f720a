//! Admission control for concurrent probes.

use std::sync::Arc;

use anyhow::{Context, ensure};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A counting gate that lets at most `capacity` holders through at once.
///
/// Slots are released when the returned [`Slot`] is dropped, so a task that
/// fails or panics gives its slot back on unwind.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// Proof of admission. Dropping it frees the slot.
#[derive(Debug)]
pub struct Slot {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionGate {
    pub fn new(capacity: usize) -> anyhow::Result<Self> {
        ensure!(capacity >= 1, "admission gate needs at least one slot");
        ensure!(
            capacity <= Semaphore::MAX_PERMITS,
            "admission gate capacity {capacity} exceeds {}",
            Semaphore::MAX_PERMITS
        );

        Ok(Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Waits until a slot frees up.
    pub async fn admit(&self) -> anyhow::Result<Slot> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .context("admission gate closed")?;
        Ok(Slot { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
