// Single-flight save guard
// At most one save per composition id runs at a time; later ones queue
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-id async locks for composition saves
#[derive(Default)]
pub struct SaveGuard {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Held for the duration of one save
pub struct SaveTicket {
    id: String,
    _guard: OwnedMutexGuard<()>,
}

impl SaveTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl SaveGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other save for `id` is in flight, then claim it
    pub async fn acquire(&self, id: &str) -> SaveTicket {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
            // Drop slots nobody holds or waits on
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(id.to_string()).or_default())
        };

        let guard = slot.lock_owned().await;
        SaveTicket {
            id: id.to_string(),
            _guard: guard,
        }
    }

    /// True while a save for `id` holds its ticket
    pub fn is_in_flight(&self, id: &str) -> bool {
        let slots = self.slots.lock().unwrap_or_else(|p| p.into_inner());
        slots
            .get(id)
            .map(|slot| slot.try_lock().is_err())
            .unwrap_or(false)
    }
}
