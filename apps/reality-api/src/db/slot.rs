use std::sync::{Arc, OnceLock};

use super::store::ShowStore;

/// Write-once holder for the store handle.
///
/// The server starts accepting connections before the database is reachable;
/// the handle is installed once the connection succeeds and never replaced.
#[derive(Clone, Default)]
pub struct StoreSlot {
    inner: Arc<OnceLock<Arc<dyn ShowStore>>>,
}

impl StoreSlot {
    /// An empty slot. Requests are refused until [`StoreSlot::install`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot that is ready from the start.
    pub fn ready(store: Arc<dyn ShowStore>) -> Self {
        let slot = Self::empty();
        slot.install(store);
        slot
    }

    /// Install the handle. Returns `false` if one was already installed.
    pub fn install(&self, store: Arc<dyn ShowStore>) -> bool {
        self.inner.set(store).is_ok()
    }

    pub fn get(&self) -> Option<Arc<dyn ShowStore>> {
        self.inner.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;

    #[test]
    fn install_is_write_once() {
        let slot = StoreSlot::empty();
        assert!(!slot.is_ready());
        assert!(slot.get().is_none());

        assert!(slot.install(Arc::new(MemoryStore::new())));
        assert!(slot.is_ready());
        assert!(!slot.install(Arc::new(MemoryStore::new())));
    }

    #[test]
    fn clones_share_the_handle() {
        let slot = StoreSlot::empty();
        let clone = slot.clone();
        slot.install(Arc::new(MemoryStore::new()));
        assert!(clone.is_ready());
    }
}
