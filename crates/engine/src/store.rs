//! Single-slot document cache owned by an endpoint.
//!
//! The slot holds the most recently fetched document together with the
//! parameter instance that requested it. A lookup only hits when it is given
//! that same instance; an equal but separately built parameter set misses.

use std::sync::Arc;

use scraper_types::Parameters;
use serde_json::Value;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct DataStore {
    // Holding the handle keeps its allocation alive, so its identity cannot be reused.
    last_parameters: Parameters,
    data: Arc<Value>,
}

/// The cache slot of one [`Endpoint`](crate::Endpoint).
///
/// The lock is only held while reading or replacing the slot, never across a
/// fetch.
#[derive(Debug, Default)]
pub struct StoreCache {
    slot: Mutex<Option<DataStore>>,
}

impl StoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached document when `parameters` is the instance it was fetched with.
    pub async fn lookup(&self, parameters: &Parameters) -> Option<Arc<Value>> {
        let slot = self.slot.lock().await;
        slot.as_ref()
            .filter(|store| store.last_parameters.same_instance(parameters))
            .map(|store| Arc::clone(&store.data))
    }

    /// Replaces the slot wholesale.
    pub async fn replace(&self, parameters: &Parameters, data: Arc<Value>) {
        let mut slot = self.slot.lock().await;
        *slot = Some(DataStore {
            last_parameters: parameters.clone(),
            data,
        });
    }

    /// The cached document regardless of which parameters produced it.
    #[cfg(test)]
    async fn current(&self) -> Option<Arc<Value>> {
        self.slot.lock().await.as_ref().map(|store| Arc::clone(&store.data))
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.slot.lock().await.is_none()
    }
}
