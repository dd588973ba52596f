//! Expiring Cache Module
//!
//! Thread-safe read-through cache shared by the API client. Owns its reaper.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;
use crate::tasks::{spawn_reaper, ReaperHandle};

// == Cache ==
/// URL-keyed payload cache with background age-based eviction.
///
/// Every access, the reaper's sweep included, goes through one mutex that is
/// held only for the map operation. Dropping the cache cancels the reaper.
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
    reaper: ReaperHandle,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current runtime.
    ///
    /// # Errors
    /// [`CacheError::NoRuntime`] when called outside a tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self, CacheError> {
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        let store = Arc::new(Mutex::new(CacheStore::new()));
        let reaper = spawn_reaper(&runtime, store.clone(), ttl);

        Ok(Self { store, ttl, reaper })
    }

    // == Store ==
    /// Inserts or overwrites the payload for `key`.
    pub async fn store(&self, key: impl Into<String>, payload: impl Into<Vec<u8>>) {
        let key = key.into();
        let payload = payload.into();
        debug!(key = %key, bytes = payload.len(), "cache store");

        self.store.lock().await.insert(key, payload);
    }

    // == Lookup ==
    /// Returns the payload for `key` if it is present right now.
    pub async fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().await.get(key)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the activity counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// The running reaper, for callers that need to observe or stop it.
    pub fn reaper(&self) -> &ReaperHandle {
        &self.reaper
    }

    // == Shutdown ==
    /// Stops the reaper. Stored entries stay readable but no longer expire.
    pub fn shutdown(&self) {
        self.reaper.cancel();
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        self.reaper.cancel();
    }
}
