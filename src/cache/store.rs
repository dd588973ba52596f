//! Cache Store Module
//!
//! The map behind the expiring cache. Not synchronised on its own; the
//! [`Cache`](crate::cache::Cache) wraps it in a single lock shared with the
//! reaper.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// URL-keyed payload storage with activity counters.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Payloads by request URL
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores `payload` under `key`, replacing any previous entry and
    /// resetting its age.
    pub fn insert(&mut self, key: String, payload: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(payload));
        self.stats.record_store();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    ///
    /// Age is not checked here; expiry belongs to [`reap`](Self::reap).
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.payload.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry older than `ttl`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_older_than(ttl));
        let removed = before - self.entries.len();

        self.stats.record_reaped(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
