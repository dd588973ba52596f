//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with age tracking.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored response body and the moment it was stored.
///
/// Entries are never mutated; a second store for the same key replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Raw response bytes
    pub payload: Vec<u8>,
    /// Monotonic insertion time
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Older Than ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Strictly greater: an entry exactly `ttl` old is kept until the next
    /// sweep.
    pub fn is_older_than(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}
