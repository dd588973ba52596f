//! Cache Module
//!
//! Provides the in-memory read-through cache with background TTL reaping.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use expiring::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
