//! Cache module for storing API responses to disk
//!
//! This module provides a bucketed key-value store persisted as a single JSON
//! blob with per-entry timestamps and one store-wide TTL. Reads and writes fail
//! soft: corrupted or unavailable storage degrades to an empty store so the
//! application keeps working without caching.

mod store;

pub use store::{Bucket, CacheStore, DEFAULT_TTL_HOURS};
