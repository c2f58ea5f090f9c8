//! Store Module
//!
//! The seam between this layer and the external key-value store.
//!
//! Every durable operation is delegated through the [`KeyValueStore`]
//! trait. [`RedisStore`] is the production backend; [`MemoryStore`] is an
//! in-process backend used by the test suite.

mod memory;
mod redis;

// Re-export public types
pub use memory::MemoryStore;
pub use redis::RedisStore;

use crate::error::Result;

// == Key Value Store Trait ==
/// Blocking interface to an external key-value store.
///
/// Methods take `&self`; backends that need a mutable connection keep it
/// behind a lock. Single-key atomicity (increment, append, set) is the
/// backend's responsibility; nothing here spans multiple keys atomically.
pub trait KeyValueStore {
    /// Writes `value` verbatim under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Reads the raw bytes at `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the integer at `key` by one and returns the new value.
    ///
    /// An absent key counts from an implicit zero.
    fn incr(&self, key: &str) -> Result<i64>;

    /// Returns true if `key` currently holds a value.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Appends `value` to the tail of the list at `key`.
    fn rpush(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the list elements at `key` between `start` and `stop`,
    /// both inclusive. Negative indices count from the tail, so
    /// `lrange(key, 0, -1)` returns the whole list. An absent key is an
    /// empty list.
    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Writes `value` under `key` with an expiry of `ttl_secs` seconds.
    fn setex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()>;

    /// Discards every entry in the store.
    fn flush_all(&self) -> Result<()>;
}
