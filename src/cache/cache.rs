//! Cache Module
//!
//! Opaque-key storage over an external key-value store. Every `store`
//! call is instrumented: counted under the qualified operation name and
//! recorded in the call history.

use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::decode;
use crate::cache::instrument::Instrumented;
use crate::error::Result;
use crate::models::Value;
use crate::store::KeyValueStore;

// == Cache ==
/// Stores scalar values under generated opaque keys.
///
/// Owns its store handle; nothing here is a process-wide singleton.
pub struct Cache<S: KeyValueStore> {
    /// Handle to the external key-value store
    kv: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Qualified name `store` is instrumented under. The counter lives at
    /// this key, the history lists at `Cache.store:inputs` and
    /// `Cache.store:outputs`.
    pub const STORE_OP: &'static str = "Cache.store";

    // == Constructor ==
    /// Creates a cache over `kv`, discarding all existing entries.
    ///
    /// The flush means prior state from any earlier session is gone:
    /// caches are non-additive across restarts.
    pub fn new(kv: S) -> Result<Self> {
        kv.flush_all()?;
        info!("cache initialized, existing store entries flushed");
        Ok(Self { kv })
    }

    // == Store ==
    /// Writes `value` verbatim under a fresh UUID key and returns the key.
    pub fn store(&self, value: impl Into<Value>) -> Result<String> {
        let value = value.into();
        Instrumented::new(&self.kv, Self::STORE_OP).invoke(&[value.clone()], || {
            let key = Uuid::new_v4().to_string();
            self.kv.set(&key, &value.to_bytes())?;
            debug!(key = %key, "value stored");
            Ok(key)
        })
    }

    // == Retrieve ==
    /// Reads the raw bytes at `key`; an absent key is `None`, not an error.
    pub fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.kv.get(key)
    }

    /// Reads the bytes at `key` and applies `decode` when present.
    ///
    /// Absence short-circuits to `None`; decode failures on present
    /// values propagate.
    pub fn retrieve_with<T>(
        &self,
        key: &str,
        decode: impl FnOnce(&[u8]) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.kv.get(key)? {
            Some(raw) => Ok(Some(decode(&raw)?)),
            None => Ok(None),
        }
    }

    /// Reads the value at `key` as UTF-8 text.
    pub fn retrieve_text(&self, key: &str) -> Result<Option<String>> {
        self.retrieve_with(key, decode::as_text)
    }

    /// Reads the value at `key` as a decimal integer.
    pub fn retrieve_int(&self, key: &str) -> Result<Option<i64>> {
        self.retrieve_with(key, decode::as_int)
    }

    // == Store Handle ==
    /// The underlying store handle, for reporters reading counters and
    /// history directly.
    pub fn kv(&self) -> &S {
        &self.kv
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn new_cache() -> Cache<MemoryStore> {
        Cache::new(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_store_retrieve_round_trip() {
        let cache = new_cache();

        let key = cache.store("foo").unwrap();
        assert_eq!(cache.retrieve(&key).unwrap(), Some(b"foo".to_vec()));
    }

    #[test]
    fn test_store_bytes_round_trip() {
        let cache = new_cache();
        let raw = vec![0u8, 1, 2, 255];

        let key = cache.store(raw.clone()).unwrap();
        assert_eq!(cache.retrieve(&key).unwrap(), Some(raw));
    }

    #[test]
    fn test_retrieve_absent_key() {
        let cache = new_cache();
        assert_eq!(cache.retrieve("never-stored").unwrap(), None);
        assert_eq!(cache.retrieve_text("never-stored").unwrap(), None);
    }

    #[test]
    fn test_retrieve_text() {
        let cache = new_cache();

        let key = cache.store("foo").unwrap();
        assert_eq!(cache.retrieve_text(&key).unwrap(), Some("foo".to_string()));
    }

    #[test]
    fn test_retrieve_int() {
        let cache = new_cache();

        let key = cache.store(123).unwrap();
        assert_eq!(cache.retrieve_int(&key).unwrap(), Some(123));
    }

    #[test]
    fn test_retrieve_int_malformed() {
        let cache = new_cache();

        let key = cache.store("not a number").unwrap();
        assert!(cache.retrieve_int(&key).is_err());
    }

    #[test]
    fn test_keys_are_unique() {
        let cache = new_cache();

        let k1 = cache.store("same").unwrap();
        let k2 = cache.store("same").unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_store_is_counted() {
        let cache = new_cache();

        cache.store("a").unwrap();
        cache.store("b").unwrap();
        cache.store("c").unwrap();

        let raw = cache.kv().get(Cache::<MemoryStore>::STORE_OP).unwrap();
        assert_eq!(raw, Some(b"3".to_vec()));
    }

    #[test]
    fn test_store_history_lengths_match() {
        let cache = new_cache();

        for v in ["a", "b"] {
            cache.store(v).unwrap();
        }

        let inputs = cache.kv().lrange("Cache.store:inputs", 0, -1).unwrap();
        let outputs = cache.kv().lrange("Cache.store:outputs", 0, -1).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(outputs.len(), 2);
    }

    #[test]
    fn test_history_output_is_the_key() {
        let cache = new_cache();

        let key = cache.store("foo").unwrap();
        let outputs = cache.kv().lrange("Cache.store:outputs", 0, -1).unwrap();
        assert_eq!(outputs, vec![key.into_bytes()]);
    }

    #[test]
    fn test_new_flushes_existing_state() {
        let store = MemoryStore::new();
        store.set("stale", b"left over").unwrap();

        let cache = Cache::new(store).unwrap();
        assert_eq!(cache.retrieve("stale").unwrap(), None);
    }
}
