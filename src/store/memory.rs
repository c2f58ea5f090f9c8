//! Memory Store Module
//!
//! In-process [`KeyValueStore`] backend with lazy TTL expiry.
//!
//! Backs the test suite so the default `cargo test` run needs no server;
//! also usable as a standalone backend for single-process diagnostics.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

use crate::error::Result;
use crate::store::KeyValueStore;

// == Entry ==
/// A stored value with optional expiration.
#[derive(Debug, Clone)]
struct Entry {
    /// The stored bytes
    value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    expires_at: Option<u64>,
}

impl Entry {
    /// Creates a new entry with optional TTL in seconds.
    fn new(value: Vec<u8>, ttl_secs: Option<u64>) -> Self {
        let expires_at = ttl_secs.map(|ttl| current_timestamp_ms() + ttl * 1000);
        Self { value, expires_at }
    }

    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to the expiration time, so an expired entry
    /// is indistinguishable from one that was never written.
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == State ==
/// Scalar entries and lists, kept apart the way the backing store
/// keeps its value types apart.
#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    lists: HashMap<String, Vec<Vec<u8>>>,
}

// == Memory Store ==
/// An in-process key-value store with lazy TTL expiry.
///
/// Expired entries are removed when read; there is no background sweep.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live scalar entry, removing it first if it has expired.
    fn live_value(state: &mut State, key: &str) -> Option<Vec<u8>> {
        match state.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                state.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut state = self.state.write();
        state
            .entries
            .insert(key.to_string(), Entry::new(value.to_vec(), None));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut state = self.state.write();
        Ok(Self::live_value(&mut state, key))
    }

    fn incr(&self, key: &str) -> Result<i64> {
        let mut state = self.state.write();

        // An absent key counts from an implicit zero
        let current = match Self::live_value(&mut state, key) {
            Some(raw) => String::from_utf8(raw)?.parse::<i64>()?,
            None => 0,
        };
        let next = current + 1;

        // Incrementing preserves any expiry already on the key
        let expires_at = state.entries.get(key).and_then(|e| e.expires_at);
        state.entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string().into_bytes(),
                expires_at,
            },
        );

        Ok(next)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let mut state = self.state.write();
        Ok(Self::live_value(&mut state, key).is_some())
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut state = self.state.write();
        state
            .lists
            .entry(key.to_string())
            .or_default()
            .push(value.to_vec());
        Ok(())
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let state = self.state.read();
        let Some(list) = state.lists.get(key) else {
            return Ok(Vec::new());
        };

        let len = list.len() as i64;
        // Negative indices count from the tail, both bounds inclusive
        let start = if start < 0 { (len + start).max(0) } else { start };
        let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
        if start > stop || start >= len {
            return Ok(Vec::new());
        }

        Ok(list[start as usize..=stop as usize].to_vec())
    }

    fn setex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()> {
        let mut state = self.state.write();
        state.entries.insert(
            key.to_string(),
            Entry::new(value.to_vec(), Some(ttl_secs)),
        );
        Ok(())
    }

    fn flush_all(&self) -> Result<()> {
        let mut state = self.state.write();
        state.entries.clear();
        state.lists.clear();
        Ok(())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
