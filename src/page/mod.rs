//! Page Cache Module
//!
//! Caches fetched web page content with a short time-to-live and counts
//! every fetch attempt per URL. Independent of the instrumented cache;
//! only the store is shared infrastructure.

mod fetcher;

pub use fetcher::{HttpFetcher, PageFetcher};

use tracing::debug;

use crate::cache::decode;
use crate::error::Result;
use crate::store::KeyValueStore;

// == Public Constants ==
/// How long a fetched page stays cached, in seconds.
pub const RESULT_TTL_SECS: u64 = 10;

// == Key Naming ==
/// Returns the counter key recording fetch attempts for `url`.
fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

/// Returns the key holding the cached page content for `url`.
fn result_key(url: &str) -> String {
    format!("result:{}", url)
}

// == Page Cache ==
/// A fetch wrapper with per-URL attempt counting and a time-limited
/// result cache.
pub struct PageCache<S: KeyValueStore, F: PageFetcher> {
    /// Handle to the external key-value store
    kv: S,
    /// The wrapped page fetch
    fetcher: F,
    /// Result TTL in seconds
    ttl_secs: u64,
}

impl<S: KeyValueStore, F: PageFetcher> PageCache<S, F> {
    // == Constructor ==
    /// Creates a page cache with the standard 10-second result TTL.
    pub fn new(kv: S, fetcher: F) -> Self {
        Self {
            kv,
            fetcher,
            ttl_secs: RESULT_TTL_SECS,
        }
    }

    /// Overrides the result TTL. Intended for tests; production callers
    /// keep the standard expiry.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    // == Get ==
    /// Returns the page content for `url`, fetching on a cache miss.
    ///
    /// The attempt counter is incremented first, hit or miss. A failing
    /// fetch propagates after the increment and caches nothing.
    pub fn get(&self, url: &str) -> Result<String> {
        self.kv.incr(&count_key(url))?;

        if let Some(raw) = self.kv.get(&result_key(url))? {
            debug!(url, "page cache hit");
            return decode::as_text(&raw);
        }

        debug!(url, "page cache miss, fetching");
        let body = self.fetcher.fetch(url)?;
        self.kv.setex(&result_key(url), self.ttl_secs, body.as_bytes())?;

        Ok(body)
    }

    // == Fetch Count ==
    /// Returns the total fetch attempts recorded for `url` (0 if none).
    pub fn fetch_count(&self, url: &str) -> Result<i64> {
        match self.kv.get(&count_key(url))? {
            Some(raw) => decode::as_int(&raw),
            None => Ok(0),
        }
    }
}
