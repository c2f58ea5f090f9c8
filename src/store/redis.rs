//! Redis Store Module
//!
//! Production [`KeyValueStore`] backend over a synchronous Redis connection.

use parking_lot::Mutex;
use redis::Commands;
use tracing::debug;

use crate::error::Result;
use crate::store::KeyValueStore;

// == Redis Store ==
/// A [`KeyValueStore`] backed by a Redis server.
///
/// The connection lives behind a mutex so the store can be shared by
/// reference; every trait method is one blocking round-trip.
pub struct RedisStore {
    /// Synchronous connection to the server
    conn: Mutex<redis::Connection>,
}

impl RedisStore {
    // == Constructor ==
    /// Connects to the Redis server at `url`.
    ///
    /// # Arguments
    /// * `url` - Connection URL, e.g. `redis://127.0.0.1/`
    pub fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection()?;
        debug!("connected to key-value store at {}", url);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Connects using the store URL from a [`Config`](crate::config::Config).
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::connect(&config.store_url)
    }
}

impl KeyValueStore for RedisStore {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.lock();
        conn.set::<_, _, ()>(key, value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.lock();
        let value: Option<Vec<u8>> = conn.get(key)?;
        Ok(value)
    }

    fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.lock();
        let count: i64 = conn.incr(key, 1)?;
        Ok(count)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.lock();
        let present: bool = conn.exists(key)?;
        Ok(present)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.lock();
        conn.rpush::<_, _, ()>(key, value)?;
        Ok(())
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.lock();
        let items: Vec<Vec<u8>> = conn.lrange(key, start as isize, stop as isize)?;
        Ok(items)
    }

    fn setex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.lock();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)?;
        Ok(())
    }

    fn flush_all(&self) -> Result<()> {
        let mut conn = self.conn.lock();
        redis::cmd("FLUSHALL").query::<()>(&mut *conn)?;
        Ok(())
    }
}
