//! Integration Tests for the Instrumented Cache
//!
//! Exercises the public API end-to-end over the in-process store:
//! store/retrieve round-trips, call counting, history recording, and
//! replay rendering.

use anyhow::Result;
use kvtrace::{replay, Cache, KeyValueStore, MemoryStore, Value};

// == Helper Functions ==

fn new_cache() -> Result<Cache<MemoryStore>> {
    // Log output is opt-in via RUST_LOG when debugging a failure
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    Ok(Cache::new(MemoryStore::new())?)
}

const STORE_OP: &str = Cache::<MemoryStore>::STORE_OP;

// == Round-Trip Tests ==

#[test]
fn test_store_text_and_retrieve_as_text() -> Result<()> {
    let cache = new_cache()?;

    let key = cache.store("foo")?;
    assert_eq!(cache.retrieve_text(&key)?, Some("foo".to_string()));

    Ok(())
}

#[test]
fn test_store_int_and_retrieve_as_int() -> Result<()> {
    let cache = new_cache()?;

    let key = cache.store(123)?;
    assert_eq!(cache.retrieve_int(&key)?, Some(123));

    Ok(())
}

#[test]
fn test_store_bytes_round_trip_bit_for_bit() -> Result<()> {
    let cache = new_cache()?;
    let raw = vec![0u8, 255, 128, 7];

    let key = cache.store(raw.clone())?;
    assert_eq!(cache.retrieve(&key)?, Some(raw));

    Ok(())
}

#[test]
fn test_store_float_round_trip() -> Result<()> {
    let cache = new_cache()?;

    let key = cache.store(Value::Float(2.5))?;
    assert_eq!(cache.retrieve_text(&key)?, Some("2.5".to_string()));

    Ok(())
}

#[test]
fn test_never_stored_key_retrieves_none() -> Result<()> {
    let cache = new_cache()?;

    assert_eq!(cache.retrieve("no-such-key")?, None);

    Ok(())
}

// == Instrumentation Tests ==

#[test]
fn test_three_stores_count_to_three() -> Result<()> {
    let cache = new_cache()?;

    for value in ["a", "b", "c"] {
        cache.store(value)?;
    }

    let raw = cache.kv().get(STORE_OP)?;
    assert_eq!(raw, Some(b"3".to_vec()));

    Ok(())
}

#[test]
fn test_history_sequences_grow_in_step() -> Result<()> {
    let cache = new_cache()?;

    for i in 0..5 {
        cache.store(i)?;
    }

    let inputs = cache.kv().lrange("Cache.store:inputs", 0, -1)?;
    let outputs = cache.kv().lrange("Cache.store:outputs", 0, -1)?;
    assert_eq!(inputs.len(), 5);
    assert_eq!(outputs.len(), 5);

    Ok(())
}

// == Replay Tests ==

#[test]
fn test_replay_pairs_arguments_with_returned_keys() -> Result<()> {
    let cache = new_cache()?;

    let keys = ["a", "b", "c"]
        .iter()
        .map(|v| cache.store(*v))
        .collect::<kvtrace::Result<Vec<_>>>()?;

    let report = replay(cache.kv(), STORE_OP)?;
    assert_eq!(report.calls, 3);
    assert_eq!(report.records.len(), 3);
    for (record, key) in report.records.iter().zip(&keys) {
        assert_eq!(&record.output, key);
    }

    Ok(())
}

#[test]
fn test_replay_renders_header_and_one_line_per_call() -> Result<()> {
    let cache = new_cache()?;

    for value in ["a", "b", "c"] {
        cache.store(value)?;
    }

    let rendered = replay(cache.kv(), STORE_OP)?.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Cache.store was called 3 times:");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Cache.store(*(\"a\",)) -> "));

    Ok(())
}

#[test]
fn test_replay_of_uncalled_operation_reports_zero() -> Result<()> {
    let cache = new_cache()?;

    let report = replay(cache.kv(), STORE_OP)?;
    assert_eq!(report.calls, 0);
    assert!(report.records.is_empty());
    assert_eq!(report.to_string(), "Cache.store was called 0 times:\n");

    Ok(())
}

// == Lifecycle Tests ==

#[test]
fn test_cache_init_discards_previous_session_state() -> Result<()> {
    let store = MemoryStore::new();
    store.set("survivor", b"from last session")?;
    store.incr(STORE_OP)?;

    let cache = Cache::new(store)?;

    assert_eq!(cache.retrieve("survivor")?, None);
    assert_eq!(replay(cache.kv(), STORE_OP)?.calls, 0);

    Ok(())
}
