//! Replay Module
//!
//! Reads an operation's counter and history back out of the store and
//! renders them as a [`CallReport`]. Pure read path; nothing here
//! mutates the store.

use crate::cache::decode;
use crate::cache::instrument::{inputs_key, outputs_key};
use crate::error::Result;
use crate::models::{CallRecord, CallReport};
use crate::store::KeyValueStore;

// == Replay Reporter ==
/// Reads recorded instrumentation state for named operations.
pub struct ReplayReporter<'s, S: KeyValueStore> {
    store: &'s S,
}

impl<'s, S: KeyValueStore> ReplayReporter<'s, S> {
    /// Creates a reporter over `store`.
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    // == Report ==
    /// Builds the replay report for `operation`.
    ///
    /// The counter reads as 0 when its key is absent. Inputs and outputs
    /// are paired index-wise up to the shorter sequence; trailing
    /// unpaired entries are dropped.
    pub fn report(&self, operation: &str) -> Result<CallReport> {
        let calls = if self.store.exists(operation)? {
            match self.store.get(operation)? {
                Some(raw) => decode::as_int(&raw)? as u64,
                None => 0,
            }
        } else {
            0
        };

        let inputs = self.store.lrange(&inputs_key(operation), 0, -1)?;
        let outputs = self.store.lrange(&outputs_key(operation), 0, -1)?;

        let records = inputs
            .iter()
            .zip(outputs.iter())
            .map(|(input, output)| CallRecord {
                input: String::from_utf8_lossy(input).into_owned(),
                output: String::from_utf8_lossy(output).into_owned(),
            })
            .collect();

        Ok(CallReport::new(operation, calls, records))
    }
}

/// Builds the replay report for `operation` over `store`.
pub fn replay<S: KeyValueStore>(store: &S, operation: &str) -> Result<CallReport> {
    ReplayReporter::new(store).report(operation)
}
