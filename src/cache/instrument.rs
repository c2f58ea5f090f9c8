//! Call Instrumentation Module
//!
//! Two composable wrappers that can be applied around any storage
//! operation: a call counter and a call-history recorder. Both keep
//! their state in the external store so it survives with the rest of
//! the data and can be read back by the replay reporter.

use tracing::debug;

use crate::error::Result;
use crate::models::Value;
use crate::store::KeyValueStore;

// == Key Naming ==
/// Returns the list key holding an operation's recorded inputs.
pub fn inputs_key(operation: &str) -> String {
    format!("{}:inputs", operation)
}

/// Returns the list key holding an operation's recorded outputs.
pub fn outputs_key(operation: &str) -> String {
    format!("{}:outputs", operation)
}

/// Renders positional arguments as a single display string, the form
/// appended to the inputs list.
pub fn render_args(args: &[Value]) -> String {
    match args {
        [single] => format!("({},)", single),
        _ => {
            let joined = args
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("({})", joined)
        }
    }
}

// == Call Counter ==
/// Counts invocations of one operation under its qualified name.
///
/// The increment happens unconditionally before delegation: an
/// operation that fails afterwards stays counted. Only a store failure
/// on the increment itself propagates.
pub struct CallCounter<'s, S: KeyValueStore> {
    store: &'s S,
    operation: &'s str,
}

impl<'s, S: KeyValueStore> CallCounter<'s, S> {
    /// Wraps calls to `operation`, counting them in `store`.
    pub fn new(store: &'s S, operation: &'s str) -> Self {
        Self { store, operation }
    }

    /// Increments the call counter, then runs `op`.
    pub fn invoke<T>(&self, op: impl FnOnce() -> Result<T>) -> Result<T> {
        let count = self.store.incr(self.operation)?;
        debug!(operation = self.operation, count, "call counted");
        op()
    }
}

// == Call History ==
/// Records one operation's inputs and outputs as two append-only lists.
///
/// The input entry is appended before delegation; the output entry only
/// after a successful return. A failing call therefore leaves the
/// inputs list one entry longer than the outputs list.
pub struct CallHistory<'s, S: KeyValueStore> {
    store: &'s S,
    operation: &'s str,
}

impl<'s, S: KeyValueStore> CallHistory<'s, S> {
    /// Wraps calls to `operation`, recording them in `store`.
    pub fn new(store: &'s S, operation: &'s str) -> Self {
        Self { store, operation }
    }

    /// Records `args`, runs `op`, records its return value on success.
    pub fn invoke<T>(&self, args: &[Value], op: impl FnOnce() -> Result<T>) -> Result<T>
    where
        T: Clone + Into<Value>,
    {
        self.store
            .rpush(&inputs_key(self.operation), render_args(args).as_bytes())?;

        let output = op()?;

        let rendered: Value = output.clone().into();
        self.store
            .rpush(&outputs_key(self.operation), &rendered.to_bytes())?;
        Ok(output)
    }
}

// == Instrumented ==
/// Both wrappers composed, history outermost, so one logical invocation
/// produces one counter increment and one matched input/output pair.
pub struct Instrumented<'s, S: KeyValueStore> {
    counter: CallCounter<'s, S>,
    history: CallHistory<'s, S>,
}

impl<'s, S: KeyValueStore> Instrumented<'s, S> {
    /// Wraps calls to `operation` with counting and history recording.
    pub fn new(store: &'s S, operation: &'s str) -> Self {
        Self {
            counter: CallCounter::new(store, operation),
            history: CallHistory::new(store, operation),
        }
    }

    /// Runs `op` under both wrappers.
    ///
    /// Store effect order for a successful call: input appended, counter
    /// incremented, operation delegated, output appended.
    pub fn invoke<T>(&self, args: &[Value], op: impl FnOnce() -> Result<T>) -> Result<T>
    where
        T: Clone + Into<Value>,
    {
        self.history.invoke(args, || self.counter.invoke(op))
    }
}
