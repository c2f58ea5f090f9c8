//! Report Module
//!
//! DTOs produced when replaying the recorded history of an operation.

use std::fmt;

use serde::Serialize;

/// One paired (input, output) entry from an operation's history.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    /// The rendered arguments the call was made with
    pub input: String,
    /// The rendered value the call returned
    pub output: String,
}

/// The replayed history of one instrumented operation.
#[derive(Debug, Clone, Serialize)]
pub struct CallReport {
    /// Qualified operation name
    pub operation: String,
    /// Total recorded invocations (from the call counter)
    pub calls: u64,
    /// Paired history entries, in call order
    pub records: Vec<CallRecord>,
}

impl CallReport {
    /// Creates a new CallReport.
    pub fn new(operation: impl Into<String>, calls: u64, records: Vec<CallRecord>) -> Self {
        Self {
            operation: operation.into(),
            calls,
            records,
        }
    }
}

// == Display ==
/// Renders the human-readable report: a header with the call count,
/// then one line per paired history entry.
impl fmt::Display for CallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.operation, self.calls)?;
        for record in &self.records {
            writeln!(
                f,
                "{}(*{}) -> {}",
                self.operation, record.input, record.output
            )?;
        }
        Ok(())
    }
}
