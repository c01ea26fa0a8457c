use super::explain::{ExplainEntry, Explainable};

/// Produces a single row with no columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalEmpty;

impl Explainable for LogicalEmpty {
    fn explain_entry(&self) -> ExplainEntry {
        ExplainEntry::new("Empty")
    }
}
