use super::explain::{ExplainEntry, Explainable};
use crate::expr::Expression;

/// Compute output columns from the single child's output.
///
/// The number of output columns is always the number of expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalProject {
    pub projections: Vec<Expression>,
}

impl Explainable for LogicalProject {
    fn explain_entry(&self) -> ExplainEntry {
        ExplainEntry::new("Project").with_values("projections", &self.projections)
    }
}
