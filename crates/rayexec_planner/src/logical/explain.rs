use std::fmt;

use fmtutil::IntoDisplayableSlice;

use super::operator::LogicalOperator;

/// Describes an operator for EXPLAIN-like output.
pub trait Explainable {
    fn explain_entry(&self) -> ExplainEntry;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainEntry {
    pub name: String,
    /// Key/value pairs, in the order they were added.
    pub items: Vec<(String, String)>,
}

impl ExplainEntry {
    pub fn new(name: impl Into<String>) -> Self {
        ExplainEntry {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.items.push((key.into(), value.to_string()));
        self
    }

    pub fn with_values<T: fmt::Display>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        let values: Vec<_> = values.into_iter().map(|v| v.to_string()).collect();
        self.items
            .push((key.into(), values.display_with_brackets().to_string()));
        self
    }
}

impl fmt::Display for ExplainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.items.is_empty() {
            return Ok(());
        }

        write!(f, " (")?;
        for (idx, (key, value)) in self.items.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key} = {value}")?;
        }
        write!(f, ")")
    }
}

/// Format a plan as an indented tree, one operator per line.
pub fn format_logical_plan(plan: &LogicalOperator) -> String {
    fn inner(plan: &LogicalOperator, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(depth), plan.explain_entry()));
        for child in plan.children() {
            inner(child, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    inner(plan, 0, &mut lines);
    lines.join("\n")
}
