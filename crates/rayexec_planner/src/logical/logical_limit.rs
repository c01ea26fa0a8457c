use super::explain::{ExplainEntry, Explainable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLimit {
    pub offset: Option<usize>,
    pub limit: usize,
}

impl Explainable for LogicalLimit {
    fn explain_entry(&self) -> ExplainEntry {
        let ent = ExplainEntry::new("Limit").with_value("limit", self.limit);
        match self.offset {
            Some(offset) => ent.with_value("offset", offset),
            None => ent,
        }
    }
}
