use std::sync::Arc;

use rayexec_error::Result;

use super::explain::{ExplainEntry, Explainable};
use crate::datatype::DataType;
use crate::table::TableHandle;

/// Represents a scan from a table.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalScan {
    /// Table being scanned.
    pub source: Arc<TableHandle>,

    /// Positional column projections into the table's full column list.
    ///
    /// May repeat or reorder columns.
    pub projection: Vec<usize>,
}

impl LogicalScan {
    /// Create a new scan, erroring if any column in the projection doesn't
    /// exist in the table.
    pub fn try_new(source: Arc<TableHandle>, projection: Vec<usize>) -> Result<Self> {
        source.check_projection(&projection)?;
        Ok(LogicalScan { source, projection })
    }

    /// Scan every column in the table in the table's order.
    pub fn all_columns(source: Arc<TableHandle>) -> Self {
        let projection = (0..source.num_columns()).collect();
        LogicalScan { source, projection }
    }

    /// Create a new scan on the same table with a different projection.
    pub fn with_projection(&self, projection: Vec<usize>) -> Result<Self> {
        Self::try_new(self.source.clone(), projection)
    }

    pub fn num_output_columns(&self) -> usize {
        self.projection.len()
    }

    /// Types of the columns produced by this scan.
    pub fn output_types(&self) -> Result<Vec<DataType>> {
        self.source.check_projection(&self.projection)?;
        Ok(self
            .projection
            .iter()
            .map(|&col| self.source.column_types[col])
            .collect())
    }

    /// Names of the columns produced by this scan.
    pub fn output_names(&self) -> Vec<&str> {
        self.projection
            .iter()
            .filter_map(|&col| self.source.column_names.get(col).map(|s| s.as_str()))
            .collect()
    }
}

impl Explainable for LogicalScan {
    fn explain_entry(&self) -> ExplainEntry {
        ExplainEntry::new("Scan")
            .with_value("table", &self.source.name)
            .with_values("projection", &self.projection)
    }
}
