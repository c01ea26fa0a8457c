use std::fmt;

use rayexec_error::{RayexecError, Result};

use crate::datatype::DataType;

/// Handle to a table that can be scanned.
///
/// Only describes the table. Reading the data is the job of whatever
/// executes the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    pub name: String,
    pub column_names: Vec<String>,
    pub column_types: Vec<DataType>,
}

impl TableHandle {
    pub fn try_new(
        name: impl Into<String>,
        column_names: Vec<String>,
        column_types: Vec<DataType>,
    ) -> Result<Self> {
        let name = name.into();
        if column_names.len() != column_types.len() {
            return Err(RayexecError::invariant_violation(format!(
                "Table '{name}' has {} column names but {} column types",
                column_names.len(),
                column_types.len()
            )));
        }

        Ok(TableHandle {
            name,
            column_names,
            column_types,
        })
    }

    /// Create a table handle from (name, type) pairs.
    pub fn from_columns<S: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (S, DataType)>,
    ) -> Self {
        let (column_names, column_types) = columns
            .into_iter()
            .map(|(name, datatype)| (name.into(), datatype))
            .unzip();

        TableHandle {
            name: name.into(),
            column_names,
            column_types,
        }
    }

    pub fn num_columns(&self) -> usize {
        self.column_types.len()
    }

    /// Check that every index is a valid column in this table.
    pub fn check_projection(&self, projection: &[usize]) -> Result<()> {
        if let Some(&col) = projection.iter().find(|&&col| col >= self.num_columns()) {
            return Err(RayexecError::invariant_violation(format!(
                "Column index {col} out of range for table '{}' with {} columns",
                self.name,
                self.num_columns()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
