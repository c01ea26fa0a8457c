use std::fmt;

use fmtutil::IntoDisplayableSlice;

use super::Expression;
use crate::datatype::DataType;

/// A call to some scalar function.
///
/// The function itself is opaque to planning; only its name, inputs, and
/// return type are known.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarFunctionExpr {
    pub name: String,
    pub inputs: Vec<Expression>,
    pub return_type: DataType,
}

impl fmt::Display for ScalarFunctionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.inputs.display_as_list())
    }
}
