use std::fmt;

use rayexec_error::{RayexecError, Result};

use super::Expression;
use crate::datatype::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for ArithOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArithExpr {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub op: ArithOperator,
}

impl ArithExpr {
    /// Compute the return type given the types of the two inputs.
    ///
    /// Both inputs must be the same numeric type, no casting is done here.
    pub fn return_type(&self, left: DataType, right: DataType) -> Result<DataType> {
        match (left, right) {
            (l, r) if l == r && l.is_numeric() => Ok(l),
            (l, r) => Err(RayexecError::new(format!(
                "Cannot apply '{}' to {l} and {r}",
                self.op
            ))),
        }
    }
}

impl fmt::Display for ArithExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
