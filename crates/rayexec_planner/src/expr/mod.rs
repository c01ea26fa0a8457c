pub mod arith_expr;
pub mod column_expr;
pub mod comparison_expr;
pub mod literal_expr;
pub mod scalar_function_expr;

use std::fmt;

use arith_expr::{ArithExpr, ArithOperator};
use column_expr::ColumnExpr;
use comparison_expr::{ComparisonExpr, ComparisonOperator};
use literal_expr::{LiteralExpr, ScalarValue};
use rayexec_error::{RayexecError, Result};
use scalar_function_expr::ScalarFunctionExpr;

use crate::datatype::DataType;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Arith(ArithExpr),
    Column(ColumnExpr),
    Comparison(ComparisonExpr),
    Literal(LiteralExpr),
    ScalarFunction(ScalarFunctionExpr),
}

impl Expression {
    pub const fn column(column: usize) -> Self {
        Expression::Column(ColumnExpr { column })
    }

    pub fn lit(literal: ScalarValue) -> Self {
        Expression::Literal(LiteralExpr { literal })
    }

    pub fn arith(op: ArithOperator, left: Expression, right: Expression) -> Self {
        Expression::Arith(ArithExpr {
            left: Box::new(left),
            right: Box::new(right),
            op,
        })
    }

    pub fn compare(op: ComparisonOperator, left: Expression, right: Expression) -> Self {
        Expression::Comparison(ComparisonExpr {
            left: Box::new(left),
            right: Box::new(right),
            op,
        })
    }

    /// Get the output type of this expression when evaluated against an input
    /// with the given column types.
    pub fn datatype(&self, input: &[DataType]) -> Result<DataType> {
        Ok(match self {
            Self::Arith(expr) => {
                let left = expr.left.datatype(input)?;
                let right = expr.right.datatype(input)?;
                expr.return_type(left, right)?
            }
            Self::Column(col) => match input.get(col.column) {
                Some(datatype) => *datatype,
                None => {
                    return Err(RayexecError::invariant_violation(format!(
                        "Invalid column index '{}', input has {} columns",
                        col.column,
                        input.len()
                    )))
                }
            },
            Self::Comparison(_) => DataType::Boolean,
            Self::Literal(expr) => expr.literal.datatype(),
            Self::ScalarFunction(expr) => expr.return_type,
        })
    }

    /// Returns the input column if this is a bare column reference.
    pub const fn as_column_ref(&self) -> Option<usize> {
        match self {
            Self::Column(col) => Some(col.column),
            _ => None,
        }
    }

    /// Returns the highest column index referenced anywhere in this
    /// expression.
    pub fn max_column_ref(&self) -> Option<usize> {
        match self {
            Self::Arith(arith) => arith.left.max_column_ref().max(arith.right.max_column_ref()),
            Self::Column(col) => Some(col.column),
            Self::Comparison(comp) => comp.left.max_column_ref().max(comp.right.max_column_ref()),
            Self::Literal(_) => None,
            Self::ScalarFunction(scalar) => scalar
                .inputs
                .iter()
                .filter_map(|input| input.max_column_ref())
                .max(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arith(expr) => write!(f, "{}", expr),
            Self::Column(expr) => write!(f, "{}", expr),
            Self::Comparison(expr) => write!(f, "{}", expr),
            Self::Literal(expr) => write!(f, "{}", expr),
            Self::ScalarFunction(expr) => write!(f, "{}", expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested() {
        let expr = Expression::arith(
            ArithOperator::Add,
            Expression::column(0),
            Expression::lit(ScalarValue::Int64(1)),
        );
        assert_eq!("#0 + 1", expr.to_string());
    }

    #[test]
    fn datatype_requires_matching_arith_inputs() {
        let expr = Expression::arith(
            ArithOperator::Mul,
            Expression::column(0),
            Expression::column(1),
        );
        let datatype = expr
            .datatype(&[DataType::Float64, DataType::Float64])
            .unwrap();
        assert_eq!(DataType::Float64, datatype);

        expr.datatype(&[DataType::Int64, DataType::Float64])
            .unwrap_err();
    }

    #[test]
    fn datatype_out_of_range_column() {
        let err = Expression::column(3)
            .datatype(&[DataType::Int64])
            .unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn max_column_ref_nested() {
        let expr = Expression::compare(
            ComparisonOperator::Gt,
            Expression::arith(
                ArithOperator::Sub,
                Expression::column(4),
                Expression::column(1),
            ),
            Expression::lit(ScalarValue::Int64(0)),
        );
        assert_eq!(Some(4), expr.max_column_ref());
        assert_eq!(
            None,
            Expression::lit(ScalarValue::Utf8("a".to_string())).max_column_ref()
        );
    }

    #[test]
    fn max_column_ref_function_inputs() {
        let expr = Expression::ScalarFunction(ScalarFunctionExpr {
            name: "coalesce".to_string(),
            inputs: vec![
                Expression::column(2),
                Expression::lit(ScalarValue::Null),
                Expression::column(5),
            ],
            return_type: DataType::Int64,
        });
        assert_eq!(Some(5), expr.max_column_ref());
    }

    #[test]
    fn column_ref_only_for_bare_columns() {
        assert_eq!(Some(3), Expression::column(3).as_column_ref());
        let expr = Expression::arith(
            ArithOperator::Add,
            Expression::column(3),
            Expression::lit(ScalarValue::Int64(0)),
        );
        assert_eq!(None, expr.as_column_ref());
    }
}
