use std::fmt;
use std::sync::Arc;

use rayexec_error::{RayexecError, Result};

use super::explain::{ExplainEntry, Explainable};
use super::logical_empty::LogicalEmpty;
use super::logical_filter::LogicalFilter;
use super::logical_limit::LogicalLimit;
use super::logical_project::LogicalProject;
use super::logical_scan::LogicalScan;
use crate::datatype::DataType;
use crate::expr::Expression;

/// Wrapper around nodes in the logical plan.
///
/// Children are reference counted so that the same subtree can be shared by
/// any number of plans. Nodes are never modified once they're wrapped in an
/// `Arc`; rewrites build new nodes instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<N> {
    /// Node specific logic.
    pub node: N,
    /// Inputs to this node.
    pub children: Vec<Arc<LogicalOperator>>,
}

impl<N> Node<N> {
    pub fn new(node: N, children: Vec<Arc<LogicalOperator>>) -> Self {
        Node { node, children }
    }

    pub fn get_one_child_exact(&self) -> Result<&Arc<LogicalOperator>> {
        if self.children.len() != 1 {
            return Err(RayexecError::invariant_violation(format!(
                "Expected 1 child to operator, have {}",
                self.children.len()
            )));
        }
        Ok(&self.children[0])
    }
}

/// The kind of a logical operator, without any of its contents.
///
/// Used for matching plan shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Project,
    Filter,
    Limit,
    Scan,
    Empty,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "Project"),
            Self::Filter => write!(f, "Filter"),
            Self::Limit => write!(f, "Limit"),
            Self::Scan => write!(f, "Scan"),
            Self::Empty => write!(f, "Empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogicalOperator {
    Project(Node<LogicalProject>),
    Filter(Node<LogicalFilter>),
    Limit(Node<LogicalLimit>),
    Scan(Node<LogicalScan>),
    Empty(Node<LogicalEmpty>),
}

impl LogicalOperator {
    /// Create a scan node.
    pub fn scan(scan: LogicalScan) -> Arc<Self> {
        Arc::new(LogicalOperator::Scan(Node::new(scan, Vec::new())))
    }

    /// Create a project node on top of `input`.
    ///
    /// Errors if any expression references a column that `input` doesn't
    /// produce.
    pub fn project(projections: Vec<Expression>, input: Arc<Self>) -> Result<Arc<Self>> {
        let num_input = input.output_types()?.len();
        check_column_refs(&projections, num_input)?;

        Ok(Arc::new(LogicalOperator::Project(Node::new(
            LogicalProject { projections },
            vec![input],
        ))))
    }

    pub fn filter(filter: Expression, input: Arc<Self>) -> Result<Arc<Self>> {
        let num_input = input.output_types()?.len();
        check_column_refs(std::slice::from_ref(&filter), num_input)?;

        Ok(Arc::new(LogicalOperator::Filter(Node::new(
            LogicalFilter { filter },
            vec![input],
        ))))
    }

    pub fn limit(limit: usize, offset: Option<usize>, input: Arc<Self>) -> Arc<Self> {
        Arc::new(LogicalOperator::Limit(Node::new(
            LogicalLimit { offset, limit },
            vec![input],
        )))
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(LogicalOperator::Empty(Node::new(LogicalEmpty, Vec::new())))
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            Self::Project(_) => OperatorKind::Project,
            Self::Filter(_) => OperatorKind::Filter,
            Self::Limit(_) => OperatorKind::Limit,
            Self::Scan(_) => OperatorKind::Scan,
            Self::Empty(_) => OperatorKind::Empty,
        }
    }

    pub fn children(&self) -> &[Arc<LogicalOperator>] {
        match self {
            Self::Project(n) => &n.children,
            Self::Filter(n) => &n.children,
            Self::Limit(n) => &n.children,
            Self::Scan(n) => &n.children,
            Self::Empty(n) => &n.children,
        }
    }

    /// Create a copy of this operator with different children.
    ///
    /// The number of children must match the number of children on this
    /// operator.
    pub fn with_new_children(&self, children: Vec<Arc<LogicalOperator>>) -> Result<Self> {
        if children.len() != self.children().len() {
            return Err(RayexecError::invariant_violation(format!(
                "{} expects {} children, got {}",
                self.kind(),
                self.children().len(),
                children.len()
            )));
        }

        Ok(match self {
            Self::Project(n) => Self::Project(Node::new(n.node.clone(), children)),
            Self::Filter(n) => Self::Filter(Node::new(n.node.clone(), children)),
            Self::Limit(n) => Self::Limit(Node::new(n.node.clone(), children)),
            Self::Scan(n) => Self::Scan(Node::new(n.node.clone(), children)),
            Self::Empty(n) => Self::Empty(Node::new(n.node, children)),
        })
    }

    /// Get the types of the columns this operator produces.
    pub fn output_types(&self) -> Result<Vec<DataType>> {
        match self {
            Self::Project(n) => {
                let input = n.get_one_child_exact()?.output_types()?;
                n.node
                    .projections
                    .iter()
                    .map(|expr| expr.datatype(&input))
                    .collect()
            }
            Self::Filter(n) => n.get_one_child_exact()?.output_types(),
            Self::Limit(n) => n.get_one_child_exact()?.output_types(),
            Self::Scan(n) => n.node.output_types(),
            Self::Empty(_) => Ok(Vec::new()),
        }
    }

    pub const fn is_project(&self) -> bool {
        matches!(self, Self::Project(_))
    }

    pub const fn is_scan(&self) -> bool {
        matches!(self, Self::Scan(_))
    }
}

impl Explainable for LogicalOperator {
    fn explain_entry(&self) -> ExplainEntry {
        match self {
            Self::Project(n) => n.node.explain_entry(),
            Self::Filter(n) => n.node.explain_entry(),
            Self::Limit(n) => n.node.explain_entry(),
            Self::Scan(n) => n.node.explain_entry(),
            Self::Empty(n) => n.node.explain_entry(),
        }
    }
}

fn check_column_refs(exprs: &[Expression], num_input: usize) -> Result<()> {
    for expr in exprs {
        if let Some(col) = expr.max_column_ref() {
            if col >= num_input {
                return Err(RayexecError::invariant_violation(format!(
                    "Expression '{expr}' references column {col}, input has {num_input} columns"
                )));
            }
        }
    }
    Ok(())
}
