use std::fmt;

use fmtutil::IntoDisplayableSlice;

use crate::logical::operator::OperatorKind;

/// Describes the shape of a plan subtree a rule applies to.
///
/// An operand with no children matches any operator of its kind regardless
/// of what's below it. An operand with children requires the operator to have
/// exactly that many children, each matching the child operand at the same
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub kind: OperatorKind,
    pub children: Vec<Operand>,
}

impl Operand {
    /// Operand matching an operator of `kind` with any children.
    pub const fn any(kind: OperatorKind) -> Self {
        Operand {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: OperatorKind, children: impl IntoIterator<Item = Operand>) -> Self {
        Operand {
            kind,
            children: children.into_iter().collect(),
        }
    }

    /// Number of operators bound by a successful match against this operand.
    pub fn num_bindings(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.num_bindings())
            .sum::<usize>()
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}{}", self.kind, self.children.display_with_brackets())
        }
    }
}
