use std::sync::Arc;

use smallvec::SmallVec;
use tracing::trace;

use super::operand::Operand;
use crate::logical::operator::LogicalOperator;

/// Operators bound to the positions of an operand tree after a successful
/// match.
///
/// Ordered by pre-order position in the operand tree, so the root is always
/// at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchBinding {
    nodes: SmallVec<[Arc<LogicalOperator>; 4]>,
}

impl MatchBinding {
    /// The operator matched by the root operand.
    pub fn root(&self) -> &Arc<LogicalOperator> {
        // A binding is only ever produced from a successful match, which
        // always binds the root.
        &self.nodes[0]
    }

    pub fn get(&self, idx: usize) -> Option<&Arc<LogicalOperator>> {
        self.nodes.get(idx)
    }

    /// Number of bound operators, never zero.
    pub fn num_bindings(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<LogicalOperator>> {
        self.nodes.iter()
    }
}

/// Try to match `root` against `operand`.
///
/// Returns None if the plan doesn't have the shape described by the operand.
/// The plan is only read, never modified.
pub fn match_operand(root: &Arc<LogicalOperator>, operand: &Operand) -> Option<MatchBinding> {
    let mut nodes = SmallVec::new();
    if bind(root, operand, &mut nodes) {
        Some(MatchBinding { nodes })
    } else {
        None
    }
}

fn bind(
    plan: &Arc<LogicalOperator>,
    operand: &Operand,
    nodes: &mut SmallVec<[Arc<LogicalOperator>; 4]>,
) -> bool {
    if plan.kind() != operand.kind {
        trace!(expected = %operand.kind, actual = %plan.kind(), "operator kind mismatch");
        return false;
    }

    nodes.push(plan.clone());

    if operand.children.is_empty() {
        return true;
    }

    let children = plan.children();
    if children.len() != operand.children.len() {
        trace!(
            kind = %operand.kind,
            expected = operand.children.len(),
            actual = children.len(),
            "operator arity mismatch"
        );
        return false;
    }

    children
        .iter()
        .zip(&operand.children)
        .all(|(child, child_operand)| bind(child, child_operand, nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::DataType;
    use crate::expr::Expression;
    use crate::logical::logical_scan::LogicalScan;
    use crate::logical::operator::OperatorKind;
    use crate::table::TableHandle;

    fn scan() -> Arc<LogicalOperator> {
        let table = TableHandle::from_columns(
            "t",
            [("a", DataType::Int64), ("b", DataType::Int64)],
        );
        LogicalOperator::scan(LogicalScan::all_columns(Arc::new(table)))
    }

    fn project_scan_operand() -> Operand {
        Operand::with_children(OperatorKind::Project, [Operand::any(OperatorKind::Scan)])
    }

    #[test]
    fn binds_in_pre_order() {
        let scan = scan();
        let project = LogicalOperator::project(vec![Expression::column(1)], scan.clone()).unwrap();

        let binding = match_operand(&project, &project_scan_operand()).unwrap();
        assert_eq!(2, binding.num_bindings());
        assert!(Arc::ptr_eq(&project, binding.root()));
        assert!(Arc::ptr_eq(&scan, binding.get(1).unwrap()));
    }

    #[test]
    fn root_kind_mismatch() {
        assert_eq!(None, match_operand(&scan(), &project_scan_operand()));
    }

    #[test]
    fn child_kind_mismatch() {
        let inner = LogicalOperator::project(vec![Expression::column(0)], scan()).unwrap();
        let outer = LogicalOperator::project(vec![Expression::column(0)], inner).unwrap();

        assert_eq!(None, match_operand(&outer, &project_scan_operand()));
    }

    #[test]
    fn leaf_operand_ignores_children() {
        let limit = LogicalOperator::limit(1, None, scan());
        let binding = match_operand(&limit, &Operand::any(OperatorKind::Limit)).unwrap();
        assert_eq!(1, binding.num_bindings());
    }

    #[test]
    fn arity_mismatch() {
        // Scan has no children, but the operand requires one.
        let operand =
            Operand::with_children(OperatorKind::Scan, [Operand::any(OperatorKind::Scan)]);
        assert_eq!(None, match_operand(&scan(), &operand));
    }

    #[test]
    fn deeper_pattern() {
        let filter = LogicalOperator::filter(Expression::column(0), scan()).unwrap();
        let project = LogicalOperator::project(vec![Expression::column(1)], filter).unwrap();

        let operand = Operand::with_children(
            OperatorKind::Project,
            [Operand::with_children(
                OperatorKind::Filter,
                [Operand::any(OperatorKind::Scan)],
            )],
        );
        let binding = match_operand(&project, &operand).unwrap();

        let kinds: Vec<_> = binding.iter().map(|op| op.kind()).collect();
        assert_eq!(
            vec![OperatorKind::Project, OperatorKind::Filter, OperatorKind::Scan],
            kinds
        );
        assert_eq!(operand.num_bindings(), binding.num_bindings());
    }
}
