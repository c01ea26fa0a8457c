use std::sync::Arc;

use rayexec_error::{RayexecError, Result};
use tracing::{debug, trace};

use super::field_ref::{analyze_field_references, simple_field_indices};
use super::matcher::MatchBinding;
use super::operand::Operand;
use super::rule::RewriteRule;
use crate::logical::operator::{LogicalOperator, OperatorKind};

pub const RULE_NAME: &str = "project_into_scan";

/// Rule for folding a project that only selects columns into the scan below
/// it.
///
/// The scan is replaced with one reading just the columns the project asks
/// for, in the order it asks for them, and the project is removed.
///
/// If any of the project's expressions are more than a bare column reference,
/// the rule doesn't apply.
pub fn project_into_scan_rule() -> RewriteRule {
    RewriteRule {
        name: RULE_NAME,
        operand: Operand::with_children(OperatorKind::Project, [Operand::any(OperatorKind::Scan)]),
        fire: push_project_into_scan,
    }
}

fn push_project_into_scan(binding: &MatchBinding) -> Result<Option<Arc<LogicalOperator>>> {
    let project = match binding.root().as_ref() {
        LogicalOperator::Project(project) => project,
        other => {
            return Err(RayexecError::invariant_violation(format!(
                "Expected Project at binding root, got {}",
                other.kind()
            )))
        }
    };
    let scan = match binding.get(1).map(|op| &**op) {
        Some(LogicalOperator::Scan(scan)) => scan,
        other => {
            return Err(RayexecError::invariant_violation(format!(
                "Expected Scan as project input, got {:?}",
                other.map(|op| op.kind())
            )))
        }
    };

    let refs = analyze_field_references(&project.node.projections);
    let columns = match simple_field_indices(&refs) {
        Some(columns) => columns,
        None => {
            trace!(?refs, "project contains computed expressions");
            return Ok(None);
        }
    };

    // Project references index into the scan's output, map them back to
    // columns in the table.
    let projection = columns
        .iter()
        .map(|&col| {
            scan.node.projection.get(col).copied().ok_or_else(|| {
                RayexecError::invariant_violation(format!(
                    "Project references column {col}, scan only produces {} columns",
                    scan.node.num_output_columns()
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let new_scan = scan.node.with_projection(projection)?;
    debug!(
        table = %new_scan.source,
        before = ?scan.node.projection,
        after = ?new_scan.projection,
        "pushed project into scan"
    );

    Ok(Some(LogicalOperator::scan(new_scan)))
}
