pub mod driver;
pub mod field_ref;
pub mod matcher;
pub mod operand;
pub mod project_into_scan;
pub mod rule;

use std::sync::Arc;

use driver::{AlternativeSet, AlternativeSink, SharedAlternatives};
use project_into_scan::project_into_scan_rule;
use rayexec_error::{RayexecError, Result};
use rayon::prelude::*;
use rule::RuleSet;
use tracing::{debug, trace, warn};

use crate::logical::explain::format_logical_plan;
use crate::logical::operator::LogicalOperator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Max number of full passes over the plan when optimizing.
    ///
    /// Optimizing stops early once a pass produces no changes.
    pub max_passes: usize,

    /// Names of rules that should never be fired.
    pub disabled_rules: Vec<String>,

    /// Check that replacements produce the same output types as the operator
    /// they replace before accepting them.
    pub verify_replacements: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            max_passes: 8,
            disabled_rules: Vec::new(),
            verify_replacements: true,
        }
    }
}

impl OptimizerConfig {
    pub fn is_enabled(&self, rule: &str) -> bool {
        !self.disabled_rules.iter().any(|name| name == rule)
    }
}

/// All rules available by default.
pub fn default_rules() -> RuleSet {
    // Names must be unique, see `default_rule_names_unique`.
    RuleSet {
        rules: vec![project_into_scan_rule()],
    }
}

#[derive(Debug, Clone)]
pub struct Optimizer {
    rules: RuleSet,
    config: OptimizerConfig,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer {
    pub fn new() -> Self {
        Self::with_rules(default_rules(), OptimizerConfig::default())
    }

    pub fn with_rules(rules: RuleSet, config: OptimizerConfig) -> Self {
        Optimizer { rules, config }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Fire every enabled rule against `root`, proposing each replacement to
    /// `sink`.
    ///
    /// Only `root` itself is considered, not its children.
    pub fn explore<S>(&self, root: &Arc<LogicalOperator>, sink: &mut S) -> Result<()>
    where
        S: AlternativeSink,
    {
        for rule in self.rules.iter() {
            if !self.config.is_enabled(rule.name) {
                trace!(rule = rule.name, "skipping disabled rule");
                continue;
            }

            if let Some(replacement) = rule.apply(root)? {
                debug!(rule = rule.name, "proposing alternative");
                sink.propose_alternative(rule.name, root, replacement)?;
            }
        }
        Ok(())
    }

    /// Explore many roots in parallel.
    ///
    /// The order of alternatives in the returned set is not deterministic.
    pub fn explore_parallel(&self, roots: &[Arc<LogicalOperator>]) -> Result<AlternativeSet> {
        let shared = SharedAlternatives::new();
        roots
            .par_iter()
            .try_for_each(|root| self.explore(root, &mut &shared))?;
        Ok(shared.into_inner())
    }

    /// Rewrite a plan, accepting the first alternative proposed for each
    /// operator.
    ///
    /// Operators are visited bottom up. Subtrees that don't change are shared
    /// with the input plan.
    pub fn optimize(&self, plan: Arc<LogicalOperator>) -> Result<Arc<LogicalOperator>> {
        let mut plan = plan;
        for pass in 0..self.config.max_passes {
            let mut changed = false;
            plan = self.rewrite_bottom_up(&plan, &mut changed)?;
            if !changed {
                trace!(%pass, "plan reached fixpoint");
                return Ok(plan);
            }
            debug!(%pass, plan = %format_logical_plan(&plan), "optimizer pass complete");
        }

        warn!(
            max_passes = self.config.max_passes,
            "optimizer stopped before reaching fixpoint"
        );
        Ok(plan)
    }

    fn rewrite_bottom_up(
        &self,
        plan: &Arc<LogicalOperator>,
        changed: &mut bool,
    ) -> Result<Arc<LogicalOperator>> {
        let mut new_children = Vec::with_capacity(plan.children().len());
        let mut children_changed = false;
        for child in plan.children() {
            let new_child = self.rewrite_bottom_up(child, changed)?;
            children_changed |= !Arc::ptr_eq(child, &new_child);
            new_children.push(new_child);
        }

        let plan = if children_changed {
            Arc::new(plan.with_new_children(new_children)?)
        } else {
            plan.clone()
        };

        let mut alternatives = AlternativeSet::new();
        self.explore(&plan, &mut alternatives)?;

        match alternatives.into_inner().into_iter().next() {
            Some(alt) => {
                if self.config.verify_replacements {
                    verify_replacement(&alt.original, &alt.replacement)?;
                }
                *changed = true;
                Ok(alt.replacement)
            }
            None => Ok(plan),
        }
    }
}

/// Check that a replacement produces the same columns as the original.
fn verify_replacement(
    original: &LogicalOperator,
    replacement: &LogicalOperator,
) -> Result<()> {
    let original_types = original.output_types()?;
    let replacement_types = replacement.output_types()?;
    if original_types != replacement_types {
        return Err(RayexecError::invariant_violation(format!(
            "Replacement changes output types from {original_types:?} to {replacement_types:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::DataType;
    use crate::expr::arith_expr::ArithOperator;
    use crate::expr::comparison_expr::ComparisonOperator;
    use crate::expr::literal_expr::ScalarValue;
    use crate::expr::Expression;
    use crate::logical::logical_scan::LogicalScan;
    use crate::logical::operator::OperatorKind;
    use crate::optimizer::matcher::MatchBinding;
    use crate::optimizer::operand::Operand;
    use crate::optimizer::rule::RewriteRule;
    use crate::table::TableHandle;

    fn emps() -> Arc<TableHandle> {
        Arc::new(TableHandle::from_columns(
            "emps",
            [
                ("empno", DataType::Int64),
                ("name", DataType::Utf8),
                ("deptno", DataType::Int64),
                ("salary", DataType::Float64),
            ],
        ))
    }

    fn scan_emps() -> Arc<LogicalOperator> {
        LogicalOperator::scan(LogicalScan::all_columns(emps()))
    }

    fn columns(cols: &[usize]) -> Vec<Expression> {
        cols.iter().map(|&col| Expression::column(col)).collect()
    }

    #[test]
    fn default_rule_names_unique() {
        let rules = default_rules();
        let mut registered = RuleSet::new();
        for rule in rules.iter() {
            registered = registered.with_rule(rule.clone()).unwrap();
        }
        assert_eq!(rules.len(), registered.len());
        assert_eq!(vec![project_into_scan::RULE_NAME], rules.names().collect::<Vec<_>>());
    }

    #[test]
    fn explore_proposes_once_per_firing() {
        let plan = LogicalOperator::project(columns(&[1, 0]), scan_emps()).unwrap();

        let mut alts = AlternativeSet::new();
        Optimizer::new().explore(&plan, &mut alts).unwrap();

        assert_eq!(1, alts.len());
        let alt = alts.alternatives_for(&plan).next().unwrap();
        assert_eq!(project_into_scan::RULE_NAME, alt.rule);
        assert_eq!(
            "Scan (table = emps, projection = [1, 0])",
            format_logical_plan(&alt.replacement)
        );
    }

    #[test]
    fn explore_skips_disabled_rule() {
        let plan = LogicalOperator::project(columns(&[1]), scan_emps()).unwrap();
        let conf = OptimizerConfig {
            disabled_rules: vec![project_into_scan::RULE_NAME.to_string()],
            ..Default::default()
        };
        let optimizer = Optimizer::with_rules(default_rules(), conf);

        let mut alts = AlternativeSet::new();
        optimizer.explore(&plan, &mut alts).unwrap();
        assert!(alts.is_empty());
    }

    #[test]
    fn optimize_below_other_operators() {
        let scan = scan_emps();
        let project = LogicalOperator::project(columns(&[3, 1]), scan.clone()).unwrap();
        let filter = LogicalOperator::filter(
            Expression::compare(
                ComparisonOperator::Gt,
                Expression::column(0),
                Expression::lit(ScalarValue::Float64(1000.0)),
            ),
            project,
        )
        .unwrap();
        let plan = LogicalOperator::limit(10, None, filter);

        let optimized = Optimizer::new().optimize(plan.clone()).unwrap();

        let expected = [
            "Limit (limit = 10)",
            "  Filter (predicate = #0 > 1000)",
            "    Scan (table = emps, projection = [3, 1])",
        ]
        .join("\n");
        assert_eq!(expected, format_logical_plan(&optimized));

        // Input plan untouched.
        assert!(plan.children()[0].children()[0].is_project());
        assert!(Arc::ptr_eq(
            &scan,
            &plan.children()[0].children()[0].children()[0]
        ));
    }

    #[test]
    fn optimize_collapses_stacked_projects() {
        // Inner project fires first, then the outer project sits directly on
        // the new scan and fires in the same pass.
        let inner = LogicalOperator::project(columns(&[2, 0, 1]), scan_emps()).unwrap();
        let outer = LogicalOperator::project(columns(&[2, 0]), inner).unwrap();

        let optimized = Optimizer::new().optimize(outer).unwrap();
        assert_eq!(
            "Scan (table = emps, projection = [1, 2])",
            format_logical_plan(&optimized)
        );
    }

    #[test]
    fn optimize_keeps_computed_project() {
        let plan = LogicalOperator::project(
            vec![Expression::arith(
                ArithOperator::Mul,
                Expression::column(3),
                Expression::lit(ScalarValue::Float64(1.1)),
            )],
            scan_emps(),
        )
        .unwrap();

        let optimized = Optimizer::new().optimize(plan.clone()).unwrap();
        assert!(Arc::ptr_eq(&plan, &optimized));
    }

    #[test]
    fn optimize_unchanged_plan_is_shared() {
        let plan = LogicalOperator::limit(3, Some(1), scan_emps());
        let optimized = Optimizer::new().optimize(plan.clone()).unwrap();
        assert!(Arc::ptr_eq(&plan, &optimized));
    }

    fn drop_last_column(binding: &MatchBinding) -> Result<Option<Arc<LogicalOperator>>> {
        match binding.root().as_ref() {
            LogicalOperator::Scan(scan) if !scan.node.projection.is_empty() => {
                let mut projection = scan.node.projection.clone();
                projection.pop();
                Ok(Some(LogicalOperator::scan(
                    scan.node.with_projection(projection)?,
                )))
            }
            _ => Ok(None),
        }
    }

    #[test]
    fn optimize_rejects_type_changing_replacement() {
        let rules = RuleSet::new()
            .with_rule(RewriteRule {
                name: "drop_last_column",
                operand: Operand::any(OperatorKind::Scan),
                fire: drop_last_column,
            })
            .unwrap();
        let optimizer = Optimizer::with_rules(rules, OptimizerConfig::default());

        let err = optimizer.optimize(scan_emps()).unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn optimize_stops_at_max_passes() {
        let rules = RuleSet::new()
            .with_rule(RewriteRule {
                name: "drop_last_column",
                operand: Operand::any(OperatorKind::Scan),
                fire: drop_last_column,
            })
            .unwrap();
        let conf = OptimizerConfig {
            max_passes: 2,
            verify_replacements: false,
            ..Default::default()
        };
        let optimizer = Optimizer::with_rules(rules, conf);

        let optimized = optimizer.optimize(scan_emps()).unwrap();
        assert_eq!(
            "Scan (table = emps, projection = [0, 1])",
            format_logical_plan(&optimized)
        );
    }

    #[test]
    fn explore_parallel_over_shared_plan() {
        let scan = scan_emps();
        let roots: Vec<_> = (0..16)
            .map(|idx| {
                if idx % 2 == 0 {
                    LogicalOperator::project(columns(&[idx % 4]), scan.clone()).unwrap()
                } else {
                    LogicalOperator::limit(idx, None, scan.clone())
                }
            })
            .collect();

        let alts = Optimizer::new().explore_parallel(&roots).unwrap();
        assert_eq!(8, alts.len());

        for root in roots.iter().filter(|root| root.is_project()) {
            let alt = alts.alternatives_for(root).next().unwrap();
            assert!(alt.replacement.is_scan());
        }
        // Shared scan never modified.
        assert_eq!(*scan_emps(), *scan);
    }
}
