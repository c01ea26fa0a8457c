use std::sync::Arc;

use libtest_mimic::{Arguments, Trial};
use logutil::LogFormat;
use rayexec_error::{RayexecError, Result};
use rayexec_planner::logical::explain::format_logical_plan;
use rayexec_planner::logical::operator::LogicalOperator;
use rayexec_planner::optimizer::rule::RuleSet;
use rayexec_planner::optimizer::{default_rules, Optimizer, OptimizerConfig};
use tracing::info;

/// A plan to optimize, and what it should look like afterwards.
#[derive(Debug, Clone)]
pub struct PlanTestCase {
    pub name: String,
    pub plan: Arc<LogicalOperator>,
    /// Expected output of `format_logical_plan` on the optimized plan.
    pub expected: String,
}

impl PlanTestCase {
    pub fn new(
        name: impl Into<String>,
        plan: Arc<LogicalOperator>,
        expected: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        PlanTestCase {
            name: name.into(),
            plan,
            expected: expected.into_iter().collect::<Vec<_>>().join("\n"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Config to use for the optimizer for every case.
    pub optimizer: OptimizerConfig,

    /// Rules to use instead of the default rules.
    pub rules: Option<RuleSet>,
}

/// Optimize every plan and compare against its expected output.
///
/// This sets up tracing to log only at the ERROR level. RUST_LOG can be used to
/// print out logs at a lower level.
///
/// `kind` should be used to group these cases together.
pub fn run(
    cases: impl IntoIterator<Item = PlanTestCase>,
    conf: RunConfig,
    kind: &str,
) -> Result<()> {
    let args = Arguments::from_args();

    // Only one global logger can be set per process, ignore if someone beat us
    // to it.
    let _ = logutil::configure_global_logger(tracing::Level::ERROR, LogFormat::HumanReadable);

    let rules = conf.rules.unwrap_or_else(default_rules);
    let optimizer = Optimizer::with_rules(rules, conf.optimizer);

    let tests = cases
        .into_iter()
        .map(|case| {
            let optimizer = optimizer.clone();
            Trial::test(case.name.clone(), move || {
                run_case(&optimizer, case).map_err(|e| e.to_string().into())
            })
            .with_kind(kind)
        })
        .collect();

    libtest_mimic::run(&args, tests).exit_if_failed();

    Ok(())
}

fn run_case(optimizer: &Optimizer, case: PlanTestCase) -> Result<()> {
    info!(name = %case.name, plan = %format_logical_plan(&case.plan), "optimizing");

    let before = case.plan.as_ref().clone();
    let optimized = optimizer.optimize(case.plan.clone())?;

    if before != *case.plan {
        return Err(RayexecError::invariant_violation(format!(
            "Optimizing modified the input plan for '{}'",
            case.name
        )));
    }

    let got = format_logical_plan(&optimized);
    similar_asserts::assert_eq!(expected: case.expected, got: got);

    Ok(())
}
