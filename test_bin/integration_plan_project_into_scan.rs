use std::sync::Arc;

use rayexec_planner::datatype::DataType;
use rayexec_planner::expr::arith_expr::ArithOperator;
use rayexec_planner::expr::comparison_expr::ComparisonOperator;
use rayexec_planner::expr::literal_expr::ScalarValue;
use rayexec_planner::expr::scalar_function_expr::ScalarFunctionExpr;
use rayexec_planner::expr::Expression;
use rayexec_planner::logical::logical_scan::LogicalScan;
use rayexec_planner::logical::operator::LogicalOperator;
use rayexec_planner::table::TableHandle;
use rayexec_plantest::{PlanTestCase, RunConfig};

fn depts() -> Arc<TableHandle> {
    Arc::new(TableHandle::from_columns(
        "depts",
        [("deptno", DataType::Int64), ("name", DataType::Utf8)],
    ))
}

fn emps() -> Arc<TableHandle> {
    Arc::new(TableHandle::from_columns(
        "emps",
        [
            ("empno", DataType::Int64),
            ("name", DataType::Utf8),
            ("deptno", DataType::Int64),
            ("gender", DataType::Utf8),
            ("city", DataType::Utf8),
            ("empid", DataType::Int64),
            ("age", DataType::Int64),
            ("slacker", DataType::Boolean),
            ("manager", DataType::Boolean),
            ("joinedat", DataType::Utf8),
        ],
    ))
}

fn scan_all(table: Arc<TableHandle>) -> Arc<LogicalOperator> {
    LogicalOperator::scan(LogicalScan::all_columns(table))
}

fn cols(cols: &[usize]) -> Vec<Expression> {
    cols.iter().map(|&col| Expression::column(col)).collect()
}

fn cases() -> Vec<PlanTestCase> {
    vec![
        PlanTestCase::new(
            "select_subset",
            LogicalOperator::project(cols(&[1, 0]), scan_all(emps())).unwrap(),
            ["Scan (table = emps, projection = [1, 0])"],
        ),
        PlanTestCase::new(
            "select_all_in_order",
            LogicalOperator::project(cols(&[0, 1]), scan_all(depts())).unwrap(),
            ["Scan (table = depts, projection = [0, 1])"],
        ),
        PlanTestCase::new(
            "select_repeated",
            LogicalOperator::project(cols(&[2, 2, 6]), scan_all(emps())).unwrap(),
            ["Scan (table = emps, projection = [2, 2, 6])"],
        ),
        PlanTestCase::new(
            "select_nothing",
            LogicalOperator::project(Vec::new(), scan_all(depts())).unwrap(),
            ["Scan (table = depts, projection = [])"],
        ),
        PlanTestCase::new(
            "computed_expression_kept",
            LogicalOperator::project(
                vec![
                    Expression::column(1),
                    Expression::arith(
                        ArithOperator::Add,
                        Expression::column(6),
                        Expression::lit(ScalarValue::Int64(1)),
                    ),
                ],
                scan_all(emps()),
            )
            .unwrap(),
            [
                "Project (projections = [#1, #6 + 1])",
                "  Scan (table = emps, projection = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9])",
            ],
        ),
        PlanTestCase::new(
            "function_call_kept",
            LogicalOperator::project(
                vec![Expression::ScalarFunction(ScalarFunctionExpr {
                    name: "upper".to_string(),
                    inputs: vec![Expression::column(1)],
                    return_type: DataType::Utf8,
                })],
                scan_all(depts()),
            )
            .unwrap(),
            [
                "Project (projections = [upper(#1)])",
                "  Scan (table = depts, projection = [0, 1])",
            ],
        ),
        PlanTestCase::new(
            "project_under_filter",
            LogicalOperator::filter(
                Expression::compare(
                    ComparisonOperator::Gt,
                    Expression::column(1),
                    Expression::lit(ScalarValue::Int64(30)),
                ),
                LogicalOperator::project(cols(&[1, 6]), scan_all(emps())).unwrap(),
            )
            .unwrap(),
            [
                "Filter (predicate = #1 > 30)",
                "  Scan (table = emps, projection = [1, 6])",
            ],
        ),
        PlanTestCase::new(
            "project_over_filter_kept",
            LogicalOperator::project(
                cols(&[0]),
                LogicalOperator::filter(
                    Expression::compare(
                        ComparisonOperator::Eq,
                        Expression::column(2),
                        Expression::lit(ScalarValue::Int64(10)),
                    ),
                    scan_all(emps()),
                )
                .unwrap(),
            )
            .unwrap(),
            [
                "Project (projections = [#0])",
                "  Filter (predicate = #2 = 10)",
                "    Scan (table = emps, projection = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9])",
            ],
        ),
        PlanTestCase::new(
            "stacked_projects",
            LogicalOperator::project(
                cols(&[1]),
                LogicalOperator::project(cols(&[4, 3, 2]), scan_all(emps())).unwrap(),
            )
            .unwrap(),
            ["Scan (table = emps, projection = [3])"],
        ),
        PlanTestCase::new(
            "limit_over_project",
            LogicalOperator::limit(
                5,
                Some(10),
                LogicalOperator::project(cols(&[9, 0]), scan_all(emps())).unwrap(),
            ),
            [
                "Limit (limit = 5, offset = 10)",
                "  Scan (table = emps, projection = [9, 0])",
            ],
        ),
    ]
}

pub fn main() {
    rayexec_plantest::run(cases(), RunConfig::default(), "plan_project_into_scan").unwrap();
}
