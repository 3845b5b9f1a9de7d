//! Summary counts over a generated report.

use crate::model::{Node, TestModule};
use crate::verdict::Verdict;
use serde::Serialize;

/// Node and verdict counts for one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub groups: usize,
    pub nested_depth: u32,
    pub cases: usize,
    pub skipped: usize,
    pub steps: usize,
    pub failing_steps: usize,
    pub failure_tables: usize,
    pub passed: usize,
    pub failed: usize,
    pub inconclusive: usize,
}

impl ReportStats {
    pub fn collect(module: &TestModule) -> Self {
        let mut stats = Self {
            nested_depth: module.max_group_depth(),
            ..Self::default()
        };
        for node in module.nodes() {
            match node {
                Node::Group(_) => stats.groups += 1,
                Node::Skipped(_) => stats.skipped += 1,
                Node::Case(case) => {
                    stats.cases += 1;
                    match case.verdict.result {
                        Verdict::Pass => stats.passed += 1,
                        Verdict::Fail => stats.failed += 1,
                        Verdict::Inconclusive => stats.inconclusive += 1,
                    }
                }
                Node::Step(step) => {
                    stats.steps += 1;
                    if step.result.is_fail() {
                        stats.failing_steps += 1;
                    }
                    if step.failure_detail.is_some() {
                        stats.failure_tables += 1;
                    }
                }
            }
        }
        stats
    }
}
