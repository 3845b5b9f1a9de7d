//! Immutable report tree.
//!
//! Every node is a plain value built bottom-up by the factories in
//! [`crate::generator`] and never touched again once it is placed in its parent.
//! The tree carries no layout information; see [`crate::render`] for that.

use crate::verdict::{StepResult, Verdict};
use chrono::NaiveDateTime;
use std::fmt;

/// Verdict scheme label stamped on every module root.
pub const VERDICT_SCHEME: &str = "2_basic";

/// Suffix appended to the random numeric prefix of a measurement id.
pub const MEASUREMENT_ID_SUFFIX: &str = "-ffff-4444-82aa-af7cs55583";

/// Display name of the setup info block.
pub const SETUP_NAME: &str = "Test Module Name";

/// Who or what triggered a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    User,
    Auto,
    System,
}

impl StepKind {
    pub const ALL: [StepKind; 3] = [StepKind::User, StepKind::Auto, StepKind::System];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::User => "user",
            StepKind::Auto => "auto",
            StepKind::System => "system",
        }
    }
}

/// Five rows of three cells describing why a step failed:
/// Service, Request, Expected, Actual and Error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetailTable {
    rows: [[String; 3]; 5],
}

impl FailureDetailTable {
    pub fn new(rows: [[String; 3]; 5]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[String; 3]; 5] {
        &self.rows
    }

    /// The `NRC xx` cell of the Error row.
    pub fn nrc(&self) -> &str {
        &self.rows[4][2]
    }

    /// Response bytes reported in the Actual row.
    pub fn actual_bytes(&self) -> &str {
        &self.rows[3][1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestStep {
    pub timestamp: f64,
    /// Severity level, 0 to 2.
    pub level: u8,
    pub kind: StepKind,
    /// `TS-001`, `TS-002`, ...
    pub ident: String,
    pub result: StepResult,
    pub description: String,
    pub failure_detail: Option<FailureDetailTable>,
}

/// Terminal verdict node of a case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerdictStamp {
    pub timestamp: f64,
    pub result: Verdict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub title: String,
    pub timestamp: f64,
    pub start_time: NaiveDateTime,
    pub steps: Vec<TestStep>,
    pub verdict: VerdictStamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTest {
    pub title: String,
}

/// A child of a flat group.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatChild {
    Case(TestCase),
    Skipped(SkippedTest),
}

/// What a group holds. A group is never partly nested and partly flat.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupContent {
    Nested(Vec<TestGroup>),
    Flat(Vec<FlatChild>),
}

/// Path of a group below the module root.
///
/// Top-level ids render zero-padded (`007`); nested ids render as the
/// dot-joined path (`7.2.1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(Vec<u32>);

impl GroupId {
    pub fn top_level(index: u32) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: u32) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn is_top_level(&self) -> bool {
        self.0.len() == 1
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_top_level() {
            return write!(f, "{:03}", self.0[0]);
        }
        let joined: Vec<String> = self.0.iter().map(u32::to_string).collect();
        f.write_str(&joined.join("."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestGroup {
    pub id: GroupId,
    /// 1 for top-level groups.
    pub depth: u32,
    pub title: String,
    pub content: GroupContent,
}

/// The setup block describing the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSetup {
    pub name: String,
    pub description: String,
}

/// Document root.
#[derive(Debug, Clone, PartialEq)]
pub struct TestModule {
    pub start_time: NaiveDateTime,
    pub measurement_id: String,
    pub setup: TestSetup,
    pub groups: Vec<TestGroup>,
}

/// Borrowed view of any node below the module root.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Group(&'a TestGroup),
    Case(&'a TestCase),
    Skipped(&'a SkippedTest),
    Step(&'a TestStep),
}

impl TestModule {
    /// Every node below the root in document order.
    pub fn nodes(&self) -> Vec<Node<'_>> {
        let mut out = Vec::new();
        for group in &self.groups {
            collect_group(group, &mut out);
        }
        out
    }

    /// Every timestamp stamped on the tree, in document order.
    ///
    /// A case contributes its own stamp, then one per step, then its verdict.
    pub fn timestamps(&self) -> Vec<f64> {
        let mut out = Vec::new();
        for node in self.nodes() {
            match node {
                Node::Case(case) => {
                    out.push(case.timestamp);
                    out.extend(case.steps.iter().map(|step| step.timestamp));
                    out.push(case.verdict.timestamp);
                }
                Node::Group(_) | Node::Skipped(_) | Node::Step(_) => {}
            }
        }
        out
    }

    /// Deepest group depth in the module, 0 when there are no groups.
    pub fn max_group_depth(&self) -> u32 {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                Node::Group(group) => Some(group.depth),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

fn collect_group<'a>(group: &'a TestGroup, out: &mut Vec<Node<'a>>) {
    out.push(Node::Group(group));
    match &group.content {
        GroupContent::Nested(children) => {
            for child in children {
                collect_group(child, out);
            }
        }
        GroupContent::Flat(children) => {
            for child in children {
                match child {
                    FlatChild::Case(case) => {
                        out.push(Node::Case(case));
                        out.extend(case.steps.iter().map(Node::Step));
                    }
                    FlatChild::Skipped(skipped) => out.push(Node::Skipped(skipped)),
                }
            }
        }
    }
}
