//! # reportgen-core
//!
//! Synthetic CANoe-style XML test reports for exercising report parsers and
//! importers at scale.
//!
//! This crate provides:
//! - Factories that build a randomized test module tree (groups, cases,
//!   steps, skipped tests and failure-detail tables)
//! - A simulated clock that keeps every timestamp in document order
//! - Serialization of the tree into the report's XML layout
//! - A batch runner that writes a folder of reports with per-file seeds
//!
//! ```text
//! BatchConfig ──▶ BatchRunner ──▶ ReportGenerator ──▶ TestModule ──▶ XML file
//!                                        │
//!                                  seeded StdRng
//! ```

pub mod batch;
pub mod clock;
pub mod config;
mod error;
pub mod generator;
pub mod model;
pub mod render;
mod stats;
pub mod verdict;
pub mod vocabulary;

pub use batch::{
    BatchResults, BatchRunner, FailedFile, GeneratedFile, ProgressCallback, ProgressEvent,
};
pub use clock::{Clock, Gap};
pub use config::{BatchConfig, ConfigError, FailurePolicy};
pub use error::{ReportError, Result};
pub use generator::{GeneratorConfig, ReportGenerator, ReportRequest, file_seed};
pub use model::{
    FailureDetailTable, FlatChild, GroupContent, GroupId, Node, SkippedTest, StepKind, TestCase,
    TestGroup, TestModule, TestSetup, TestStep, VerdictStamp,
};
pub use render::{render_document, write_document};
pub use stats::ReportStats;
pub use verdict::{StepResult, Verdict};
