//! Report generation.
//!
//! The factories in this module build the report tree bottom-up:
//!
//! ```text
//! assemble_module ──▶ build_group ──▶ build_group (nested)
//!                          │
//!                          ▼
//!                     build_case ──▶ build_step
//! ```
//!
//! Each factory receives the random stream by `&mut` and the current
//! [`Clock`](crate::clock::Clock) by value, and returns the node it built
//! together with the advanced clock.
//!
//! [`ReportGenerator`] decides which stream drives a file: a fresh stream
//! seeded from the request's seed, or, when no seed is given, one ambient
//! stream shared by every unseeded file it generates.

mod case;
mod group;
mod module;
mod step;

pub use case::{MAX_STEPS, MIN_STEPS, build_case, build_skipped};
pub use group::{
    MAX_FLAT_CHILDREN, MAX_SUBGROUPS, MIN_FLAT_CHILDREN, MIN_SUBGROUPS, NESTING_PROBABILITY,
    SKIP_PROBABILITY, build_group,
};
pub use module::{assemble_module, measurement_id};
pub use step::{FAILURE_DETAIL_PROBABILITY, build_step, failure_table};

use crate::error::Result;
use crate::model::TestModule;
use crate::render::{render_document, write_document};
use crate::stats::ReportStats;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::debug;

/// Default depth below which groups may nest.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Shape parameters shared by every group of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Whether groups may hold subgroups at all.
    pub nested: bool,

    /// Groups at this depth never nest further. 1 disables nesting.
    pub max_depth: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nested: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GeneratorConfig {
    pub fn with_nesting(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Everything needed to generate one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// Number of top-level groups.
    pub group_count: u32,

    /// Position of the file in its batch; offsets the module start time.
    pub file_index: u32,

    /// Seed for this file (None = use the generator's ambient stream).
    pub seed: Option<u64>,

    pub config: GeneratorConfig,
}

impl ReportRequest {
    pub fn new(group_count: u32) -> Self {
        Self {
            group_count,
            file_index: 0,
            seed: None,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_file_index(mut self, file_index: u32) -> Self {
        self.file_index = file_index;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_nesting(mut self, nested: bool) -> Self {
        self.config.nested = nested;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }
}

/// Seed of file `file_index` in a batch started from `base_seed`.
pub fn file_seed(base_seed: u64, file_index: u32) -> u64 {
    base_seed.wrapping_add(u64::from(file_index))
}

/// Generates reports, owning the ambient stream used for unseeded requests.
#[derive(Debug)]
pub struct ReportGenerator {
    ambient: StdRng,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator {
    /// Creates a generator whose ambient stream is seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            ambient: StdRng::from_entropy(),
        }
    }

    /// Creates a generator with a reproducible ambient stream.
    pub fn with_ambient_seed(seed: u64) -> Self {
        Self {
            ambient: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds the report tree for `request`.
    pub fn generate(&mut self, request: &ReportRequest) -> TestModule {
        debug!(
            file_index = request.file_index,
            groups = request.group_count,
            seed = ?request.seed,
            nested = request.config.nested,
            "generating report"
        );
        match request.seed {
            Some(seed) => assemble_module(&mut StdRng::seed_from_u64(seed), request),
            None => assemble_module(&mut self.ambient, request),
        }
    }

    /// Builds and serializes the report for `request`.
    pub fn render(&mut self, request: &ReportRequest) -> String {
        render_document(&self.generate(request))
    }

    /// Builds, serializes and writes the report for `request` to `path`.
    ///
    /// Returns the number of bytes written and the counts of the written tree.
    pub fn write(&mut self, request: &ReportRequest, path: &Path) -> Result<(u64, ReportStats)> {
        let module = self.generate(request);
        let stats = ReportStats::collect(&module);
        let bytes = write_document(&module, path)?;
        Ok((bytes, stats))
    }
}
