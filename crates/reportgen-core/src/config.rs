//! Batch configuration.
//!
//! A batch can be described entirely on the command line or in a YAML file
//! such as:
//!
//! ```yaml
//! output_dir: ./fixtures
//! count: 50
//! groups: 30
//! nested: true
//! prefix: daily_
//! seed: 1000
//! on_error: continue
//! ```
//!
//! Missing keys fall back to the defaults of [`BatchConfig::default`].

use crate::generator::{DEFAULT_MAX_DEPTH, GeneratorConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or validating a batch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// What the batch runner does when one file cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the batch and return the error.
    #[default]
    Abort,
    /// Record the failure and carry on with the next file.
    Continue,
}

/// Everything the batch runner needs to produce a folder of reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Folder the reports are written to. Created if missing.
    pub output_dir: PathBuf,

    /// Number of files to generate.
    pub count: u32,

    /// Top-level groups per file, or the ceiling when `random_groups` is set.
    pub groups: u32,

    /// Draw each file's group count from `1..=groups`.
    pub random_groups: bool,

    /// Allow nested groups.
    pub nested: bool,

    /// Depth below which groups may nest.
    pub max_depth: u32,

    /// File name prefix; files are named `{prefix}{index:03}.xml`.
    pub prefix: String,

    /// Base seed. File `i` is generated from `seed + i`.
    pub seed: Option<u64>,

    pub on_error: FailurePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            count: 20,
            groups: 10,
            random_groups: false,
            nested: false,
            max_depth: DEFAULT_MAX_DEPTH,
            prefix: "test_".to_string(),
            seed: None,
            on_error: FailurePolicy::Abort,
        }
    }
}

impl BatchConfig {
    /// Loads a configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects configurations the runner cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::Invalid("count must be at least 1".to_string()));
        }
        if self.groups == 0 {
            return Err(ConfigError::Invalid("groups must be at least 1".to_string()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".to_string()));
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "prefix must not contain path separators: {:?}",
                self.prefix
            )));
        }
        Ok(())
    }

    /// Name of file `index` (1-based).
    pub fn file_name(&self, index: u32) -> String {
        format!("{}{index:03}.xml", self.prefix)
    }

    /// Full path of file `index` (1-based).
    pub fn file_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(self.file_name(index))
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_nesting(self.nested)
            .with_max_depth(self.max_depth)
    }
}
