//! Batch generation of report files into a folder.
//!
//! The runner walks file indices `1..=count`, decides each file's group count
//! and seed, generates the report and writes it. Progress is reported through
//! an optional callback so front ends can render it however they like.

use crate::config::{BatchConfig, FailurePolicy};
use crate::error::{ReportError, Result};
use crate::generator::{ReportGenerator, ReportRequest, file_seed};
use crate::stats::ReportStats;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Callback type for progress updates.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The output folder exists and generation is about to start.
    BatchStarted { total_files: u32, output_dir: PathBuf },

    /// A file was written.
    FileWritten(GeneratedFile),

    /// A file could not be written and the batch carries on.
    FileFailed(FailedFile),

    /// Every file was attempted.
    BatchCompleted {
        written: usize,
        failed: usize,
        total_bytes: u64,
        duration: Duration,
    },
}

/// One report the batch wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub file_index: u32,
    pub groups: u32,
    pub seed: Option<u64>,
    pub bytes: u64,
    pub stats: ReportStats,
}

/// One report the batch failed to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub file_index: u32,
    pub error: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResults {
    pub output_dir: PathBuf,
    pub files: Vec<GeneratedFile>,
    pub failures: Vec<FailedFile>,
    pub total_bytes: u64,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl BatchResults {
    pub fn all_written(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total size in megabytes (1 MB = 1024 * 1024 bytes).
    #[allow(clippy::cast_precision_loss)]
    pub fn total_megabytes(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0)
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Writes a folder of reports according to a [`BatchConfig`].
pub struct BatchRunner {
    config: BatchConfig,
    on_progress: Option<ProgressCallback>,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            on_progress: None,
        }
    }

    /// Sets a callback for progress updates.
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Runs the batch.
    ///
    /// With [`FailurePolicy::Abort`] the first write error is returned and
    /// files already written stay on disk. With [`FailurePolicy::Continue`]
    /// failures are collected in [`BatchResults::failures`].
    pub fn run(&self) -> Result<BatchResults> {
        let start = Instant::now();
        let config = &self.config;

        std::fs::create_dir_all(&config.output_dir).map_err(|source| ReportError::CreateDir {
            path: config.output_dir.clone(),
            source,
        })?;

        info!(
            count = config.count,
            groups = config.groups,
            nested = config.nested,
            output_dir = %config.output_dir.display(),
            "starting batch"
        );
        self.emit(ProgressEvent::BatchStarted {
            total_files: config.count,
            output_dir: config.output_dir.clone(),
        });

        // Group counts come from their own stream so they never disturb the
        // per-file content streams.
        let mut planner = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut generator = ReportGenerator::new();
        let generator_config = config.generator_config();

        let mut results = BatchResults {
            output_dir: config.output_dir.clone(),
            ..BatchResults::default()
        };

        for file_index in 1..=config.count {
            let groups = if config.random_groups {
                planner.gen_range(1..=config.groups)
            } else {
                config.groups
            };
            let seed = config.seed.map(|base| file_seed(base, file_index));
            let path = config.file_path(file_index);

            let mut request = ReportRequest::new(groups).with_file_index(file_index);
            request.config = generator_config;
            if let Some(seed) = seed {
                request = request.with_seed(seed);
            }

            match generator.write(&request, &path) {
                Ok((bytes, stats)) => {
                    info!(file = %path.display(), groups, bytes, "wrote report");
                    results.total_bytes += bytes;
                    let file = GeneratedFile {
                        path,
                        file_index,
                        groups,
                        seed,
                        bytes,
                        stats,
                    };
                    self.emit(ProgressEvent::FileWritten(file.clone()));
                    results.files.push(file);
                }
                Err(err) => match config.on_error {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Continue => {
                        warn!(file = %path.display(), error = %err, "skipping report");
                        let failure = FailedFile {
                            path,
                            file_index,
                            error: err.to_string(),
                        };
                        self.emit(ProgressEvent::FileFailed(failure.clone()));
                        results.failures.push(failure);
                    }
                },
            }
        }

        results.duration = start.elapsed();
        debug!(duration_ms = results.duration.as_millis() as u64, "batch finished");
        self.emit(ProgressEvent::BatchCompleted {
            written: results.files.len(),
            failed: results.failures.len(),
            total_bytes: results.total_bytes,
            duration: results.duration,
        });

        Ok(results)
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(callback) = &self.on_progress {
            callback(event);
        }
    }
}
