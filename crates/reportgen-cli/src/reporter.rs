//! Terminal output for batch runs.

use colored::Colorize;
use reportgen_core::{
    BatchConfig, BatchResults, FailedFile, GeneratedFile, ProgressCallback, ProgressEvent,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Verbosity level for terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Show only the summary line.
    Quiet,
    /// Settings header, one line per file and the summary.
    #[default]
    Normal,
    /// Normal output plus per-file statistics.
    Verbose,
}

/// Prints batch progress to stdout.
#[derive(Debug)]
pub struct TerminalReporter {
    verbosity: Verbosity,
    total_files: u32,
}

impl TerminalReporter {
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            total_files: 0,
        }
    }

    /// Handles a progress event, printing appropriate output.
    pub fn handle_progress(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::BatchStarted { total_files, .. } => {
                self.total_files = total_files;
            }
            ProgressEvent::FileWritten(file) => {
                if self.verbosity != Verbosity::Quiet {
                    println!("{}", self.format_written(&file));
                }
                if self.verbosity == Verbosity::Verbose {
                    println!("{}", format_stats(&file).dimmed());
                }
            }
            ProgressEvent::FileFailed(failure) => {
                if self.verbosity != Verbosity::Quiet {
                    println!("{}", self.format_failed(&failure));
                }
            }
            ProgressEvent::BatchCompleted { .. } => {}
        }
    }

    /// `[  3/20] Generated: test_003.xml (10 groups)`
    fn format_written(&self, file: &GeneratedFile) -> String {
        format!(
            "{} Generated: {} ({} groups)",
            self.counter(file.file_index).dimmed(),
            file_name(&file.path).green(),
            file.groups
        )
    }

    fn format_failed(&self, failure: &FailedFile) -> String {
        format!(
            "{} {} {}: {}",
            self.counter(failure.file_index).dimmed(),
            "Failed:".red().bold(),
            file_name(&failure.path),
            failure.error
        )
    }

    fn counter(&self, file_index: u32) -> String {
        let width = self.total_files.to_string().len();
        format!("[{file_index:>width$}/{}]", self.total_files)
    }

    /// Prints the batch settings before generation starts.
    pub fn print_settings(&self, config: &BatchConfig) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        println!("{}", format_settings(config));
        println!("{}", "━".repeat(40).dimmed());
    }

    /// Prints the summary once the batch is done.
    pub fn print_summary(&self, results: &BatchResults) {
        if self.verbosity != Verbosity::Quiet {
            println!("{}", "━".repeat(40).dimmed());
        }
        println!("{}", format_summary(results));
        if !results.failures.is_empty() {
            println!(
                "{}",
                format!("✗ {} file(s) could not be written", results.failures.len()).red()
            );
        }
    }
}

/// Creates a progress callback for use with [`reportgen_core::BatchRunner`].
pub fn create_progress_callback(verbosity: Verbosity) -> ProgressCallback {
    let reporter = Arc::new(Mutex::new(TerminalReporter::with_verbosity(verbosity)));

    Box::new(move |event| {
        if let Ok(mut r) = reporter.lock() {
            r.handle_progress(event);
        }
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_settings(config: &BatchConfig) -> String {
    let groups = if config.random_groups {
        format!("1-{} (random)", config.groups)
    } else {
        config.groups.to_string()
    };
    let nesting = if config.nested {
        format!("enabled (max depth {})", config.max_depth)
    } else {
        "disabled".to_string()
    };
    let seed = config
        .seed
        .map_or_else(|| "none".to_string(), |seed| seed.to_string());

    format!(
        "{}\n  Output folder: {}\n  Files:         {}\n  Groups:        {}\n  Nesting:       {}\n  Prefix:        {}\n  Seed:          {}",
        "Generating test reports".bold(),
        config.output_dir.display(),
        config.count,
        groups,
        nesting,
        config.prefix,
        seed
    )
}

fn format_stats(file: &GeneratedFile) -> String {
    let stats = &file.stats;
    format!(
        "         {} cases ({} pass, {} fail, {} inconclusive), {} skipped, {} steps, depth {}",
        stats.cases,
        stats.passed,
        stats.failed,
        stats.inconclusive,
        stats.skipped,
        stats.steps,
        stats.nested_depth
    )
}

fn format_summary(results: &BatchResults) -> String {
    let line = format!(
        "✓ Generated {} file(s) in {} ({:.2} MB, {:.1}s)",
        results.files.len(),
        results.output_dir.display(),
        results.total_megabytes(),
        results.duration.as_secs_f64()
    );
    if results.all_written() {
        line.green().bold().to_string()
    } else {
        line.yellow().bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgen_core::ReportStats;
    use std::path::PathBuf;
    use std::time::Duration;

    fn plain() {
        colored::control::set_override(false);
    }

    fn generated(file_index: u32) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from("out").join(format!("test_{file_index:03}.xml")),
            file_index,
            groups: 10,
            seed: None,
            bytes: 2048,
            stats: ReportStats::default(),
        }
    }

    #[test]
    fn test_written_line_pads_counter() {
        plain();
        let mut reporter = TerminalReporter::with_verbosity(Verbosity::Normal);
        reporter.handle_progress(ProgressEvent::BatchStarted {
            total_files: 120,
            output_dir: PathBuf::from("out"),
        });
        assert_eq!(
            reporter.format_written(&generated(3)),
            "[  3/120] Generated: test_003.xml (10 groups)"
        );
    }

    #[test]
    fn test_failed_line() {
        plain();
        let reporter = TerminalReporter {
            verbosity: Verbosity::Normal,
            total_files: 5,
        };
        let failure = FailedFile {
            path: PathBuf::from("out/test_002.xml"),
            file_index: 2,
            error: "disk full".to_string(),
        };
        assert_eq!(
            reporter.format_failed(&failure),
            "[2/5] Failed: test_002.xml: disk full"
        );
    }

    #[test]
    fn test_settings_describe_random_groups_and_seed() {
        plain();
        let config = BatchConfig {
            random_groups: true,
            groups: 30,
            nested: true,
            seed: Some(1000),
            ..BatchConfig::default()
        };
        let settings = format_settings(&config);
        assert!(settings.contains("Groups:        1-30 (random)"));
        assert!(settings.contains("Nesting:       enabled (max depth 3)"));
        assert!(settings.contains("Seed:          1000"));
    }

    #[test]
    fn test_summary_reports_size_in_megabytes() {
        plain();
        let results = BatchResults {
            output_dir: PathBuf::from("out"),
            files: vec![generated(1), generated(2)],
            failures: vec![],
            total_bytes: 1024 * 1024 + 512 * 1024,
            duration: Duration::from_millis(300),
        };
        assert_eq!(
            format_summary(&results),
            "✓ Generated 2 file(s) in out (1.50 MB, 0.3s)"
        );
    }
}
