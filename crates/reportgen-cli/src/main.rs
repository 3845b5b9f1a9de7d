//! `reportgen`: writes a folder of synthetic CANoe-style XML test reports.
//!
//! ```text
//! reportgen ./reports --count 50 --groups 30 --nested --seed 1000
//! ```

mod reporter;

use anyhow::{Context, Result, bail};
use clap::Parser;
use reportgen_core::{BatchConfig, BatchRunner, FailurePolicy};
use reporter::{TerminalReporter, Verbosity, create_progress_callback};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Generate multiple CANoe XML test reports in a folder.
///
/// Every flag overrides the matching key of the `--config` file.
#[derive(Parser, Debug)]
#[command(name = "reportgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output folder for the generated reports
    #[arg(required_unless_present = "config")]
    pub folder: Option<PathBuf>,

    /// Number of files to generate [default: 20]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,

    /// Top-level test groups per file [default: 10]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub groups: Option<u32>,

    /// Enable nested test groups
    #[arg(short, long)]
    pub nested: bool,

    /// Filename prefix [default: test_]
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Base random seed; file i is generated from seed + i
    #[arg(short, long, env = "REPORTGEN_SEED")]
    pub seed: Option<u64>,

    /// Draw each file's group count from 1..=groups
    #[arg(long)]
    pub random_groups: bool,

    /// Depth below which groups may nest [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_depth: Option<u32>,

    /// Keep going when a file cannot be written
    #[arg(long)]
    pub keep_going: bool,

    /// YAML file with batch settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the batch summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Show per-file statistics and debug logs
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Loads the config file when given and layers the command line on top.
    fn batch_config(&self) -> Result<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => BatchConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => BatchConfig::default(),
        };

        if let Some(folder) = &self.folder {
            config.output_dir = folder.clone();
        }
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(groups) = self.groups {
            config.groups = groups;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        config.nested |= self.nested;
        config.random_groups |= self.random_groups;
        if self.keep_going {
            config.on_error = FailurePolicy::Continue;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "reportgen=debug"
    } else {
        "reportgen=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.batch_config()?;
    let verbosity = cli.verbosity();

    let mut runner = BatchRunner::new(config);
    if !cli.json {
        TerminalReporter::with_verbosity(verbosity).print_settings(runner.config());
        runner = runner.on_progress(create_progress_callback(verbosity));
    }

    let results = runner.run().context("Batch generation failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("Failed to serialize summary")?
        );
    } else {
        TerminalReporter::with_verbosity(verbosity).print_summary(&results);
    }

    if !results.all_written() {
        bail!("{} of {} reports failed", results.failures.len(), runner.config().count);
    }
    Ok(())
}
