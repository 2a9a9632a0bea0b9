use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::Style;
use fitswave_core::pipeline::config::BatchConfig;
use fitswave_core::pipeline::{run_batch_reported, BatchReporter, FileOutcome};
use fitswave_core::wavelet::WaveletKind;
use indicatif::{ProgressBar, ProgressStyle};

use super::config::write_default_config;

#[derive(Args)]
pub struct RunArgs {
    /// Batch config file (TOML); created with defaults when missing
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Folder with .fits/.fit inputs (overrides the config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output root folder (overrides the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Wavelet family, e.g. haar, db2, db4, bior2.2, bior3.3
    #[arg(long)]
    pub wavelet: Option<WaveletKind>,

    /// Number of decomposition levels
    #[arg(long)]
    pub level: Option<usize>,

    /// Process files in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Drives the progress bar and prints one line per finished file.
struct ProgressReporter {
    pb: ProgressBar,
}

impl BatchReporter for ProgressReporter {
    fn begin_batch(&self, total_files: usize) {
        self.pb.set_length(total_files as u64);
    }

    fn file_started(&self, path: &Path) {
        if let Some(name) = path.file_name() {
            self.pb.set_message(name.to_string_lossy().into_owned());
        }
    }

    fn file_finished(&self, outcome: &FileOutcome) {
        let style = if outcome.success {
            Style::new().green()
        } else {
            Style::new().red()
        };
        self.pb.println(format!(
            "-> {} [{}]",
            outcome.file_name(),
            style.apply_to(&outcome.message)
        ));
        self.pb.inc(1);
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = load_config(args)?;
    crate::summary::print_batch_summary(&config, &args.config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let reporter = Arc::new(ProgressReporter { pb: pb.clone() });
    let summary = run_batch_reported(&config, reporter).context("Batch failed")?;
    pb.finish_and_clear();

    crate::summary::print_batch_results(&summary, &config);

    if summary.failed() > 0 {
        bail!(
            "{} of {} file(s) failed",
            summary.failed(),
            summary.outcomes.len()
        );
    }
    Ok(())
}

/// Read the config file (writing defaults first if it does not exist) and
/// apply command-line overrides.
fn load_config(args: &RunArgs) -> Result<BatchConfig> {
    if !args.config.exists() {
        write_default_config(&args.config)?;
        println!("Created default config at {}", args.config.display());
    }

    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let mut config: BatchConfig = toml::from_str(&contents).context("Invalid batch config")?;

    if let Some(ref input) = args.input {
        config.paths.input_folder = input.clone();
    }
    if let Some(ref output) = args.output {
        config.paths.output_folder = output.clone();
    }
    if let Some(wavelet) = args.wavelet {
        config.parameters.wavelet_type = wavelet;
    }
    if let Some(level) = args.level {
        config.parameters.decomposition_level = level;
    }
    if args.parallel {
        config.execution.parallel = true;
    }

    config.validate()?;
    tracing::debug!(?config, "Batch config loaded");
    Ok(config)
}
