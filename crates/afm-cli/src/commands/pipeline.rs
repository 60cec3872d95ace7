use std::path::PathBuf;
use std::sync::Arc;

use afm_core::consts::{DEFAULT_BLOCK_SIZE, DEFAULT_MULTIPLY_CONST, DEFAULT_WIDTH_LINE};
use afm_core::pipeline::config::{ErrorPolicy, PipelineConfig};
use afm_core::pipeline::{run_pipeline_reported, PipelineStage, ProgressReporter};
use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::summary::{print_pipeline_summary, print_run_report};

#[derive(Args)]
pub struct RunArgs {
    /// Directory with raw .txt scans
    #[arg(short, long)]
    pub data_path: Option<PathBuf>,

    /// Directory where converted CSVs and results are saved
    #[arg(short, long)]
    pub save_path: Option<PathBuf>,

    /// Pipeline config file (TOML); overrides every other option
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sampling interval for the autocorrelation lag axis
    #[arg(short, long, default_value_t = DEFAULT_WIDTH_LINE)]
    pub width_line: f64,

    /// Block size n for the n x n min/max analysis
    #[arg(short = 'm', long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub matrix_size: usize,

    /// Scaling factor applied to raw values
    #[arg(short = 'c', long, default_value_t = DEFAULT_MULTIPLY_CONST)]
    pub multiply_const: f64,

    /// Filename suffixes to exclude from analysis (replaces the defaults)
    #[arg(short = 'x', long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Stop at the first failing file
    #[arg(long)]
    pub fail_fast: bool,

    /// Skip the autocorrelation plots
    #[arg(long)]
    pub no_plot: bool,

    /// Skip the autocorrelation analysis
    #[arg(long)]
    pub skip_autocorr: bool,

    /// Skip the min/max analysis
    #[arg(long)]
    pub skip_minmax: bool,
}

/// Drives an indicatif bar from pipeline progress events.
struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.reset();
        self.pb.set_length(total_items.unwrap_or(0) as u64);
        self.pb.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        self.pb.set_position(self.pb.length().unwrap_or(0));
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        info!(path = %config_path.display(), "Loaded pipeline config");
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        build_config_from_args(args)?
    };

    print_pipeline_summary(&config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = Arc::new(BarReporter { pb: pb.clone() });

    let report = run_pipeline_reported(&config, reporter)?;
    pb.finish_with_message("Done");

    print_run_report(&report);
    if !report.is_success() {
        bail!("{} file(s) failed", report.failures.len());
    }
    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> Result<PipelineConfig> {
    let (Some(data_path), Some(save_path)) = (&args.data_path, &args.save_path) else {
        bail!("--data-path and --save-path are required without --config");
    };

    let mut config = PipelineConfig::new(data_path, save_path);
    config.conversion.multiply_const = args.multiply_const;
    config.autocorrelation.width_line = args.width_line;
    config.autocorrelation.plot = !args.no_plot;
    config.autocorrelation.enabled = !args.skip_autocorr;
    config.min_max.block_size = args.matrix_size;
    config.min_max.enabled = !args.skip_minmax;
    if let Some(ref exclude) = args.exclude {
        config.discovery.exclude = exclude.clone();
    }
    if args.fail_fast {
        config.on_error = ErrorPolicy::Abort;
    }
    Ok(config)
}
