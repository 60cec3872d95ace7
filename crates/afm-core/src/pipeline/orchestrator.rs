use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::autocorr::{autocorrelation, save_acf};
use crate::error::{AfmError, Result};
use crate::io::convert::convert_file;
use crate::io::discover::{collect_csv_files, find_files};
use crate::io::table_io::read_height_table;
use crate::minmax::analyze_grid;
use crate::minmax::export::{is_min_max_output, save_report};
use crate::minmax::loader::trim_to_grid;

use super::config::{ErrorPolicy, PipelineConfig};
use super::types::{
    FileFailure, FileReport, NoOpReporter, PipelineReport, PipelineStage, ProgressReporter,
};

/// Run `work` over `items` in parallel as one pipeline stage.
///
/// Under `Abort` the first error is returned; under `Continue` failures are
/// pushed to `failures` and the successful results come back in input order.
fn run_stage<T, F>(
    stage: PipelineStage,
    items: &[PathBuf],
    policy: ErrorPolicy,
    reporter: &Arc<dyn ProgressReporter>,
    failures: &mut Vec<FileFailure>,
    work: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
{
    reporter.begin_stage(stage, Some(items.len()));
    let done = AtomicUsize::new(0);
    let step = |path: &PathBuf| {
        let result = work(path.as_path());
        let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.advance(completed);
        result
    };

    let results = match policy {
        ErrorPolicy::Abort => items.par_iter().map(step).collect::<Result<Vec<T>>>(),
        ErrorPolicy::Continue => {
            let outcomes: Vec<Result<T>> = items.par_iter().map(step).collect();
            let mut kept = Vec::with_capacity(outcomes.len());
            for (source, outcome) in items.iter().zip(outcomes) {
                match outcome {
                    Ok(value) => kept.push(value),
                    Err(error) => {
                        warn!(
                            path = %source.display(),
                            stage = %stage,
                            %error,
                            "Skipping file"
                        );
                        failures.push(FileFailure {
                            source: source.clone(),
                            stage,
                            error,
                        });
                    }
                }
            }
            Ok(kept)
        }
    };
    reporter.finish_stage();

    if let Err(ref e) = results {
        error!(stage = %stage, error = %e, "Pipeline aborted");
    }
    results
}

/// Run every enabled analysis on one converted CSV.
///
/// All results are computed before anything is written, so a failing file
/// leaves no partial output behind.
pub fn analyze_file(path: &Path, config: &PipelineConfig) -> Result<FileReport> {
    let table = read_height_table(path)?;
    let mut report = FileReport::new(path);

    if config.autocorrelation.enabled {
        match autocorrelation(&table, config.autocorrelation.width_line) {
            Ok(acf) => report.autocorrelation = Some(acf),
            Err(AfmError::DegenerateSeries { axis }) => {
                warn!(path = %path.display(), %axis, "Flat scan line, autocorrelation skipped");
            }
            Err(AfmError::NonFiniteSeries { axis }) => {
                warn!(path = %path.display(), %axis, "Non-finite scan line, autocorrelation skipped");
            }
            Err(e) => return Err(e),
        }
    }

    if config.min_max.enabled {
        let grid = trim_to_grid(&table, config.min_max.block_size)?;
        report.min_max = Some(analyze_grid(&grid)?);
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    if let Some(ref acf) = report.autocorrelation {
        let outputs = save_acf(acf, dir, config.autocorrelation.plot)?;
        report.outputs.push(outputs.table);
        report.outputs.extend(outputs.plot);
    }
    if let Some(ref min_max) = report.min_max {
        let outputs = save_report(min_max, dir)?;
        report.outputs.push(outputs.counts);
        report.outputs.push(outputs.flattened);
    }

    Ok(report)
}

/// Run the full processing pipeline with a thread-safe progress reporter.
///
/// Converts every raw scan under `data_path` into `save_path`, collects the
/// CSVs there, and analyses each one independently.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineReport> {
    config.validate()?;
    fs::create_dir_all(&config.save_path)?;
    let mut report = PipelineReport::default();

    let raw_files = find_files(&config.data_path, "txt")?;
    info!(
        count = raw_files.len(),
        data = %config.data_path.display(),
        "Converting raw scans"
    );
    report.converted = run_stage(
        PipelineStage::Converting,
        &raw_files,
        config.on_error,
        &reporter,
        &mut report.failures,
        |raw| convert_file(raw, &config.save_path, &config.conversion),
    )?;

    reporter.begin_stage(PipelineStage::Collecting, None);
    let mut files = collect_csv_files(&config.save_path, &config.exclude_suffixes())?;
    files.retain(|path| !is_min_max_output(path));
    reporter.finish_stage();
    info!(count = files.len(), "Collected CSV files");

    report.files = run_stage(
        PipelineStage::Analyzing,
        &files,
        config.on_error,
        &reporter,
        &mut report.failures,
        |path| analyze_file(path, config),
    )?;

    info!(
        analyzed = report.files.len(),
        failed = report.failures.len(),
        "Pipeline finished"
    );
    Ok(report)
}

/// Run the full processing pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}
