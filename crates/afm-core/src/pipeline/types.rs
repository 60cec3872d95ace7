use std::path::{Path, PathBuf};

use crate::autocorr::AcfTable;
use crate::error::AfmError;
use crate::minmax::MinMaxReport;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Converting,
    Collecting,
    Analyzing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converting => write!(f, "Converting scans"),
            Self::Collecting => write!(f, "Collecting files"),
            Self::Analyzing => write!(f, "Analyzing"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., file count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Everything the pipeline produced for one converted CSV.
#[derive(Clone, Debug)]
pub struct FileReport {
    pub source: PathBuf,
    /// `None` when the analysis is disabled or the scan line is flat.
    pub autocorrelation: Option<AcfTable>,
    pub min_max: Option<MinMaxReport>,
    /// Every file written for this input.
    pub outputs: Vec<PathBuf>,
}

impl FileReport {
    pub fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            autocorrelation: None,
            min_max: None,
            outputs: Vec::new(),
        }
    }
}

/// A file that failed under [`super::config::ErrorPolicy::Continue`].
#[derive(Debug)]
pub struct FileFailure {
    pub source: PathBuf,
    pub stage: PipelineStage,
    pub error: AfmError,
}

/// Result of a full pipeline run, in sorted input order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// CSV files written by the conversion stage.
    pub converted: Vec<PathBuf>,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn report_for(&self, source: &Path) -> Option<&FileReport> {
        self.files.iter().find(|r| r.source == source)
    }
}
