pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{analyze_file, run_pipeline, run_pipeline_reported};
pub use types::{FileFailure, FileReport, PipelineReport, PipelineStage, ProgressReporter};
