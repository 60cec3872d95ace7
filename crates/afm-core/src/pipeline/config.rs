use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    AUTOCORR_TABLE_FILE, DEFAULT_BLOCK_SIZE, DEFAULT_EXCLUDE_SUFFIXES, DEFAULT_HEADER_LINES,
    DEFAULT_MULTIPLY_CONST, DEFAULT_WIDTH_LINE,
};
use crate::error::{AfmError, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory searched (recursively) for raw `.txt` scans.
    pub data_path: PathBuf,
    /// Directory receiving converted CSVs and every analysis output.
    pub save_path: PathBuf,
    // Plain values ahead of the section tables, as TOML requires.
    #[serde(default)]
    pub on_error: ErrorPolicy,
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub autocorrelation: AutocorrelationConfig,
    #[serde(default)]
    pub min_max: MinMaxConfig,
}

impl PipelineConfig {
    pub fn new(data_path: impl AsRef<Path>, save_path: impl AsRef<Path>) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
            save_path: save_path.as_ref().to_path_buf(),
            on_error: ErrorPolicy::default(),
            conversion: ConversionConfig::default(),
            discovery: DiscoveryConfig::default(),
            autocorrelation: AutocorrelationConfig::default(),
            min_max: MinMaxConfig::default(),
        }
    }

    /// Reject parameter values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if self.min_max.enabled && self.min_max.block_size == 0 {
            return Err(AfmError::InvalidBlockSize(self.min_max.block_size));
        }
        if !self.conversion.multiply_const.is_finite() {
            return Err(AfmError::Pipeline(format!(
                "multiply_const must be finite, got {}",
                self.conversion.multiply_const
            )));
        }
        if !(self.autocorrelation.width_line.is_finite() && self.autocorrelation.width_line > 0.0)
        {
            return Err(AfmError::Pipeline(format!(
                "width_line must be positive, got {}",
                self.autocorrelation.width_line
            )));
        }
        Ok(())
    }

    /// Configured exclusions plus the autocorrelation table this pipeline
    /// writes itself. Min/max tables are recognised by name for every block
    /// size, see [`crate::minmax::export::is_min_max_output`].
    pub fn exclude_suffixes(&self) -> Vec<String> {
        let mut suffixes = self.discovery.exclude.clone();
        let own = AUTOCORR_TABLE_FILE.to_string();
        if !suffixes.contains(&own) {
            suffixes.push(own);
        }
        suffixes
    }
}

/// Raw `.txt` to CSV conversion parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Scale applied to every raw value.
    pub multiply_const: f64,
    /// Instrument header lines skipped at the top of each file.
    pub header_lines: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            multiply_const: DEFAULT_MULTIPLY_CONST,
            header_lines: DEFAULT_HEADER_LINES,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Filename suffixes skipped when collecting CSV inputs.
    pub exclude: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocorrelationConfig {
    pub enabled: bool,
    /// Sampling interval scaling the lag axis, in µm.
    pub width_line: f64,
    /// Also render `autocorr_function.svg`.
    pub plot: bool,
}

impl Default for AutocorrelationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width_line: DEFAULT_WIDTH_LINE,
            plot: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MinMaxConfig {
    pub enabled: bool,
    /// Side length `n` of the `n×n` blocks.
    pub block_size: usize,
}

impl Default for MinMaxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// What the pipeline does when one file fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Log the failure, record it in the report, keep processing.
    #[default]
    Continue,
    /// Stop at the first failing file and return its error.
    Abort,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => write!(f, "Continue"),
            Self::Abort => write!(f, "Abort"),
        }
    }
}
