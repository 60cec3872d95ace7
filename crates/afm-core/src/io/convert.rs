use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{AfmError, Result};
use crate::pipeline::config::ConversionConfig;

use super::discover::find_files;
use super::table_io::save_height_table;

/// Parse a raw whitespace-delimited scan.
///
/// Skips `config.header_lines` instrument lines, ignores blank lines, and
/// multiplies every value by `config.multiply_const`. All data rows must
/// have the same number of values.
pub fn parse_raw_scan(
    contents: &str,
    path: &Path,
    config: &ConversionConfig,
) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut width: Option<usize> = None;
    let mut rows = 0usize;

    for (index, line) in contents.lines().enumerate().skip(config.header_lines) {
        let line_no = index + 1;
        let mut count = 0usize;
        for token in line.split_whitespace() {
            let v = token.parse::<f64>().map_err(|e| AfmError::Parse {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("invalid number '{token}': {e}"),
            })?;
            values.push(v * config.multiply_const);
            count += 1;
        }
        if count == 0 {
            continue;
        }
        match width {
            None => width = Some(count),
            Some(w) if w != count => {
                return Err(AfmError::Parse {
                    path: path.to_path_buf(),
                    line: line_no,
                    message: format!("expected {w} values, found {count}"),
                });
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let width = width.ok_or_else(|| AfmError::EmptyInput {
        path: path.to_path_buf(),
    })?;
    Array2::from_shape_vec((rows, width), values)
        .map_err(|e| AfmError::Pipeline(format!("{}: {e}", path.display())))
}

/// Where the converted CSV of `raw` lands: `<save_root>/<stem>/<stem>.csv`.
pub fn converted_path(raw: &Path, save_root: &Path) -> PathBuf {
    let stem = raw
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    save_root.join(&stem).join(format!("{stem}.csv"))
}

/// Convert one raw `.txt` scan and return the path of the written CSV.
pub fn convert_file(raw: &Path, save_root: &Path, config: &ConversionConfig) -> Result<PathBuf> {
    let contents = fs::read_to_string(raw)?;
    let data = parse_raw_scan(&contents, raw, config)?;

    let output = converted_path(raw, save_root);
    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir)?;
    }
    save_height_table(&data, &output)?;

    debug!(
        input = %raw.display(),
        output = %output.display(),
        rows = data.nrows(),
        cols = data.ncols(),
        "Converted raw scan"
    );
    Ok(output)
}

/// Convert every `.txt` file under `data_path` into `save_path`.
///
/// Files are converted in parallel; the first failure aborts the batch.
/// Returned paths follow the sorted order of the inputs.
pub fn convert_folder(
    data_path: &Path,
    save_path: &Path,
    config: &ConversionConfig,
) -> Result<Vec<PathBuf>> {
    let raw_files = find_files(data_path, "txt")?;
    fs::create_dir_all(save_path)?;
    info!(count = raw_files.len(), "Converting raw scans");

    raw_files
        .par_iter()
        .map(|raw| convert_file(raw, save_path, config))
        .collect()
}
