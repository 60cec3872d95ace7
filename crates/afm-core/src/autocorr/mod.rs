//! Autocorrelation of the central scan line along both axes.

pub mod acf;
pub mod plot;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;

use crate::consts::{AUTOCORR_PLOT_FILE, AUTOCORR_TABLE_FILE};
use crate::error::{AfmError, Result};
use crate::io::table_io::read_height_table;
use crate::pipeline::config::AutocorrelationConfig;
use crate::table::HeightTable;

/// Scan direction of an autocorrelation series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanAxis {
    /// Down one value column.
    X,
    /// Across one row.
    Y,
}

impl std::fmt::Display for ScanAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Autocorrelation of one scan line.
#[derive(Clone, Debug)]
pub struct AcfSeries {
    pub axis: ScanAxis,
    /// Column (x) or row (y) index the series was taken from.
    pub series_index: usize,
    /// Source heights.
    pub values: Vec<f64>,
    /// ACF per lag, starting at lag 0.
    pub acf: Vec<f64>,
    /// Distance between neighbouring samples.
    pub width_line: f64,
}

impl AcfSeries {
    pub fn lag_distance(&self, lag: usize) -> f64 {
        lag as f64 * self.width_line
    }

    /// `(lag distance, acf)` pairs for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.acf
            .iter()
            .enumerate()
            .map(|(lag, &v)| (self.lag_distance(lag), v))
            .collect()
    }
}

/// Autocorrelation along both axes of one height map.
#[derive(Clone, Debug)]
pub struct AcfTable {
    pub x: AcfSeries,
    pub y: AcfSeries,
}

/// Paths written by [`save_acf`].
#[derive(Clone, Debug)]
pub struct AcfOutputs {
    pub table: PathBuf,
    pub plot: Option<PathBuf>,
}

/// Compute the autocorrelation through the middle of `table`.
///
/// The series index is `rows / 2`: the x series is the value column with
/// that index, the y series the row with that index. Lags run up to the row
/// count, capped by the series length.
pub fn autocorrelation(table: &HeightTable, width_line: f64) -> Result<AcfTable> {
    let (rows, cols) = table.data.dim();
    let series_index = rows / 2;
    if series_index >= cols {
        return Err(AfmError::Dimension {
            path: table.source.clone(),
            rows_to_drop: 0,
            rows,
            cols,
            reason: format!("no column {series_index} for the central x series"),
        });
    }

    let x_values = table.data.column(series_index).to_vec();
    let y_values = table.data.row(series_index).to_vec();
    let nlags = rows;

    let build = |axis: ScanAxis, values: Vec<f64>| -> Result<AcfSeries> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AfmError::NonFiniteSeries {
                axis: axis.to_string(),
            });
        }
        let acf = acf::acf(&values, nlags).ok_or_else(|| AfmError::DegenerateSeries {
            axis: axis.to_string(),
        })?;
        Ok(AcfSeries {
            axis,
            series_index,
            values,
            acf,
            width_line,
        })
    };

    Ok(AcfTable {
        x: build(ScanAxis::X, x_values)?,
        y: build(ScanAxis::Y, y_values)?,
    })
}

/// Write the table: x rows then y rows, columns `z,ACF,ix,Series,Axis`.
pub fn write_acf_table<W: Write>(table: &AcfTable, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["z", "ACF", "ix", "Series", "Axis"])?;
    for series in [&table.x, &table.y] {
        for (lag, acf) in series.acf.iter().enumerate() {
            wtr.write_record([
                series.values[lag].to_string(),
                acf.to_string(),
                series.lag_distance(lag).to_string(),
                series.series_index.to_string(),
                series.axis.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write `autocorr.csv` and, if `with_plot`, `autocorr_function.svg` into `dir`.
pub fn save_acf(table: &AcfTable, dir: &Path, with_plot: bool) -> Result<AcfOutputs> {
    fs::create_dir_all(dir)?;
    let table_path = dir.join(AUTOCORR_TABLE_FILE);
    write_acf_table(table, File::create(&table_path)?)?;

    let plot_path = if with_plot {
        let path = dir.join(AUTOCORR_PLOT_FILE);
        plot::plot_acf(table, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(AcfOutputs {
        table: table_path,
        plot: plot_path,
    })
}

/// Read one converted scan CSV, compute its autocorrelation and save it.
///
/// Outputs go to `output_dir`, or next to the input file when `None`.
pub fn process_file(
    path: &Path,
    config: &AutocorrelationConfig,
    output_dir: Option<&Path>,
) -> Result<(AcfTable, AcfOutputs)> {
    let table = read_height_table(path)?;
    let acf_table = autocorrelation(&table, config.width_line)?;
    info!(
        path = %path.display(),
        series = acf_table.x.series_index,
        lags = acf_table.x.acf.len(),
        "Autocorrelation complete"
    );

    let dir = output_dir
        .or_else(|| path.parent())
        .unwrap_or_else(|| Path::new("."));
    let outputs = save_acf(&acf_table, dir, config.plot)?;
    Ok((acf_table, outputs))
}
