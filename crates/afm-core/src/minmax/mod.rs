//! Block-wise local extrema statistics.
//!
//! A height map is trimmed to a square grid, split into non-overlapping
//! `n×n` blocks, and for every block the block-relative positions of its
//! minimum and maximum are tallied. Two tables come out: the position counts
//! and the raw block contents flattened one block per row.

pub mod aggregate;
pub mod export;
pub mod extremum;
pub mod loader;
pub mod partition;

use std::path::Path;

use ndarray::Array2;
use tracing::info;

use crate::error::{AfmError, Result};
use crate::table::Grid;

use aggregate::{AggregatedCount, ExtremumKind, PositionAggregator};
use export::{column_name, save_report, MinMaxOutputs};
use extremum::locate_extrema;
use loader::load_grid;

/// Block contents, one row per block in row-major block order.
/// Shape = (block_count, block_size²).
#[derive(Clone, Debug, PartialEq)]
pub struct FlattenedBlocks {
    pub block_size: usize,
    pub data: Array2<f64>,
}

impl FlattenedBlocks {
    /// `ri_{row}_ci_{col}` for every cell of a block, row-major.
    pub fn column_names(&self) -> Vec<String> {
        let n = self.block_size;
        (0..n)
            .flat_map(|row| (0..n).map(move |col| column_name(row, col)))
            .collect()
    }
}

/// Result of the min/max analysis of one grid.
#[derive(Clone, Debug)]
pub struct MinMaxReport {
    pub block_size: usize,
    pub block_count: usize,
    pub rows_to_drop: usize,
    pub counts: Vec<AggregatedCount>,
    pub flattened: FlattenedBlocks,
}

impl MinMaxReport {
    /// Sum of the counts of one kind.
    pub fn kind_total(&self, kind: ExtremumKind) -> usize {
        aggregate::kind_total(&self.counts, kind)
    }
}

/// Partition `grid`, locate every block's extrema, and aggregate them.
pub fn analyze_grid(grid: &Grid) -> Result<MinMaxReport> {
    let n = grid.block_size();
    let block_count = grid.block_count();
    let mut aggregator = PositionAggregator::new();
    let mut flat = Vec::with_capacity(block_count * n * n);

    for (index, block) in grid.blocks().enumerate() {
        let record = locate_extrema(&block).ok_or_else(|| {
            AfmError::Pipeline(format!("block {} of {block_count} is empty", index + 1))
        })?;
        aggregator.record(&record);
        flat.extend(block.iter().copied());
    }

    let data = Array2::from_shape_vec((block_count, n * n), flat)
        .map_err(|e| AfmError::Pipeline(e.to_string()))?;

    Ok(MinMaxReport {
        block_size: n,
        block_count: aggregator.block_count(),
        rows_to_drop: grid.rows_to_drop(),
        counts: aggregator.into_counts(),
        flattened: FlattenedBlocks { block_size: n, data },
    })
}

/// Load, trim and analyse one converted scan CSV without writing anything.
pub fn analyze_file(path: &Path, block_size: usize) -> Result<MinMaxReport> {
    let grid = load_grid(path, block_size)?;
    analyze_grid(&grid)
}

/// Analyse one CSV and write both tables.
///
/// Tables go to `output_dir`, or next to the input file when `None`. Nothing
/// is written if loading or analysis fails.
pub fn process_file(
    path: &Path,
    block_size: usize,
    output_dir: Option<&Path>,
) -> Result<(MinMaxReport, MinMaxOutputs)> {
    let report = analyze_file(path, block_size)?;
    info!(
        path = %path.display(),
        blocks = report.block_count,
        rows_to_drop = report.rows_to_drop,
        "Min/max analysis complete"
    );

    let dir = output_dir
        .or_else(|| path.parent())
        .unwrap_or_else(|| Path::new("."));
    let outputs = save_report(&report, dir)?;
    Ok((report, outputs))
}
