use std::path::Path;

use ndarray::s;
use tracing::debug;

use crate::error::{AfmError, Result};
use crate::io::table_io::read_height_table;
use crate::table::{Grid, HeightTable};

/// Trim a height table into a square grid divisible by `block_size`.
///
/// `rows_to_drop = rows - floor(rows / n) * n`. That many rows are removed
/// from the bottom and the same number of columns from the right. The row
/// count alone decides the trim for both axes, so a table that is not square
/// to begin with ends up rejected as non-square. A table with fewer rows than
/// `n` trims to nothing and is rejected too.
pub fn trim_to_grid(table: &HeightTable, block_size: usize) -> Result<Grid> {
    if block_size == 0 {
        return Err(AfmError::InvalidBlockSize(block_size));
    }

    let (rows, cols) = table.data.dim();
    let dimension_error = |rows_to_drop: usize, rows: usize, cols: usize, reason: &str| {
        AfmError::Dimension {
            path: table.source.clone(),
            rows_to_drop,
            rows,
            cols,
            reason: reason.to_string(),
        }
    };

    let kept = (rows / block_size) * block_size;
    let rows_to_drop = rows
        .checked_sub(kept)
        .ok_or_else(|| dimension_error(0, rows, cols, "negative number of rows to drop"))?;

    let trimmed = if rows_to_drop == 0 {
        table.data.clone()
    } else {
        if cols < rows_to_drop {
            return Err(dimension_error(
                rows_to_drop,
                rows,
                cols,
                "fewer columns than rows to drop",
            ));
        }
        table
            .data
            .slice(s![..rows - rows_to_drop, ..cols - rows_to_drop])
            .to_owned()
    };

    let (side, width) = trimmed.dim();
    if side != width {
        return Err(dimension_error(
            rows_to_drop,
            side,
            width,
            "trimmed matrix is not square",
        ));
    }
    if side == 0 {
        return Err(dimension_error(
            rows_to_drop,
            rows,
            cols,
            "trimmed grid is empty",
        ));
    }
    if side % block_size != 0 {
        return Err(dimension_error(
            rows_to_drop,
            side,
            width,
            "trimmed side is not a multiple of the block size",
        ));
    }

    debug!(
        path = %table.source.display(),
        rows_to_drop,
        side,
        block_size,
        "Trimmed height table to grid"
    );
    Ok(Grid::new(trimmed, block_size, rows_to_drop))
}

/// Read a converted scan CSV and trim it with [`trim_to_grid`].
pub fn load_grid(path: &Path, block_size: usize) -> Result<Grid> {
    let table = read_height_table(path)?;
    trim_to_grid(&table, block_size)
}
