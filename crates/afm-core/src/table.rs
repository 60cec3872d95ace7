use ndarray::Array2;
use std::path::{Path, PathBuf};

/// A height map read from a converted scan CSV.
///
/// The `DataLine` row-index column is consumed while reading; `data` holds
/// only the value columns, row-major, shape = (rows, columns).
#[derive(Clone, Debug)]
pub struct HeightTable {
    /// Names of the value columns, in file order.
    pub columns: Vec<String>,
    pub data: Array2<f64>,
    /// File the table was read from, used in error messages.
    pub source: PathBuf,
}

impl HeightTable {
    pub fn new(columns: Vec<String>, data: Array2<f64>, source: impl AsRef<Path>) -> Self {
        Self {
            columns,
            data,
            source: source.as_ref().to_path_buf(),
        }
    }

    /// Build a table with generated `Pos = i` column names.
    pub fn from_array(data: Array2<f64>, source: impl AsRef<Path>) -> Self {
        let columns = (0..data.ncols())
            .map(|i| format!("{}{i}", crate::consts::POSITION_COLUMN_PREFIX))
            .collect();
        Self::new(columns, data, source)
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }
}

/// A square height map whose side is a multiple of `block_size`.
///
/// Only [`crate::minmax::loader::trim_to_grid`] constructs grids, which
/// guarantees the invariant: `block_size >= 1` and the side is a non-zero
/// multiple of it.
#[derive(Clone, Debug)]
pub struct Grid {
    data: Array2<f64>,
    block_size: usize,
    rows_to_drop: usize,
}

impl Grid {
    pub(crate) fn new(data: Array2<f64>, block_size: usize, rows_to_drop: usize) -> Self {
        Self {
            data,
            block_size,
            rows_to_drop,
        }
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Rows (and columns) removed from the trailing edge while loading.
    pub fn rows_to_drop(&self) -> usize {
        self.rows_to_drop
    }

    pub fn side(&self) -> usize {
        self.data.nrows()
    }

    /// Number of blocks along one side.
    pub fn blocks_per_side(&self) -> usize {
        self.side() / self.block_size
    }

    pub fn block_count(&self) -> usize {
        self.blocks_per_side() * self.blocks_per_side()
    }
}
