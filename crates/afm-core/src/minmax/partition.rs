use ndarray::{s, ArrayView2};

use crate::error::{AfmError, Result};
use crate::table::Grid;

/// Row-major iterator over the non-overlapping `n×n` blocks of a square grid.
///
/// A clone is an independent cursor at the same position, so cloning before
/// consuming (or calling [`Grid::blocks`] again) walks the blocks twice.
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    data: ArrayView2<'a, f64>,
    size: usize,
    per_side: usize,
    next: usize,
}

impl<'a> Blocks<'a> {
    fn new_unchecked(data: ArrayView2<'a, f64>, size: usize) -> Self {
        let per_side = data.nrows() / size;
        Self {
            data,
            size,
            per_side,
            next: 0,
        }
    }

    /// Block side length.
    pub fn block_size(&self) -> usize {
        self.size
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = ArrayView2<'a, f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.per_side * self.per_side {
            return None;
        }
        let r0 = (self.next / self.per_side) * self.size;
        let c0 = (self.next % self.per_side) * self.size;
        self.next += 1;

        let n = self.size;
        Some(self.data.slice_move(s![r0..r0 + n, c0..c0 + n]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.per_side * self.per_side - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Blocks<'_> {}

/// Partition an arbitrary square view into `block_size` blocks.
///
/// Fails with a dimension error unless the view is square and its side is a
/// multiple of `block_size`.
pub fn partition(data: ArrayView2<'_, f64>, block_size: usize) -> Result<Blocks<'_>> {
    if block_size == 0 {
        return Err(AfmError::InvalidBlockSize(block_size));
    }
    let (rows, cols) = data.dim();
    if rows != cols || rows % block_size != 0 {
        return Err(AfmError::Dimension {
            path: Default::default(),
            rows_to_drop: 0,
            rows,
            cols,
            reason: format!("cannot split into {block_size}x{block_size} blocks"),
        });
    }
    Ok(Blocks::new_unchecked(data, block_size))
}

impl Grid {
    /// Blocks of this grid in row-major block order.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks::new_unchecked(self.data().view(), self.block_size())
    }
}
