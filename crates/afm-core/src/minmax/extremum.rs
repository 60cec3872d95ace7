use ndarray::ArrayView2;

/// Block-relative coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Where the minimum and maximum of one block sit, and their values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtremumRecord {
    pub min: Position,
    pub max: Position,
    pub min_value: f64,
    pub max_value: f64,
}

/// Locate the minimum and maximum of a block.
///
/// Scans in row-major order and keeps the first occurrence on ties. A NaN
/// cell wins both positions, matching array libraries that propagate NaN
/// through argmin/argmax. Returns `None` for an empty block.
pub fn locate_extrema(block: &ArrayView2<'_, f64>) -> Option<ExtremumRecord> {
    let mut cells = block.indexed_iter();
    let ((row, col), &first) = cells.next()?;
    let start = Position::new(row, col);
    let mut record = ExtremumRecord {
        min: start,
        max: start,
        min_value: first,
        max_value: first,
    };
    if first.is_nan() {
        return Some(record);
    }

    for ((row, col), &value) in cells {
        let pos = Position::new(row, col);
        if value.is_nan() {
            return Some(ExtremumRecord {
                min: pos,
                max: pos,
                min_value: value,
                max_value: value,
            });
        }
        if value < record.min_value {
            record.min = pos;
            record.min_value = value;
        } else if value > record.max_value {
            record.max = pos;
            record.max_value = value;
        }
    }

    Some(record)
}
