use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use ndarray::Array2;
use tracing::debug;

use crate::consts::{POSITION_COLUMN_PREFIX, ROW_INDEX_COLUMN};
use crate::error::{AfmError, Result};
use crate::table::HeightTable;

/// Read a converted scan CSV.
///
/// The file must carry a `DataLine` column (any position); every other
/// column is parsed as `f64`. Empty fields read as NaN.
pub fn read_height_table(path: &Path) -> Result<HeightTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();

    let index_col = headers
        .iter()
        .position(|h| h.trim() == ROW_INDEX_COLUMN)
        .ok_or_else(|| AfmError::MissingColumn {
            path: path.to_path_buf(),
            column: ROW_INDEX_COLUMN.to_string(),
        })?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index_col)
        .map(|(_, h)| h.trim().to_string())
        .collect();

    let mut values = Vec::new();
    let mut rows = 0usize;
    for record in rdr.records() {
        let record = record?;
        // Header is line 1.
        let line = record.position().map_or(rows + 2, |p| p.line() as usize);
        for (col, field) in record.iter().enumerate() {
            if col == index_col {
                continue;
            }
            values.push(parse_field(field, path, line)?);
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(AfmError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let data = Array2::from_shape_vec((rows, columns.len()), values)
        .map_err(|e| AfmError::Pipeline(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), rows, cols = columns.len(), "Read height table");
    Ok(HeightTable::new(columns, data, path))
}

fn parse_field(field: &str, path: &Path, line: usize) -> Result<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|e| AfmError::Parse {
        path: path.to_path_buf(),
        line,
        message: format!("invalid number '{field}': {e}"),
    })
}

/// Write a height matrix in the converted scan layout:
/// `DataLine,Pos = 0,Pos = 1,...` followed by one indexed row per scan line.
pub fn write_height_table<W: Write>(data: &Array2<f64>, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    let mut header = Vec::with_capacity(data.ncols() + 1);
    header.push(ROW_INDEX_COLUMN.to_string());
    header.extend((0..data.ncols()).map(|i| format!("{POSITION_COLUMN_PREFIX}{i}")));
    wtr.write_record(&header)?;

    for (index, row) in data.rows().into_iter().enumerate() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(index.to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Create `path` and write `data` into it with [`write_height_table`].
pub fn save_height_table(data: &Array2<f64>, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_height_table(data, file)
}
