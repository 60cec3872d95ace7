use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;

use crate::error::Result;

use super::aggregate::AggregatedCount;
use super::{FlattenedBlocks, MinMaxReport};

/// Column name of a block-relative cell in the flattened table.
pub fn column_name(row: usize, col: usize) -> String {
    format!("ri_{row}_ci_{col}")
}

const COUNTS_FILE_PREFIX: &str = "min_max_ix(";
const FLATTENED_FILE_PREFIX: &str = "flattened_submat(";

/// `min_max_ix(<n>x<n>).csv`
pub fn counts_file_name(block_size: usize) -> String {
    format!("{COUNTS_FILE_PREFIX}{block_size}x{block_size}).csv")
}

/// `flattened_submat(<n>x<n>).csv`
pub fn flattened_file_name(block_size: usize) -> String {
    format!("{FLATTENED_FILE_PREFIX}{block_size}x{block_size}).csv")
}

/// Whether `path` names a table written by [`save_report`], for any block size.
pub fn is_min_max_output(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".csv")
        && (name.starts_with(COUNTS_FILE_PREFIX) || name.starts_with(FLATTENED_FILE_PREFIX))
}

/// Paths written by [`save_report`].
#[derive(Clone, Debug)]
pub struct MinMaxOutputs {
    pub counts: PathBuf,
    pub flattened: PathBuf,
}

/// Write the aggregated counts table (`r,c,count,kind`).
pub fn write_counts<W: Write>(counts: &[AggregatedCount], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["r", "c", "count", "kind"])?;
    for c in counts {
        wtr.write_record([
            c.row.to_string(),
            c.col.to_string(),
            c.count.to_string(),
            c.kind.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the flattened blocks table, one row per block.
pub fn write_flattened<W: Write>(blocks: &FlattenedBlocks, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(blocks.column_names())?;
    for row in blocks.data.rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write both tables of `report` into `dir`.
pub fn save_report(report: &MinMaxReport, dir: &Path) -> Result<MinMaxOutputs> {
    fs::create_dir_all(dir)?;
    let outputs = MinMaxOutputs {
        counts: dir.join(counts_file_name(report.block_size)),
        flattened: dir.join(flattened_file_name(report.block_size)),
    };

    write_counts(&report.counts, File::create(&outputs.counts)?)?;
    write_flattened(&report.flattened, File::create(&outputs.flattened)?)?;

    info!(
        counts = %outputs.counts.display(),
        flattened = %outputs.flattened.display(),
        "Saved min/max tables"
    );
    Ok(outputs)
}
