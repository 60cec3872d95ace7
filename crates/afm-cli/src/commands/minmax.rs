use std::path::PathBuf;

use afm_core::consts::DEFAULT_BLOCK_SIZE;
use afm_core::minmax::process_file;
use anyhow::{Context, Result};
use clap::Args;

use crate::summary::print_minmax_summary;

#[derive(Args)]
pub struct MinMaxArgs {
    /// Converted CSV scan (with a DataLine column)
    pub file: PathBuf,

    /// Block size n for n x n blocks
    #[arg(short = 'm', long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub matrix_size: usize,

    /// Output directory (defaults to the directory of the input file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &MinMaxArgs) -> Result<()> {
    let (report, outputs) = process_file(&args.file, args.matrix_size, args.output.as_deref())
        .with_context(|| format!("Min/max analysis failed for {}", args.file.display()))?;

    print_minmax_summary(&args.file, &report);
    println!("Counts saved to {}", outputs.counts.display());
    println!("Blocks saved to {}", outputs.flattened.display());
    Ok(())
}
