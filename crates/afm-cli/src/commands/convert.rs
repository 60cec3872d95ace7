use std::path::PathBuf;

use afm_core::consts::{DEFAULT_HEADER_LINES, DEFAULT_MULTIPLY_CONST};
use afm_core::io::convert::convert_folder;
use afm_core::pipeline::config::ConversionConfig;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct ConvertArgs {
    /// Directory containing raw .txt scans (searched recursively)
    pub data: PathBuf,

    /// Output directory; each scan lands in <OUTPUT>/<stem>/<stem>.csv
    #[arg(short, long)]
    pub output: PathBuf,

    /// Scaling factor applied to raw values
    #[arg(short = 'c', long, default_value_t = DEFAULT_MULTIPLY_CONST)]
    pub multiply_const: f64,

    /// Instrument header lines to skip at the top of each file
    #[arg(long, default_value_t = DEFAULT_HEADER_LINES)]
    pub header_lines: usize,
}

pub fn run(args: &ConvertArgs) -> Result<()> {
    let config = ConversionConfig {
        multiply_const: args.multiply_const,
        header_lines: args.header_lines,
    };

    let converted = convert_folder(&args.data, &args.output, &config).with_context(|| {
        format!(
            "Failed to convert {} into {}",
            args.data.display(),
            args.output.display()
        )
    })?;

    if converted.is_empty() {
        println!("No .txt files found under {}", args.data.display());
        return Ok(());
    }
    for output in &converted {
        println!("  {}", output.display());
    }
    println!(
        "Converted {} file(s) into {}",
        converted.len(),
        args.output.display()
    );
    Ok(())
}
