use std::path::PathBuf;

use afm_core::autocorr::process_file;
use afm_core::consts::DEFAULT_WIDTH_LINE;
use afm_core::pipeline::config::AutocorrelationConfig;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct AutocorrArgs {
    /// Converted CSV scan (with a DataLine column)
    pub file: PathBuf,

    /// Sampling interval for the lag axis, in µm
    #[arg(short, long, default_value_t = DEFAULT_WIDTH_LINE)]
    pub width_line: f64,

    /// Output directory (defaults to the directory of the input file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the SVG plot
    #[arg(long)]
    pub no_plot: bool,
}

pub fn run(args: &AutocorrArgs) -> Result<()> {
    let config = AutocorrelationConfig {
        enabled: true,
        width_line: args.width_line,
        plot: !args.no_plot,
    };

    let (table, outputs) = process_file(&args.file, &config, args.output.as_deref())
        .with_context(|| format!("Autocorrelation failed for {}", args.file.display()))?;

    println!("File:        {}", args.file.display());
    println!("Series:      {}", table.x.series_index);
    println!("Lags (x):    {}", table.x.acf.len());
    println!("Lags (y):    {}", table.y.acf.len());
    println!("Table:       {}", outputs.table.display());
    if let Some(ref plot) = outputs.plot {
        println!("Plot:        {}", plot.display());
    }
    Ok(())
}
