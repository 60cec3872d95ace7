mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "afm", about = "AFM surface scan analysis tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert raw .txt scans into CSV height tables
    Convert(commands::convert::ConvertArgs),
    /// Block-wise local min/max statistics of one CSV scan
    Minmax(commands::minmax::MinMaxArgs),
    /// Autocorrelation along both scan axes of one CSV scan
    Autocorr(commands::autocorr::AutocorrArgs),
    /// Run the full analysis pipeline over a data directory
    Run(commands::pipeline::RunArgs),
    /// Print or save the default pipeline config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Convert(args) => commands::convert::run(args),
        Commands::Minmax(args) => commands::minmax::run(args),
        Commands::Autocorr(args) => commands::autocorr::run(args),
        Commands::Run(args) => commands::pipeline::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
