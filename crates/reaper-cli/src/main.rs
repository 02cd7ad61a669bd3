mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reaper", about = "Crop, resize and convert images")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image metadata
    Info(commands::info::InfoArgs),
    /// Crop an image to a pixel or display-space rectangle
    Crop(commands::crop::CropArgs),
    /// Resize an image to exact dimensions
    Resize(commands::resize::ResizeArgs),
    /// Convert images to another format
    Convert(commands::convert::ConvertArgs),
    /// Print or save the default editor config
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

    let config = commands::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Crop(args) => commands::crop::run(args),
        Commands::Resize(args) => commands::resize::run(args, &config),
        Commands::Convert(args) => commands::convert::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
