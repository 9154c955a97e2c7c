//! texatlas CLI — Command-line interface for texture atlas descriptors.
//!
//! Usage:
//!   texatlas inspect <FILE>      Show atlas metadata and planned frames
//!   texatlas probe <FILE>        Check whether a file can be imported
//!   texatlas import <FILE>       Import an atlas and write its record
//!   texatlas reimport <RECORD>   Re-run an import, reusing its assets

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use texatlas_common::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "texatlas",
    about = "Turn TexturePacker-style atlas descriptors into engine asset plans",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/texatlas/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show atlas metadata, frame identifiers and UV rectangles
    Inspect {
        /// Path to the descriptor
        path: PathBuf,
    },

    /// Check whether a descriptor can be imported
    Probe {
        /// Path to the descriptor
        path: PathBuf,
    },

    /// Import an atlas into an asset manifest
    Import {
        /// Path to the descriptor
        path: PathBuf,

        /// Package directory for the generated assets
        #[arg(short, long, default_value = "/Game/Atlases")]
        package: String,

        /// Atlas name (defaults to the descriptor's file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Output directory for the atlas record
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Re-run a previous import, updating its assets in place
    Reimport {
        /// Path to a `<name>.atlas.json` record
        record: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    texatlas_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Inspect { path } => commands::inspect::run(path, &config),
        Commands::Probe { path } => commands::probe::run(path, &config),
        Commands::Import {
            path,
            package,
            name,
            out,
        } => commands::import::run(path, package, name, out, &config),
        Commands::Reimport { record } => commands::reimport::run(record, &config),
    }
}
