//! Age of Fantasy - Catalog Tools

use std::path::PathBuf;

use aof_core::error::Result;
use aof_core::loader::LoadOptions;
use aof_tools::commands;
use aof_tools::pick::Pick;
use aof_tools::validate::{default_data_dir, validate_path, DATA_DIR_ENV};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aof-tools")]
#[command(about = "Catalog tools for Age of Fantasy faction data")]
struct Cli {
    /// Reject unknown keys instead of preserving them
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a data file or every data file in a directory
    Validate {
        /// File or directory (defaults to $AOF_DATA_DIR, then assets/data/factions)
        path: Option<PathBuf>,
    },
    /// List the units of a faction document
    Units {
        /// Faction document
        file: PathBuf,
    },
    /// List the upgrade options of a unit
    Options {
        /// Faction document
        file: PathBuf,
        /// Unit name
        unit: String,
    },
    /// Itemize the points cost of a unit with upgrades
    Cost {
        /// Faction document
        file: PathBuf,
        /// Unit name
        unit: String,
        /// Upgrade pick as GROUP=OPTION (repeatable)
        #[arg(long = "select", value_name = "GROUP=OPTION")]
        picks: Vec<Pick>,
    },
    /// Show the effective profile of a unit with upgrades
    Profile {
        /// Faction document
        file: PathBuf,
        /// Unit name
        unit: String,
        /// Upgrade pick as GROUP=OPTION (repeatable)
        #[arg(long = "select", value_name = "GROUP=OPTION")]
        picks: Vec<Pick>,
    },
    /// Cost an army list against a faction document
    Army {
        /// Faction document
        file: PathBuf,
        /// Army list (JSON)
        army: PathBuf,
    },
}

fn run(command: Commands, options: &LoadOptions) -> Result<bool> {
    let output = match command {
        Commands::Validate { path } => {
            let path = path.unwrap_or_else(default_data_dir);
            tracing::info!("Validating data files in: {}", path.display());
            let summary = validate_path(&path, options)?;
            println!("{summary}");
            return Ok(summary.is_success());
        }
        Commands::Units { file } => commands::units(&file, options)?,
        Commands::Options { file, unit } => commands::options(&file, &unit, options)?,
        Commands::Cost { file, unit, picks } => commands::cost(&file, &unit, &picks, options)?,
        Commands::Profile { file, unit, picks } => {
            commands::profile(&file, &unit, &picks, options)?
        }
        Commands::Army { file, army } => commands::army(&file, &army, options)?,
    };
    print!("{output}");
    Ok(true)
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let options = if cli.strict {
        LoadOptions::strict()
    } else {
        LoadOptions::default()
    };
    tracing::debug!("{DATA_DIR_ENV}={:?}", std::env::var(DATA_DIR_ENV).ok());

    match run(cli.command, &options) {
        Ok(true) => {}
        Ok(false) => {
            tracing::error!("Validation failed");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
