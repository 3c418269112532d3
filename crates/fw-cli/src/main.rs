//! CLI frontend for the Finsterwald story engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fw",
    about = "Finsterwald, a branching-narrative horror story engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a story file and report errors and warnings
    Check {
        /// Path to the story JSON file
        file: PathBuf,
    },

    /// Show statistics for a story file
    Stats {
        /// Path to the story JSON file
        file: PathBuf,
    },

    /// Display an ASCII graph of choice edges
    Graph {
        /// Focus on a specific node
        #[arg(short, long)]
        focus: Option<String>,

        /// Path to the story JSON file
        file: PathBuf,
    },

    /// Play a story in the terminal
    Play {
        /// Path to the story JSON file
        file: PathBuf,

        /// Player name
        #[arg(short, long, default_value = "Wanderer")]
        name: String,

        /// Directory for save files (omit for an in-memory session)
        #[arg(short, long)]
        save_dir: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file } => commands::check::run(&file),
        Commands::Stats { file } => commands::stats::run(&file),
        Commands::Graph { focus, file } => commands::graph::run(&file, focus.as_deref()),
        Commands::Play {
            file,
            name,
            save_dir,
        } => commands::play::run(&file, save_dir.as_deref(), &name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
