//! Immuno CLI - Command-line interface for the immune response automaton.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "immuno")]
#[command(
    author,
    version,
    about = "Immuno - Immune response cellular automaton",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default immuno.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run a simulation
    Run {
        /// Number of steps (default: from immuno.toml)
        #[arg(short, long)]
        steps: Option<u64>,

        /// RNG seed (default: from immuno.toml, else random)
        #[arg(long)]
        seed: Option<u64>,

        /// Switch to disease mode before the first step
        #[arg(short, long)]
        disease: bool,

        /// Write per-step reports as JSON
        #[arg(short, long)]
        output: Option<String>,

        /// Include rendered frames in the JSON output
        #[arg(short, long, requires = "output")]
        frames: bool,
    },

    /// Compare antigen clearance in healthy and disease mode
    Compare {
        /// Step budget per run (default: from immuno.toml)
        #[arg(short, long)]
        steps: Option<u64>,

        /// Number of seeded runs per mode
        #[arg(short, long, default_value = "10")]
        runs: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            steps,
            seed,
            disease,
            output,
            frames,
        } => commands::run::run(commands::run::RunOptions {
            steps,
            seed,
            disease,
            output,
            frames,
        }),
        Commands::Compare { steps, runs } => commands::compare::run(steps, runs),
    }
}
