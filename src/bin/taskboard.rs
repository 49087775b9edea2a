//! Task board server binary.
//!
//! ```text
//! taskboard serve [--config taskboard.json]
//! taskboard migrate [--config taskboard.json]
//! ```
//!
//! Settings layer the optional JSON file under `TASKBOARD_`-prefixed
//! environment variables.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskboard::{config::BoardSettings, server, telemetry::init_tracing};

/// Task board backend.
#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Task board RPC server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the RPC API.
    Serve {
        /// JSON settings file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Create the board tables in `PostgreSQL`.
    Migrate {
        /// JSON settings file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { config } => {
            let settings = BoardSettings::load(config.as_deref())?;
            init_tracing(&settings.logging);
            server::serve(&settings).await
        }
        Command::Migrate { config } => {
            let settings = BoardSettings::load(config.as_deref())?;
            init_tracing(&settings.logging);
            server::migrate(&settings).await
        }
    }
}
