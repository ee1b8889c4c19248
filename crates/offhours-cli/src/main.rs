use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod state;

#[derive(Parser)]
#[command(
    name = "offhours",
    version,
    about = "Declarative start/stop schedules for managed database instances"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a declaration file against the resource schema
    Validate {
        /// Path to the declaration TOML
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Create or update the remote schedule to match a declaration
    Apply {
        /// Path to the declaration TOML
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Read remote state for the tracked schedule
    Show {
        /// Print the raw state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the tracked schedule
    Destroy,
    /// Adopt a pre-existing remote schedule into tracked state
    Import {
        /// Composite schedule id (.../startStopSchedules/default)
        id: String,
    },
    /// Token management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Endpoint configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Apply { file } => commands::apply::run(&file),
        Commands::Show { json } => commands::show::run(json),
        Commands::Destroy => commands::destroy::run(),
        Commands::Import { id } => commands::import::run(&id),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
