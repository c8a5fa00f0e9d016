//! krumnet database tooling CLI.
//!
//! One binary wraps all schema work: applying and reverting versioned
//! migrations, loading seed data, and writing a schema-only dump of the
//! configured database.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

mod cli;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "krumnet", about = "Database tooling for krumnet")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Revert the most recently applied migration
    Revert,

    /// Show applied and pending migrations
    Status,

    /// Load the initial prompt seed data
    Seed,

    /// Write a schema-only dump of the configured database to dump.sql
    Dump,

    /// Print the resolved connection configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if let Err(e) = dotenvy::dotenv() {
        debug!("unable to load .env - {e}");
    }

    let result = match cli.command {
        Commands::Migrate => cli::migrate::run().await,
        Commands::Revert => cli::migrate::revert().await,
        Commands::Status => cli::migrate::status().await,
        Commands::Seed => cli::seed::run().await,
        Commands::Dump => cli::dump::run().await,
        Commands::Config { json } => cli::config::run(json).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
