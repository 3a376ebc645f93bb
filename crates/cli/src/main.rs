//! Donate Bridge CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! db-cli migrate run
//!
//! # Show which migrations are applied and which are pending
//! db-cli migrate status
//!
//! # Revert the most recently applied migration
//! db-cli migrate revert
//! ```
//!
//! # Commands
//!
//! - `migrate run` - Apply pending migrations
//! - `migrate status` - List migrations with their applied state
//! - `migrate revert` - Undo the latest applied migration
//!
//! The connection string comes from `--database-url` or the `DATABASE_URL`
//! environment variable (a local `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "db-cli")]
#[command(author, version, about = "Donate Bridge CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage database migrations
    Migrate {
        /// PostgreSQL connection string (overrides DATABASE_URL)
        #[arg(long, global = true)]
        database_url: Option<String>,

        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Run,
    /// Show applied and pending migrations
    Status,
    /// Revert the most recently applied migration
    Revert,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate {
            database_url,
            action,
        } => match action {
            MigrateAction::Run => commands::migrate::run(database_url).await?,
            MigrateAction::Status => commands::migrate::status(database_url).await?,
            MigrateAction::Revert => commands::migrate::revert(database_url).await?,
        },
    }
    Ok(())
}
