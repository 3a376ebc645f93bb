//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! db-cli migrate run
//!
//! # List migrations with their applied state
//! db-cli migrate status
//!
//! # Undo the latest applied migration
//! db-cli migrate revert
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string, used when
//!   `--database-url` is not given
//!
//! # Migration Files
//!
//! The migration set is embedded at compile time from
//! `crates/api/migrations/`. Each migration is a reversible pair:
//!
//! ```text
//! migrations/
//! ├── 20260801000001_create_users.up.sql
//! ├── 20260801000001_create_users.down.sql
//! ├── 20260801000002_create_donations.up.sql
//! └── ...
//! ```

use std::collections::HashSet;

use sqlx::PgPool;
use sqlx::migrate::{Migrate, MigrationType, Migrator};

/// Migration set embedded from the api crate at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("../api/migrations");

/// Errors from migration commands.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if no connection string is available, the database
/// is unreachable, or a migration fails.
pub async fn run(database_url: Option<String>) -> Result<(), MigrationError> {
    let database_url = resolve_database_url(database_url)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Print every known migration with its applied/pending state.
///
/// # Errors
///
/// Returns an error if no connection string is available or the database
/// is unreachable.
pub async fn status(database_url: Option<String>) -> Result<(), MigrationError> {
    let database_url = resolve_database_url(database_url)?;
    let pool = PgPool::connect(&database_url).await?;

    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();
    drop(conn);

    for migration in MIGRATOR.iter() {
        // Down halves share a version with their up halves; list each once.
        if matches!(migration.migration_type, MigrationType::ReversibleDown) {
            continue;
        }
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        #[allow(clippy::print_stdout)]
        {
            println!("{:>14} {state} {}", migration.version, migration.description);
        }
    }

    Ok(())
}

/// Revert the most recently applied migration.
///
/// # Errors
///
/// Returns an error if no connection string is available, the database
/// is unreachable, or the down migration fails.
pub async fn revert(database_url: Option<String>) -> Result<(), MigrationError> {
    let database_url = resolve_database_url(database_url)?;
    let pool = PgPool::connect(&database_url).await?;

    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let mut versions: Vec<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();
    drop(conn);
    versions.sort_unstable();

    let Some(latest) = versions.pop() else {
        tracing::info!("No applied migrations to revert");
        return Ok(());
    };
    // Undo everything above the second-latest version, i.e. just the latest.
    let target = versions.last().copied().unwrap_or(0);

    tracing::info!(version = latest, "Reverting migration...");
    MIGRATOR.undo(&pool, target).await?;

    tracing::info!("Revert complete!");
    Ok(())
}

/// Resolve the connection string from the flag or `DATABASE_URL`.
fn resolve_database_url(flag: Option<String>) -> Result<String, MigrationError> {
    if let Some(url) = flag {
        return Ok(url);
    }
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").map_err(|_| MigrationError::MissingEnvVar("DATABASE_URL"))
}
