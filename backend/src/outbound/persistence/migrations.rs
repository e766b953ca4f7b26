//! Embedded schema migrations, applied at startup.
//!
//! Migrations run on a blocking task over a plain synchronous connection;
//! the async pool is only built afterwards, so no request can observe a
//! partially migrated schema.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("failed to connect for migrations: {message}")]
    Connection {
        /// Driver-level failure detail.
        message: String,
    },

    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Harness-level failure detail.
        message: String,
    },
}

/// Apply any pending migrations against `database_url`.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();

    tokio::task::spawn_blocking(move || {
        let mut conn =
            PgConnection::establish(&database_url).map_err(|error| MigrationError::Connection {
                message: error.to_string(),
            })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|error| MigrationError::Apply {
                message: error.to_string(),
            })?;

        for migration in applied {
            info!(migration = %migration, "applied migration");
        }

        Ok(())
    })
    .await
    .map_err(|error| MigrationError::Apply {
        message: format!("migration task failed: {error}"),
    })?
}
