//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// An open, migrated `SQLite` database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open `database_url` (e.g. `sqlite:spothub.db` or `sqlite::memory:`),
    /// creating the file if missing, and run all pending migrations.
    ///
    /// Every connection enforces foreign keys, which the cascading spot
    /// delete depends on.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid or the connection or
    /// migrations fail.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!(database_url, "database ready");
        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
