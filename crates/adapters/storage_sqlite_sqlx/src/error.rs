//! Storage-specific error type wrapping sqlx errors.

use spothub_domain::error::SpotHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether this is a violation of a `UNIQUE` constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(err)) => err.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<StorageError> for SpotHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_as_storage_error() {
        let err: SpotHubError = StorageError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, SpotHubError::Storage(_)));
    }

    #[test]
    fn should_not_flag_other_errors_as_unique_violation() {
        assert!(!StorageError::Database(sqlx::Error::PoolTimedOut).is_unique_violation());
    }
}
