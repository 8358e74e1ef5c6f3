//! Storage-specific error type wrapping sqlx errors.

use questionnaire_domain::error::QuestionnaireError;

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
    /// Whether the failure is a UNIQUE constraint violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(err) => err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            Self::Migration(_) => false,
        }
    }
}

impl From<StorageError> for QuestionnaireError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
