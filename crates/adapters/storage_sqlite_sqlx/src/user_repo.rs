//! `SQLite` implementation of [`UserRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use questionnaire_app::ports::UserRepository;
use questionnaire_domain::error::{FieldErrors, QuestionnaireError};
use questionnaire_domain::id::UserId;
use questionnaire_domain::user::User;

use crate::codec::decode_id;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let username: String = row.try_get("username")?;
        let password_hash: String = row.try_get("password_hash")?;

        Ok(Self(User {
            id: decode_id(&id)?,
            username,
            password_hash,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (id, username, password_hash) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_USERNAME: &str = "SELECT * FROM users WHERE username = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, QuestionnaireError> {
        let result = sqlx::query(INSERT)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from);

        match result {
            Ok(_) => Ok(user),
            Err(err) if err.is_unique_violation() => Err(FieldErrors::single(
                "username",
                "A user with that username already exists.",
            )
            .into()),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, QuestionnaireError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, QuestionnaireError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}
