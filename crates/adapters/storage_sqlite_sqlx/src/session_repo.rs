//! `SQLite` implementation of [`SessionRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use questionnaire_app::ports::SessionRepository;
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::session::{Session, SessionToken};
use questionnaire_domain::time::Timestamp;

use crate::codec::{decode_id, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

struct Wrapper(Session);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let token: String = row.try_get("token")?;
        let user_id: String = row.try_get("user_id")?;
        let expires_at: String = row.try_get("expires_at")?;

        Ok(Self(Session {
            token: SessionToken::from_raw(token),
            user_id: decode_id(&user_id)?,
            expires_at: decode_timestamp(&expires_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)";
const SELECT_BY_TOKEN: &str = "SELECT * FROM sessions WHERE token = ?";
const DELETE_BY_TOKEN: &str = "DELETE FROM sessions WHERE token = ?";
const DELETE_EXPIRED: &str = "DELETE FROM sessions WHERE expires_at <= ?";

/// `SQLite`-backed session repository.
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, QuestionnaireError> {
        sqlx::query(INSERT)
            .bind(session.token.as_str())
            .bind(session.user_id.to_string())
            .bind(encode_timestamp(session.expires_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(session)
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, QuestionnaireError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_TOKEN)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), QuestionnaireError> {
        sqlx::query(DELETE_BY_TOKEN)
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn delete_expired(&self, now: Timestamp) -> Result<u64, QuestionnaireError> {
        let result = sqlx::query(DELETE_EXPIRED)
            .bind(encode_timestamp(now))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected())
    }
}
