//! `SQLite` implementation of [`AnswerRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use questionnaire_app::ports::AnswerRepository;
use questionnaire_domain::answer::Answer;
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::id::{QuestionId, UserId};

use crate::codec::{decode_id, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

struct Wrapper(Answer);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let question_id: String = row.try_get("question_id")?;
        let content: String = row.try_get("content")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Answer {
            id: decode_id(&id)?,
            user_id: decode_id(&user_id)?,
            question_id: decode_id(&question_id)?,
            content,
            updated_at: decode_timestamp(&updated_at)?,
        }))
    }
}

const SELECT_BY_USER_AND_QUESTION: &str =
    "SELECT * FROM answers WHERE user_id = ? AND question_id = ?";

// The conflict target keeps the first row's id, so a resubmission never
// changes the answer's identity.
const UPSERT: &str = r"
    INSERT INTO answers (id, user_id, question_id, content, updated_at)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (user_id, question_id) DO UPDATE
    SET content = excluded.content, updated_at = excluded.updated_at
    RETURNING *
";

/// `SQLite`-backed answer repository.
pub struct SqliteAnswerRepository {
    pool: SqlitePool,
}

impl SqliteAnswerRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AnswerRepository for SqliteAnswerRepository {
    async fn find_by_user_and_question(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<Option<Answer>, QuestionnaireError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USER_AND_QUESTION)
            .bind(user_id.to_string())
            .bind(question_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn upsert(&self, answer: Answer) -> Result<Answer, QuestionnaireError> {
        let row: Wrapper = sqlx::query_as(UPSERT)
            .bind(answer.id.to_string())
            .bind(answer.user_id.to_string())
            .bind(answer.question_id.to_string())
            .bind(&answer.content)
            .bind(encode_timestamp(answer.updated_at))
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }
}
