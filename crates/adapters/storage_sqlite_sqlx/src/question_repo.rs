//! `SQLite` implementation of [`QuestionRepository`].
//!
//! [`QuestionQuery`] predicates are compiled into a single `SELECT` with
//! [`QueryBuilder`], so filtering happens inside the database. The
//! requester's answer is attached through a `LEFT JOIN` restricted to that
//! user, which never multiplies rows since answers are unique per
//! `(user_id, question_id)`.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use questionnaire_app::ports::QuestionRepository;
use questionnaire_domain::answer::Answer;
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::id::QuestionId;
use questionnaire_domain::query::{EndTimeBound, Equality, Predicate, QuestionQuery};
use questionnaire_domain::question::Question;

use crate::codec::{decode_id, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

fn decode_question(row: &SqliteRow) -> Result<Question, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let title: String = row.try_get("title")?;
    let end_time: Option<String> = row.try_get("end_time")?;

    Ok(Question {
        id: decode_id(&id)?,
        title,
        end_time: end_time.as_deref().map(decode_timestamp).transpose()?,
    })
}

struct Wrapper(Question);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        decode_question(row).map(Self)
    }
}

/// A question joined with the requester's answer, if any.
struct ListingRow(Question, Option<Answer>);

impl<'r> FromRow<'r, SqliteRow> for ListingRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let question = decode_question(row)?;
        let answer_id: Option<String> = row.try_get("answer_id")?;

        let answer = match answer_id {
            Some(answer_id) => {
                let user_id: String = row.try_get("answer_user_id")?;
                let content: String = row.try_get("answer_content")?;
                let updated_at: String = row.try_get("answer_updated_at")?;
                Some(Answer {
                    id: decode_id(&answer_id)?,
                    user_id: decode_id(&user_id)?,
                    question_id: question.id,
                    content,
                    updated_at: decode_timestamp(&updated_at)?,
                })
            }
            None => None,
        };

        Ok(Self(question, answer))
    }
}

const INSERT: &str = "INSERT INTO questions (id, title, end_time) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM questions WHERE id = ?";

const SELECT_LISTING: &str = r"
    SELECT q.id, q.title, q.end_time,
           a.id AS answer_id, a.user_id AS answer_user_id,
           a.content AS answer_content, a.updated_at AS answer_updated_at
    FROM questions q
    LEFT JOIN answers a ON a.question_id = q.id AND a.user_id = ";

/// Append `predicate` as one parenthesised boolean expression over `q`.
fn push_predicate(builder: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::Equals(Equality::Title(title)) => {
            builder.push("(q.title = ");
            builder.push_bind(title.clone());
            builder.push(")");
        }
        Predicate::Equals(Equality::AnsweredBy(user_id)) => {
            builder.push(
                "(EXISTS (SELECT 1 FROM answers x WHERE x.question_id = q.id AND x.user_id = ",
            );
            builder.push_bind(user_id.to_string());
            builder.push("))");
        }
        Predicate::Range(EndTimeBound::AtOrAfter(instant)) => {
            builder.push("(q.end_time IS NOT NULL AND q.end_time >= ");
            builder.push_bind(encode_timestamp(*instant));
            builder.push(")");
        }
        Predicate::Range(EndTimeBound::Before(instant)) => {
            builder.push("(q.end_time IS NOT NULL AND q.end_time < ");
            builder.push_bind(encode_timestamp(*instant));
            builder.push(")");
        }
        Predicate::TitleContains(needle) => {
            builder.push("(instr(lower(q.title), lower(");
            builder.push_bind(needle.clone());
            builder.push(")) > 0)");
        }
    }
}

fn build_find(query: &QuestionQuery) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(SELECT_LISTING);
    builder.push_bind(query.user_answer().map(|id| id.to_string()));
    builder.push(" WHERE 1 = 1");

    for predicate in query.inclusions() {
        builder.push(" AND ");
        push_predicate(&mut builder, predicate);
    }
    for predicate in query.exclusions() {
        builder.push(" AND NOT ");
        push_predicate(&mut builder, predicate);
    }

    builder.push(" ORDER BY q.title, q.id");
    builder
}

/// `SQLite`-backed question repository.
pub struct SqliteQuestionRepository {
    pool: SqlitePool,
}

impl SqliteQuestionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl QuestionRepository for SqliteQuestionRepository {
    async fn create(&self, question: Question) -> Result<Question, QuestionnaireError> {
        sqlx::query(INSERT)
            .bind(question.id.to_string())
            .bind(&question.title)
            .bind(question.end_time.map(encode_timestamp))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(question)
    }

    async fn get_by_id(&self, id: QuestionId) -> Result<Option<Question>, QuestionnaireError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn find(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<(Question, Option<Answer>)>, QuestionnaireError> {
        let mut builder = build_find(query);
        let rows: Vec<ListingRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|row| (row.0, row.1)).collect())
    }
}
