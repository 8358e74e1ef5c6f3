//! Storage port: repository traits for persistence.

use std::future::Future;

use questionnaire_domain::answer::Answer;
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::id::{QuestionId, UserId};
use questionnaire_domain::query::QuestionQuery;
use questionnaire_domain::question::Question;
use questionnaire_domain::session::{Session, SessionToken};
use questionnaire_domain::time::Timestamp;
use questionnaire_domain::user::User;

/// Repository for persisting and querying [`Question`]s.
pub trait QuestionRepository {
    /// Create a new question in storage.
    fn create(
        &self,
        question: Question,
    ) -> impl Future<Output = Result<Question, QuestionnaireError>> + Send;

    /// Get a question by its unique identifier.
    fn get_by_id(
        &self,
        id: QuestionId,
    ) -> impl Future<Output = Result<Option<Question>, QuestionnaireError>> + Send;

    /// Run a composed query.
    ///
    /// Each selected question is paired with the answer of
    /// [`QuestionQuery::user_answer`], or `None` when that user has not
    /// answered or no user was requested. Results are ordered by title, then id.
    fn find(
        &self,
        query: &QuestionQuery,
    ) -> impl Future<Output = Result<Vec<(Question, Option<Answer>)>, QuestionnaireError>> + Send;
}

/// Repository for persisting and querying [`Answer`]s.
pub trait AnswerRepository {
    /// Get the answer a user gave to a question, if any.
    fn find_by_user_and_question(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> impl Future<Output = Result<Option<Answer>, QuestionnaireError>> + Send;

    /// Insert the answer, or overwrite content and `updated_at` of the one
    /// already stored for the same user and question. Returns the stored row.
    fn upsert(
        &self,
        answer: Answer,
    ) -> impl Future<Output = Result<Answer, QuestionnaireError>> + Send;
}

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Create a new user in storage.
    fn create(&self, user: User) -> impl Future<Output = Result<User, QuestionnaireError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, QuestionnaireError>> + Send;

    /// Get a user by exact username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, QuestionnaireError>> + Send;
}

/// Repository for login [`Session`]s.
pub trait SessionRepository {
    /// Persist a freshly issued session.
    fn create(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<Session, QuestionnaireError>> + Send;

    /// Look a session up by token, expired or not.
    fn get(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<Option<Session>, QuestionnaireError>> + Send;

    /// Delete a session. Deleting an unknown token is not an error.
    fn delete(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<(), QuestionnaireError>> + Send;

    /// Delete every session that expired at or before `now`, returning how many went.
    fn delete_expired(
        &self,
        now: Timestamp,
    ) -> impl Future<Output = Result<u64, QuestionnaireError>> + Send;
}
