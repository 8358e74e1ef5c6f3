//! Question service: filtered listing and operator-side creation.

use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::filter::QuestionFilterForm;
use questionnaire_domain::question::{Question, QuestionListing};
use questionnaire_domain::time::now;

use crate::context::RequestContext;
use crate::ports::QuestionRepository;

/// Application service for reading and creating questions.
pub struct QuestionService<Q> {
    repo: Q,
}

impl<Q: QuestionRepository> QuestionService<Q> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: Q) -> Self {
        Self { repo }
    }

    /// List questions matching the caller's filters.
    ///
    /// Each listing carries the caller's own answer, if any, and never
    /// another user's.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::AuthRequired`] for anonymous callers
    /// (before touching storage), [`QuestionnaireError::Validation`] for bad
    /// filter values, or a storage error from the repository.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        form: &QuestionFilterForm,
    ) -> Result<Vec<QuestionListing>, QuestionnaireError> {
        let user = ctx.require_user()?;
        let filter = form.validate()?;

        let current = now();
        let query = filter.to_query(user.id, current);
        let rows = self.repo.find(&query).await?;
        tracing::debug!(user_id = %user.id, count = rows.len(), "questions listed");

        Ok(rows
            .into_iter()
            .map(|(question, user_answer)| QuestionListing {
                is_active: question.is_active(current),
                question,
                user_answer,
            })
            .collect())
    }

    /// Create a question after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_question(&self, question: Question) -> Result<Question, QuestionnaireError> {
        question.validate()?;
        let created = self.repo.create(question).await?;
        tracing::info!(question_id = %created.id, title = %created.title, "question created");
        Ok(created)
    }
}
