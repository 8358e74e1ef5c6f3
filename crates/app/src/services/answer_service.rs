//! Answer service: the single write path: validated upsert of the caller's answer.

use questionnaire_domain::answer::Answer;
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::form::{AnswerForm, INVALID_CHOICE};
use questionnaire_domain::time::now;

use crate::context::RequestContext;
use crate::ports::{AnswerRepository, QuestionRepository};

/// Confirmation returned to clients after a successful submission.
pub const ANSWER_SAVED: &str = "Answer object was created/updated";

/// Application service for answer submission.
pub struct AnswerService<Q, A> {
    questions: Q,
    answers: A,
}

impl<Q: QuestionRepository, A: AnswerRepository> AnswerService<Q, A> {
    /// Create a new service backed by the given repositories.
    pub fn new(questions: Q, answers: A) -> Self {
        Self { questions, answers }
    }

    /// Validate a submission and store it as the caller's answer.
    ///
    /// The owner always comes from `ctx`. A second submission for the same
    /// question replaces the content of the first instead of adding a row.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::AuthRequired`] for anonymous callers
    /// (before touching storage), [`QuestionnaireError::Validation`] with every
    /// failing field, or a storage error from the repositories.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        form: &AnswerForm,
    ) -> Result<Answer, QuestionnaireError> {
        let user = ctx.require_user()?;

        let mut outcome = form.validate();
        if let Some(question_id) = form.question_id()
            && self.questions.get_by_id(question_id).await?.is_none()
        {
            let mut errors = outcome.err().unwrap_or_default();
            errors.add("question", INVALID_CHOICE);
            outcome = Err(errors);
        }
        let input = outcome?;

        let timestamp = now();
        let answer = match self
            .answers
            .find_by_user_and_question(user.id, input.question_id)
            .await?
        {
            Some(mut existing) => {
                existing.revise(input.content, timestamp);
                existing
            }
            None => Answer::new(user.id, input.question_id, input.content, timestamp),
        };

        let stored = self.answers.upsert(answer).await?;
        tracing::info!(
            user_id = %stored.user_id,
            question_id = %stored.question_id,
            answer_id = %stored.id,
            "answer saved"
        );
        Ok(stored)
    }
}
