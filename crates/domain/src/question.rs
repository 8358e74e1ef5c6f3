//! Question: a poll item with a title and an optional closing time.

use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::error::{FieldErrors, QuestionnaireError};
use crate::id::QuestionId;
use crate::time::Timestamp;

/// Maximum length of a question title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// A questionnaire item users can answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    /// Deadline for answers. `None` means the question never closes.
    pub end_time: Option<Timestamp>,
}

impl Question {
    /// Create a builder for constructing a [`Question`].
    #[must_use]
    pub fn builder() -> QuestionBuilder {
        QuestionBuilder::default()
    }

    /// Whether the question still accepts answers at `now`.
    ///
    /// A question is active until its end time has strictly passed.
    #[must_use]
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.end_time.is_none_or(|end| end >= now)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::Validation`] when the title is blank or
    /// longer than [`MAX_TITLE_LEN`].
    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "This field is required.");
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            errors.add(
                "title",
                format!("Ensure this value has at most {MAX_TITLE_LEN} characters."),
            );
        }
        errors.into_result(()).map_err(Into::into)
    }
}

/// Step-by-step builder for [`Question`].
#[derive(Debug, Default)]
pub struct QuestionBuilder {
    id: Option<QuestionId>,
    title: Option<String>,
    end_time: Option<Timestamp>,
}

impl QuestionBuilder {
    #[must_use]
    pub fn id(mut self, id: QuestionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn end_time(mut self, end_time: Timestamp) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Consume the builder, validate, and return a [`Question`].
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::Validation`] if the title is missing,
    /// blank or too long.
    pub fn build(self) -> Result<Question, QuestionnaireError> {
        let question = Question {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            end_time: self.end_time,
        };
        question.validate()?;
        Ok(question)
    }
}

/// A question as listed to one user, carrying that user's own answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionListing {
    #[serde(flatten)]
    pub question: Question,
    /// Whether the question was open at listing time.
    pub is_active: bool,
    /// The requesting user's answer, never anyone else's.
    pub user_answer: Option<Answer>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::time::now;

    #[test]
    fn should_build_valid_question_when_title_provided() {
        let question = Question::builder().title("Favourite colour?").build().unwrap();
        assert_eq!(question.title, "Favourite colour?");
        assert!(question.end_time.is_none());
    }

    #[test]
    fn should_reject_blank_title() {
        let result = Question::builder().title("   ").build();
        let Err(QuestionnaireError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.get("title").is_some());
    }

    #[test]
    fn should_reject_title_longer_than_limit() {
        let result = Question::builder()
            .title("x".repeat(MAX_TITLE_LEN + 1))
            .build();
        assert!(matches!(result, Err(QuestionnaireError::Validation(_))));
    }

    #[test]
    fn should_be_active_when_no_end_time() {
        let question = Question::builder().title("Open").build().unwrap();
        assert!(question.is_active(now()));
    }

    #[test]
    fn should_be_active_until_end_time_passes() {
        let current = now();
        let question = Question::builder()
            .title("Closing")
            .end_time(current)
            .build()
            .unwrap();

        assert!(question.is_active(current));
        assert!(!question.is_active(current + Duration::seconds(1)));
    }

    #[test]
    fn should_flatten_question_fields_in_listing() {
        let question = Question::builder().title("Flat").build().unwrap();
        let listing = QuestionListing {
            question: question.clone(),
            is_active: true,
            user_answer: None,
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["id"], serde_json::json!(question.id));
        assert_eq!(json["title"], "Flat");
        assert_eq!(json["end_time"], serde_json::Value::Null);
        assert_eq!(json["user_answer"], serde_json::Value::Null);
    }
}
