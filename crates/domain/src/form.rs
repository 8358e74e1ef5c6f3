//! Submission schemas: raw request fields in, typed values or field errors out.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::FieldErrors;
use crate::id::QuestionId;

/// Maximum length of an answer, in characters.
pub const MAX_CONTENT_LEN: usize = 1000;

/// Message for a missing or blank required field.
pub const REQUIRED: &str = "This field is required.";
/// Message for a reference that does not resolve to a stored record.
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Trim a raw field, mapping blank input to `None`.
pub(crate) fn cleaned(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Raw fields of an answer submission.
///
/// There is deliberately no user field: ownership comes from the session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerForm {
    pub question: Option<String>,
    pub content: Option<String>,
}

/// Raw fields of a login attempt. Missing fields simply fail authentication.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// A validated answer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerInput {
    pub question_id: QuestionId,
    pub content: String,
}

impl AnswerForm {
    /// The submitted question reference, if it parses.
    #[must_use]
    pub fn question_id(&self) -> Option<QuestionId> {
        cleaned(self.question.as_deref()).and_then(|raw| QuestionId::from_str(raw).ok())
    }

    /// Validate every field, collecting all errors.
    ///
    /// This only checks shape; whether the question exists is decided by the
    /// caller against storage and reported under the same `question` key.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors when any field is missing or malformed.
    pub fn validate(&self) -> Result<AnswerInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let question_id = match cleaned(self.question.as_deref()) {
            None => {
                errors.add("question", REQUIRED);
                None
            }
            Some(raw) => QuestionId::from_str(raw)
                .inspect_err(|_| errors.add("question", INVALID_CHOICE))
                .ok(),
        };

        let content = match cleaned(self.content.as_deref()) {
            None => {
                errors.add("content", REQUIRED);
                None
            }
            Some(text) => {
                let len = text.chars().count();
                if len > MAX_CONTENT_LEN {
                    errors.add(
                        "content",
                        format!(
                            "Ensure this value has at most {MAX_CONTENT_LEN} characters (it has {len})."
                        ),
                    );
                    None
                } else {
                    Some(text.to_owned())
                }
            }
        };

        match (question_id, content) {
            (Some(question_id), Some(content)) if errors.is_empty() => Ok(AnswerInput {
                question_id,
                content,
            }),
            _ => Err(errors),
        }
    }
}
