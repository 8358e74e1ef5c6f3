//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`QuestionnaireError`] via `From`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Field key used for errors that are not bound to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Per-field validation messages, keyed by field name.
///
/// Serializes as `{"field": ["message", …]}`. Keys are kept sorted so the
/// JSON output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single message for `field`.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed validation.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Turn the collected errors into a `Result`: `Ok(value)` when empty.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

/// Top-level error taxonomy for the questionnaire service.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    /// The caller is not authenticated.
    #[error("authentication required")]
    AuthRequired,

    /// The caller already holds a valid session.
    #[error("already authenticated")]
    AlreadyAuthenticated,

    /// Unknown user or wrong password. The two cases are never distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Submitted fields failed schema validation.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// A session expiry would fall outside the representable time range.
    #[error("session lifetime out of range")]
    SessionLifetime,

    /// Hashing or parsing a password hash failed.
    #[error("password hash error: {0}")]
    PasswordHash(String),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_collect_multiple_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("content", "This field is required.");
        errors.add("content", "Ensure this value is not blank.");
        errors.add("question", "Enter a valid UUID.");

        assert_eq!(errors.get("content").map(<[String]>::len), Some(2));
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["content", "question"]);
    }

    #[test]
    fn should_serialize_as_field_map() {
        let errors = FieldErrors::single("active", "Select a valid choice.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"active": ["Select a valid choice."]}));
    }

    #[test]
    fn should_return_value_when_no_errors_recorded() {
        assert_eq!(FieldErrors::new().into_result(42), Ok(42));
        assert!(FieldErrors::single("title", "bad").into_result(()).is_err());
    }

    #[test]
    fn should_wrap_field_errors_into_validation_variant() {
        let err: QuestionnaireError = FieldErrors::single("title", "bad").into();
        assert!(matches!(err, QuestionnaireError::Validation(_)));
    }
}
