//! User: an externally owned identity that can log in.

use crate::error::{FieldErrors, QuestionnaireError};
use crate::id::UserId;

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_LEN: usize = 150;

/// A stored account. The password is only ever held as an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Check domain invariants on the username.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::Validation`] when the username is blank,
    /// too long, or contains whitespace.
    pub fn validate_username(username: &str) -> Result<(), QuestionnaireError> {
        let mut errors = FieldErrors::new();
        if username.is_empty() {
            errors.add("username", "This field is required.");
        } else if username.chars().count() > MAX_USERNAME_LEN {
            errors.add(
                "username",
                format!("Ensure this value has at most {MAX_USERNAME_LEN} characters."),
            );
        } else if username.chars().any(char::is_whitespace) {
            errors.add("username", "Usernames may not contain whitespace.");
        }
        errors.into_result(()).map_err(Into::into)
    }

    /// The public view of this user, as carried by a request context.
    #[must_use]
    pub fn identity(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// The identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}
