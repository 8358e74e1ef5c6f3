//! Request-scoped context carrying the caller's optional identity.

use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::session::SessionToken;
use questionnaire_domain::user::AuthenticatedUser;

/// Who is calling, resolved once per request and passed to every use-case.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    session: Option<(SessionToken, AuthenticatedUser)>,
}

impl RequestContext {
    /// A caller without a valid session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A caller authenticated through `token`.
    #[must_use]
    pub fn authenticated(token: SessionToken, user: AuthenticatedUser) -> Self {
        Self {
            session: Some((token, user)),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.session.as_ref().map(|(_, user)| user)
    }

    #[must_use]
    pub fn token(&self) -> Option<&SessionToken> {
        self.session.as_ref().map(|(token, _)| token)
    }

    /// The authenticated user, or [`QuestionnaireError::AuthRequired`].
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::AuthRequired`] for anonymous callers.
    pub fn require_user(&self) -> Result<&AuthenticatedUser, QuestionnaireError> {
        self.user().ok_or(QuestionnaireError::AuthRequired)
    }
}
