//! Auth service: login, logout, session resolution and account creation.

use chrono::Duration;

use questionnaire_domain::error::{FieldErrors, QuestionnaireError};
use questionnaire_domain::form::{LoginForm, REQUIRED};
use questionnaire_domain::id::UserId;
use questionnaire_domain::session::{Session, SessionToken};
use questionnaire_domain::time::now;
use questionnaire_domain::user::User;

use crate::context::RequestContext;
use crate::password::CredentialHasher;
use crate::ports::{SessionRepository, UserRepository};

/// Application service for authentication.
pub struct AuthService<U, S> {
    users: U,
    sessions: S,
    hasher: CredentialHasher,
    session_ttl: Duration,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    /// Create a new service. Sessions it issues stay valid for `session_ttl`.
    pub fn new(users: U, sessions: S, hasher: CredentialHasher, session_ttl: Duration) -> Self {
        Self {
            users,
            sessions,
            hasher,
            session_ttl,
        }
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown usernames, wrong passwords and missing fields all fail the
    /// same way, after the same amount of hashing work.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::AlreadyAuthenticated`] when `ctx` already
    /// holds a session, [`QuestionnaireError::InvalidCredentials`] on any
    /// credential mismatch, [`QuestionnaireError::SessionLifetime`] when the
    /// expiry cannot be represented, or a storage error from the repositories.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        form: &LoginForm,
    ) -> Result<Session, QuestionnaireError> {
        if ctx.is_authenticated() {
            return Err(QuestionnaireError::AlreadyAuthenticated);
        }

        let username = form.username.as_deref().unwrap_or_default();
        let password = form.password.as_deref().unwrap_or_default();

        let user = if username.is_empty() {
            None
        } else {
            self.users.get_by_username(username).await?
        };

        let Some(user) = user else {
            self.hasher.verify_dummy(password);
            tracing::warn!(username, "login failed");
            return Err(QuestionnaireError::InvalidCredentials);
        };

        let verified = self
            .hasher
            .verify(password, &user.password_hash)
            .unwrap_or_else(|err| {
                tracing::error!(
                    user_id = %user.id,
                    error = %err,
                    "stored password hash is unreadable"
                );
                false
            });
        if !verified {
            tracing::warn!(username, "login failed");
            return Err(QuestionnaireError::InvalidCredentials);
        }

        let session = Session::issue(user.id, now(), self.session_ttl)?;
        let session = self.sessions.create(session).await?;
        tracing::info!(user_id = %user.id, username, "user logged in");
        Ok(session)
    }

    /// Close the caller's session.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::AuthRequired`] for anonymous callers, or
    /// a storage error from the session repository.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), QuestionnaireError> {
        let user = ctx.require_user()?;
        if let Some(token) = ctx.token() {
            self.sessions.delete(token).await?;
        }
        tracing::info!(user_id = %user.id, "user logged out");
        Ok(())
    }

    /// Turn a client-supplied token into a request context.
    ///
    /// Unknown tokens, expired sessions and sessions of deleted users all
    /// resolve to an anonymous context. Expired sessions are removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repositories.
    pub async fn resolve_session(
        &self,
        token: SessionToken,
    ) -> Result<RequestContext, QuestionnaireError> {
        let Some(session) = self.sessions.get(&token).await? else {
            return Ok(RequestContext::anonymous());
        };

        if session.is_expired(now()) {
            self.sessions.delete(&token).await?;
            return Ok(RequestContext::anonymous());
        }

        Ok(match self.users.get_by_id(session.user_id).await? {
            Some(user) => RequestContext::authenticated(token, user.identity()),
            None => RequestContext::anonymous(),
        })
    }

    /// Remove every expired session, returning how many were dropped.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the session repository.
    pub async fn purge_expired_sessions(&self) -> Result<u64, QuestionnaireError> {
        self.sessions.delete_expired(now()).await
    }

    /// Create an account. Operators call this; there is no HTTP route for it.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::Validation`] for an invalid or taken
    /// username or an empty password, a hashing error, or a storage error.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, QuestionnaireError> {
        User::validate_username(username)?;
        if password.is_empty() {
            return Err(FieldErrors::single("password", REQUIRED).into());
        }
        if self.users.get_by_username(username).await?.is_some() {
            return Err(
                FieldErrors::single("username", "A user with that username already exists.")
                    .into(),
            );
        }

        let user = User {
            id: UserId::new(),
            username: username.to_owned(),
            password_hash: self.hasher.hash(password)?,
        };
        let user = self.users.create(user).await?;
        tracing::info!(user_id = %user.id, username, "user created");
        Ok(user)
    }
}
