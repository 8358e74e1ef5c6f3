//! Session: an opaque bearer token bound to a user until it expires.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use rand::RngCore;

use crate::error::QuestionnaireError;
use crate::id::UserId;
use crate::time::Timestamp;

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// Opaque session token, URL-safe base64 without padding.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Draw a fresh token from the thread-local CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Wrap a token received from a client or read from storage.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials: keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// A login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub expires_at: Timestamp,
}

impl Session {
    /// Open a new session for `user_id`, valid for `ttl` from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::SessionLifetime`] when `now + ttl` is past
    /// the last representable instant.
    pub fn issue(
        user_id: UserId,
        now: Timestamp,
        ttl: Duration,
    ) -> Result<Self, QuestionnaireError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(QuestionnaireError::SessionLifetime)?;
        Ok(Self {
            token: SessionToken::generate(),
            user_id,
            expires_at,
        })
    }

    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}
