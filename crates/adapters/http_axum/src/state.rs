//! Shared application state for axum handlers.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};

use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};
use questionnaire_app::services::answer_service::AnswerService;
use questionnaire_app::services::auth_service::AuthService;
use questionnaire_app::services::question_service::QuestionService;
use questionnaire_domain::session::SessionToken;

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "sessionid";

/// How the session cookie is written.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    /// Restrict the cookie to HTTPS.
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_owned(),
            secure: false,
        }
    }
}

impl CookieSettings {
    /// Cookie carrying a freshly issued session token.
    #[must_use]
    pub fn session_cookie(&self, token: &SessionToken) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token.as_str().to_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    /// Cookie that, once removed from a jar, clears the session on the client.
    #[must_use]
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), "")).path("/").build()
    }
}

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the repositories never need to be `Clone`; only
/// the `Arc` wrappers are cloned.
pub struct AppState<UR, SR, QR, AR> {
    /// Login, logout and session resolution.
    pub auth_service: Arc<AuthService<UR, SR>>,
    /// Answer submission.
    pub answer_service: Arc<AnswerService<QR, AR>>,
    /// Question listing.
    pub question_service: Arc<QuestionService<QR>>,
    pub cookies: Arc<CookieSettings>,
}

impl<UR, SR, QR, AR> Clone for AppState<UR, SR, QR, AR> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            answer_service: Arc::clone(&self.answer_service),
            question_service: Arc::clone(&self.question_service),
            cookies: Arc::clone(&self.cookies),
        }
    }
}

impl<UR, SR, QR, AR> AppState<UR, SR, QR, AR>
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        auth_service: AuthService<UR, SR>,
        answer_service: AnswerService<QR, AR>,
        question_service: QuestionService<QR>,
        cookies: CookieSettings,
    ) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
            answer_service: Arc::new(answer_service),
            question_service: Arc::new(question_service),
            cookies: Arc::new(cookies),
        }
    }
}
