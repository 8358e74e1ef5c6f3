//! Request context extraction from the session cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use questionnaire_app::context::RequestContext;
use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};
use questionnaire_domain::session::SessionToken;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller of the current request.
///
/// A missing or stale session cookie yields an anonymous context; only a
/// storage failure rejects the request.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl<UR, SR, QR, AR> FromRequestParts<AppState<UR, SR, QR, AR>> for Caller
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<UR, SR, QR, AR>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(&state.cookies.name) else {
            return Ok(Self(RequestContext::anonymous()));
        };

        let token = SessionToken::from_raw(cookie.value());
        let ctx = state.auth_service.resolve_session(token).await?;
        Ok(Self(ctx))
    }
}
