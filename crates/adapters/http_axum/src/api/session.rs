//! Login and logout handlers.

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};
use questionnaire_domain::error::QuestionnaireError;
use questionnaire_domain::form::LoginForm;

use crate::context::Caller;
use crate::error::ApiError;
use crate::response::{Envelope, LOGGED_IN, LOGGED_OUT};
use crate::state::AppState;

/// Possible responses from the login endpoint.
pub enum LoginResponse {
    /// The jar carries the new session cookie.
    LoggedIn(CookieJar),
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::LoggedIn(jar) => {
                (jar, Envelope::<()>::Message { message: LOGGED_IN }).into_response()
            }
        }
    }
}

/// Possible responses from the logout endpoint.
pub enum LogoutResponse {
    /// The jar clears the session cookie.
    LoggedOut(CookieJar),
}

impl IntoResponse for LogoutResponse {
    fn into_response(self) -> Response {
        match self {
            Self::LoggedOut(jar) => {
                (jar, Envelope::<()>::Message { message: LOGGED_OUT }).into_response()
            }
        }
    }
}

/// `POST /api/login`
pub async fn login<UR, SR, QR, AR>(
    State(state): State<AppState<UR, SR, QR, AR>>,
    Caller(ctx): Caller,
    jar: CookieJar,
    body: Result<Form<LoginForm>, FormRejection>,
) -> Result<LoginResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    if ctx.is_authenticated() {
        return Err(QuestionnaireError::AlreadyAuthenticated.into());
    }
    let Form(form) = body?;

    let session = state.auth_service.login(&ctx, &form).await?;
    let jar = jar.add(state.cookies.session_cookie(&session.token));
    Ok(LoginResponse::LoggedIn(jar))
}

/// `POST /api/logout`
pub async fn logout<UR, SR, QR, AR>(
    State(state): State<AppState<UR, SR, QR, AR>>,
    Caller(ctx): Caller,
    jar: CookieJar,
) -> Result<LogoutResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    state.auth_service.logout(&ctx).await?;
    Ok(LogoutResponse::LoggedOut(
        jar.remove(state.cookies.removal_cookie()),
    ))
}
