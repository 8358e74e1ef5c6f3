//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod answers;
#[allow(clippy::missing_errors_doc)]
pub mod questions;
#[allow(clippy::missing_errors_doc)]
pub mod session;

use axum::Router;
use axum::routing::{get, post};

use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<UR, SR, QR, AR>() -> Router<AppState<UR, SR, QR, AR>>
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    Router::new()
        // Session
        .route("/login", post(session::login::<UR, SR, QR, AR>))
        .route("/logout", post(session::logout::<UR, SR, QR, AR>))
        // Answers
        .route("/answer", post(answers::submit::<UR, SR, QR, AR>))
        // Questions
        .route("/questions", get(questions::list::<UR, SR, QR, AR>))
}
