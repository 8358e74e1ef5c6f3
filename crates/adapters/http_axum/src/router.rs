//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the JSON API under `/api` next to `/health`. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level.
pub fn build<UR, SR, QR, AR>(state: AppState<UR, SR, QR, AR>) -> Router
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
