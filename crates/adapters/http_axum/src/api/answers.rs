//! Answer submission handler.

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{IntoResponse, Response};

use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};
use questionnaire_app::services::answer_service::ANSWER_SAVED;
use questionnaire_domain::form::AnswerForm;

use crate::context::Caller;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Possible responses from the submit endpoint.
pub enum SubmitResponse {
    Saved,
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Saved => Envelope::<()>::Message {
                message: ANSWER_SAVED,
            }
            .into_response(),
        }
    }
}

/// `POST /api/answer`
///
/// Anonymous callers are turned away before the body is looked at.
pub async fn submit<UR, SR, QR, AR>(
    State(state): State<AppState<UR, SR, QR, AR>>,
    Caller(ctx): Caller,
    body: Result<Form<AnswerForm>, FormRejection>,
) -> Result<SubmitResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    ctx.require_user()?;
    let Form(form) = body?;

    state.answer_service.submit(&ctx, &form).await?;
    Ok(SubmitResponse::Saved)
}
