//! Question listing handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use questionnaire_app::ports::{
    AnswerRepository, QuestionRepository, SessionRepository, UserRepository,
};
use questionnaire_domain::filter::QuestionFilterForm;
use questionnaire_domain::question::QuestionListing;

use crate::context::Caller;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Vec<QuestionListing>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(data) => Envelope::Data { data }.into_response(),
        }
    }
}

/// `GET /api/questions?active=&has_answer=&title=`
pub async fn list<UR, SR, QR, AR>(
    State(state): State<AppState<UR, SR, QR, AR>>,
    Caller(ctx): Caller,
    query: Result<Query<QuestionFilterForm>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    SR: SessionRepository + Send + Sync + 'static,
    QR: QuestionRepository + Send + Sync + 'static,
    AR: AnswerRepository + Send + Sync + 'static,
{
    ctx.require_user()?;
    let Query(form) = query?;

    let listings = state.question_service.list(&ctx, &form).await?;
    Ok(ListResponse::Ok(listings))
}
