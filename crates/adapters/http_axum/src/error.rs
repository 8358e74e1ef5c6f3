//! HTTP error response mapping.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::response::{IntoResponse, Response};

use questionnaire_domain::error::{FieldErrors, NON_FIELD_ERRORS, QuestionnaireError};

use crate::response::{
    ALREADY_LOGGED_IN, Envelope, INTERNAL_ERROR, INVALID_CREDENTIALS, NOT_LOGGED_IN,
};

/// Maps [`QuestionnaireError`] to an enveloped HTTP response.
#[derive(Debug)]
pub struct ApiError(QuestionnaireError);

impl From<QuestionnaireError> for ApiError {
    fn from(err: QuestionnaireError) -> Self {
        Self(err)
    }
}

// Undecodable bodies are reported like any other form error, on the
// non-field key.
impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self(FieldErrors::single(NON_FIELD_ERRORS, rejection.body_text()).into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(FieldErrors::single(NON_FIELD_ERRORS, rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope: Envelope = match self.0 {
            QuestionnaireError::AuthRequired => Envelope::NotLoggedIn {
                message: NOT_LOGGED_IN,
            },
            QuestionnaireError::AlreadyAuthenticated => Envelope::AlreadyLoggedIn {
                message: ALREADY_LOGGED_IN,
            },
            QuestionnaireError::InvalidCredentials => Envelope::InvalidCredentials {
                message: INVALID_CREDENTIALS,
            },
            QuestionnaireError::Validation(errors) => Envelope::ValidationError { errors },
            err @ (QuestionnaireError::PasswordHash(_)
            | QuestionnaireError::SessionLifetime
            | QuestionnaireError::Storage(_)) => {
                tracing::error!(error = ?err, "request failed");
                Envelope::Error {
                    message: INTERNAL_ERROR,
                }
            }
        };

        envelope.into_response()
    }
}
