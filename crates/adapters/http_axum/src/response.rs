//! The JSON envelope every API endpoint answers with.
//!
//! ```json
//! {"status": "success", "data": [...]}
//! {"status": "success", "message": "..."}
//! {"status": "validation_error", "errors": {"field": ["..."]}}
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use questionnaire_domain::error::FieldErrors;

pub const LOGGED_IN: &str = "Successfully logged in.";
pub const LOGGED_OUT: &str = "Successfully logged out.";
pub const ALREADY_LOGGED_IN: &str = "You are already logged in.";
pub const INVALID_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
pub const NOT_LOGGED_IN: &str = "Authentication credentials were not provided.";
pub const INTERNAL_ERROR: &str = "internal server error";

/// Response body tagged by its `status` field.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Envelope<T = ()> {
    #[serde(rename = "success")]
    Data { data: T },
    #[serde(rename = "success")]
    Message { message: &'static str },
    AlreadyLoggedIn { message: &'static str },
    InvalidCredentials { message: &'static str },
    NotLoggedIn { message: &'static str },
    ValidationError { errors: FieldErrors },
    Error { message: &'static str },
}

impl<T: Serialize> Envelope<T> {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Data { .. } | Self::Message { .. } => StatusCode::OK,
            Self::AlreadyLoggedIn { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials { .. } | Self::NotLoggedIn { .. } => StatusCode::UNAUTHORIZED,
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
