use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{DomainError, ErrorKind};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Body could not be read as JSON
    #[error("Invalid request body: {0}")]
    Payload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Domain(err) => match err.kind() {
                ErrorKind::Validation => error_body(StatusCode::BAD_REQUEST, err),
                ErrorKind::NotFound => error_body(StatusCode::NOT_FOUND, err),
                ErrorKind::Conflict => error_body(StatusCode::CONFLICT, err),
                ErrorKind::Storage => InternalServerError(err).into_response(),
            },
            Self::Payload(_) => error_body(StatusCode::BAD_REQUEST, self),
            err => InternalServerError(err).into_response(),
        }
    }
}

fn error_body(status: StatusCode, err: impl std::fmt::Display) -> Response {
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Logs the cause and answers 500 with a generic message
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}
