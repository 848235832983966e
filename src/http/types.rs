use axum::extract::{rejection::{JsonRejection, PathRejection}, FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::error::TodoError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub error: String }

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody { pub message: String }

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }
}

/// Anything a handler can fail with, before it is turned into a status and JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Todo(#[from] TodoError),
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Validation and identifier failures stay in the 500 class; only a missing record is distinguished.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Todo(TodoError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Todo(TodoError::Validation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Todo(TodoError::InvalidIdentifier(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Todo(TodoError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Todo(TodoError::NotFound) => (status, axum::Json(MessageBody::new("Todo not found"))).into_response(),
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "request failed");
                }
                (status, axum::Json(ErrorBody { error: other.to_string() })).into_response()
            }
        }
    }
}

/// An id segment that cannot even be decoded is just another malformed id.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Todo(TodoError::InvalidIdentifier(rejection.body_text()))
    }
}

/// `axum::extract::Path` with the same rejection handling as [`JsonBody`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// `axum::Json` whose rejections come back as [`ApiError`] bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
