use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::domain::DomainError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// An HTTP error response with a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    /// Map a use case failure. Validation errors are the client's fault and
    /// keep their message. Anything else is reported as `{context}: {error}`.
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        match err {
            DomainError::InvalidInput(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            other => {
                warn!("{}: {}", context, other);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{}: {}", context, other),
                )
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_is_bad_request_with_bare_message() {
        let err = ApiError::from_domain(
            DomainError::invalid_input("Embedding must be 192-dimensional"),
            "Failed to register",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "Embedding must be 192-dimensional");
    }

    #[test]
    fn storage_failure_is_internal_error_with_context() {
        let err = ApiError::from_domain(
            DomainError::storage("Firestore commit returned 503"),
            "Failed to register",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.detail(),
            "Failed to register: Storage error: Firestore commit returned 503"
        );
    }
}
