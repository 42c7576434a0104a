//! Error-to-response mapping
//!
//! Every failure is converted at the handler boundary into the
//! `{success, data?, error?}` envelope; nothing crashes the process.
//! 500-class causes go to the log, not the wire.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use menyesha_core::error::DomainError;
use menyesha_infrastructure::StorageError;

use crate::response::ApiResponse;

#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError(DomainError::ValidationError(message.into()))
    }

    /// (status, machine-readable code) for the wrapped domain error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            DomainError::EmailAlreadyExists(_) => (StatusCode::BAD_REQUEST, "DUPLICATE_EMAIL"),
            DomainError::CodeAlreadyExists(_) => (StatusCode::BAD_REQUEST, "DUPLICATE_CODE"),
            // Same status as validation failures so a caller cannot probe
            // which credential check failed.
            DomainError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            DomainError::AccountInactive => (StatusCode::BAD_REQUEST, "ACCOUNT_INACTIVE"),
            DomainError::InvalidTransition { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_TRANSITION")
            }
            DomainError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            DomainError::TokenInvalid(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR")
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotAnImage | StorageError::TooLarge { .. } => {
                ApiError(DomainError::ValidationError(err.to_string()))
            }
            StorageError::Io(e) => ApiError(DomainError::InternalError(e.to_string())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            tracing::warn!("Request rejected ({}): {}", code, self.0);
            match &self.0 {
                // Token details stay in the log.
                DomainError::TokenInvalid(_) => "Invalid token".to_string(),
                other => other.to_string(),
            }
        };

        let body = Json(ApiResponse::<()>::error(code, &message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_the_error_taxonomy() {
        let cases = [
            (
                DomainError::ValidationError("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::EmailAlreadyExists("a@x.com".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::CodeAlreadyExists("REG".into()),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (DomainError::AccountInactive, StatusCode::BAD_REQUEST),
            (
                DomainError::InvalidTransition {
                    from: "submitted".into(),
                    to: "closed".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (
                DomainError::TokenInvalid("expired".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Forbidden("nope".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::NotFound("gone".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::DatabaseError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, _) = ApiError(err).status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn credential_failures_share_the_validation_status() {
        let (invalid, _) = ApiError(DomainError::InvalidCredentials).status_and_code();
        let (validation, _) =
            ApiError(DomainError::ValidationError("x".into())).status_and_code();
        assert_eq!(invalid, validation);
    }

    #[test]
    fn server_errors_do_not_leak_the_cause() {
        let response =
            ApiError(DomainError::DatabaseError("password=hunter2".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
