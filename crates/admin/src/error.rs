//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; clients always receive a structured
//! `{"error": "..."}` body with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::db::orders::StatusUpdateError;
use crate::services::auth::AuthError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order status update failed.
    #[error("Status update error: {0}")]
    StatusUpdate(#[from] StatusUpdateError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a server fault worth capturing to Sentry.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Database(RepositoryError::NotFound | RepositoryError::Conflict(_)) => false,
            Self::Database(_) | Self::Internal(_) => true,
            Self::Auth(err) => matches!(err, AuthError::Repository(_) | AuthError::PasswordHash),
            Self::StatusUpdate(err) => matches!(err, StatusUpdateError::Repository(_)),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::NotStaff => StatusCode::FORBIDDEN,
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::StatusUpdate(err) => match err {
                StatusUpdateError::NotFound => StatusCode::NOT_FOUND,
                StatusUpdateError::IllegalTransition { .. } => StatusCode::BAD_REQUEST,
                StatusUpdateError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_owned()
        } else {
            match &self {
                Self::Auth(err) => err.to_string(),
                Self::StatusUpdate(err) => err.to_string(),
                Self::Database(RepositoryError::NotFound) => "not found".to_owned(),
                Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
                Self::NotFound(what) => format!("{what} not found"),
                Self::BadRequest(msg) => msg.clone(),
                _ => self.to_string(),
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    use juniper_goods_core::OrderStatus;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_illegal_transition_is_bad_request() {
        assert_eq!(
            status_of(AppError::StatusUpdate(
                StatusUpdateError::IllegalTransition {
                    from: OrderStatus::Delivered,
                    to: OrderStatus::Pending,
                }
            )),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_non_staff_login_is_forbidden() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::NotStaff)),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_conflict_surfaces_as_409() {
        assert_eq!(
            status_of(AppError::Database(RepositoryError::Conflict(
                "category still has products assigned".to_owned()
            ))),
            StatusCode::CONFLICT
        );
    }
}
