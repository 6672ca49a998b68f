//! Centralized error handling.
//!
//! Every failure a handler can produce is an [`AppError`]. The response
//! body is always `{"error": {"code", "message", "field"?}}`; `field` is
//! present for validation errors that name the offending input.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// No usable bearer token
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated, but not allowed to do this
    #[error("Access denied")]
    Forbidden,

    /// Username/password mismatch on login. Reported as 403, like any other
    /// refused permission, so callers cannot tell it apart from an unknown user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Resource not found")]
    NotFound,

    /// Bad input; by convention the message reads `field: reason`
    #[error("{0}")]
    Validation(String),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::InvalidCredentials => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Input field named by a `field: reason` validation message
    pub fn field(&self) -> Option<&str> {
        let AppError::Validation(msg) = self else {
            return None;
        };
        let (field, _) = msg.split_once(": ")?;
        field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
            .then_some(field)
    }

    /// Client-facing message. Server-side detail is logged here and never
    /// leaves the process.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT rejected: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.public_message(),
                field: self.field(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::validation("username: This field may not be blank.").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_body_names_field() {
        let (status, body) =
            body_of(AppError::validation("username: This field may not be blank.")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "username");
        assert_eq!(
            body["error"]["message"],
            "username: This field may not be blank."
        );
    }

    #[test]
    fn test_field_needs_identifier_prefix() {
        assert_eq!(AppError::validation("Failed to parse the request body").field(), None);
        assert_eq!(
            AppError::validation("Failed to deserialize: missing field `username`").field(),
            None
        );
        assert_eq!(AppError::NotFound.field(), None);
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let (status, body) = body_of(AppError::internal("connection string leaked")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal error occurred");
        assert!(body["error"].get("field").is_none());
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }
}
