/// Error types for pulse-service
///
/// All domain errors carry a machine-distinguishable kind plus a human
/// message. The `ResponseError` impl translates kind -> HTTP status uniformly,
/// so handlers never pick status codes themselves.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// Result type for pulse-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// A single field-level validation failure, surfaced in the error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub path: String,
    pub message: String,
}

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Request body or query failed validation
    #[error("{message}")]
    ValidationError {
        message: String,
        errors: Vec<ErrorMessage>,
    },

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Visibility or ownership check failed
    #[error("{0}")]
    Forbidden(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a validation error without field details.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: msg.into(),
            errors: Vec::new(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Store and internal failures are logged in full but the caller only
        // sees a generic message.
        let message = match self {
            AppError::DatabaseError(msg) | AppError::Internal(msg) => {
                tracing::error!("internal failure: {}", msg);
                "Something went wrong".to_string()
            }
            other => other.to_string(),
        };

        let error_messages: Vec<ErrorMessage> = match self {
            AppError::ValidationError { errors, .. } => errors.clone(),
            _ => Vec::new(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "message": message,
            "errorMessages": error_messages,
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field));
                messages.push(ErrorMessage {
                    path: field.to_string(),
                    message,
                });
            }
        }
        AppError::ValidationError {
            message: "Validation failed".to_string(),
            errors: messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(
            AppError::NotFound("Post not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden("Access denied".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("missing token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::DatabaseError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_messages_keep_the_wire_wording() {
        assert_eq!(
            AppError::NotFound("Post not found".into()).to_string(),
            "Post not found"
        );
        assert_eq!(
            AppError::Forbidden("Access denied".into()).to_string(),
            "Access denied"
        );
        assert_eq!(
            AppError::validation("Invalid cursor").to_string(),
            "Invalid cursor"
        );
        assert_eq!(
            AppError::DatabaseError("boom".into()).to_string(),
            "Database error: boom"
        );
        assert_eq!(
            AppError::Internal("oops".into()).to_string(),
            "Internal error: oops"
        );
    }

    #[test]
    fn internal_errors_hide_details_from_callers() {
        let resp = AppError::DatabaseError("connection reset".into()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
