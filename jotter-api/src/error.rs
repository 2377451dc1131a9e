/// Error handling for the API server
///
/// A single error type maps every failure to the HTTP taxonomy:
/// validation → 400, unauthenticated → 401, not found → 404, duplicate
/// email → 409, everything unexpected → 500. Handlers return
/// `Result<T, ApiError>` which converts to a response automatically.
///
/// Storage faults are logged with context and surfaced as a generic 500;
/// raw database errors, password hashes, and signing keys never appear in
/// a response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Request failed field validation (400)
    ValidationError(Vec<FieldError>),

    /// No valid session, or bad credentials (401)
    Unauthenticated(String),

    /// Resource absent or not owned by the caller (404)
    ///
    /// The two cases are deliberately conflated so a caller cannot learn
    /// whether a resource exists at all.
    NotFound(String),

    /// Duplicate email at registration (409)
    Conflict(String),

    /// Unexpected storage or infrastructure fault (500)
    InternalError(String),
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// What was wrong with it
    pub message: String,
}

/// Wire format for error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-checkable kind (e.g. "not_found", "validation_error")
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// Field-level details, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Unauthenticated(msg) => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                msg,
                None,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::InternalError(msg) => {
                // Log the detail, hand the client a generic message
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // The only anticipated constraint violation is a duplicate email
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already registered".to_string());
                    }
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert session token errors to API errors.
///
/// A failure to sign a new token is a server fault; every validation
/// failure collapses to the same 401, with the distinction kept in the log.
impl From<jotter_shared::auth::token::TokenError> for ApiError {
    fn from(err: jotter_shared::auth::token::TokenError) -> Self {
        use jotter_shared::auth::token::TokenError;

        match err {
            TokenError::IssueError(msg) => {
                ApiError::InternalError(format!("Failed to issue session token: {}", msg))
            }
            other => {
                tracing::debug!(error = %other, "Session token rejected");
                ApiError::Unauthenticated("Authentication required".to_string())
            }
        }
    }
}

/// Convert password hashing errors to API errors
impl From<jotter_shared::auth::password::PasswordError> for ApiError {
    fn from(err: jotter_shared::auth::password::PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert `validator` derive output to field-level validation errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}
