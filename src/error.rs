/// Unified error types for MyCerts
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum CertsError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Unique-constraint violation (duplicate email, site name, ...)
    #[error("Conflict on {field}")]
    Conflict { field: &'static str },

    /// No session, or the session is invalid/expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid session but the operation requires the admin flag
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Field-level constraint violation
    #[error("Validation failed on {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convert CertsError to HTTP response
impl IntoResponse for CertsError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            CertsError::NotFound { .. } => (StatusCode::NOT_FOUND, "NotFound", self.to_string()),
            CertsError::Conflict { .. } => (StatusCode::CONFLICT, "Conflict", self.to_string()),
            CertsError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", self.to_string())
            }
            CertsError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden", self.to_string()),
            CertsError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, "ValidationFailed", self.to_string())
            }
            CertsError::Database(_) | CertsError::Io(_) | CertsError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Translate a unique-constraint violation into a typed Conflict.
///
/// Every write path that can trip a UNIQUE constraint maps its sqlx error
/// through this so the caller sees `Conflict { field }` instead of a raw
/// database failure.
pub fn conflict_on(field: &'static str) -> impl FnOnce(sqlx::Error) -> CertsError {
    move |e| match e.as_database_error() {
        Some(db) if db.is_unique_violation() => CertsError::Conflict { field },
        _ => CertsError::Database(e),
    }
}

/// Result type alias for MyCerts operations
pub type CertsResult<T> = Result<T, CertsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let err = CertsError::NotFound {
            entity: "employee",
            id: 42,
        };
        assert_eq!(err.to_string(), "employee 42 not found");
    }

    #[test]
    fn test_conflict_names_field() {
        let err = CertsError::Conflict { field: "email" };
        assert_eq!(err.to_string(), "Conflict on email");
    }
}
