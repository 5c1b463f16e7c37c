use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rydeline_core::error::CoreError;
use rydeline_core::validation::FieldViolation;
use serde_json::json;

use crate::auth::AuthError;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors and implements [`IntoResponse`] to produce
/// consistent JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `rydeline_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An authentication failure. Collapsed to a uniform 401 at the
    /// boundary; the variant is logged, not serialized.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Field-level input validation failures, returned as a 400 with an
    /// `errors` array.
    #[error("Input validation failed")]
    InvalidFields(Vec<FieldViolation>),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidFields(violations) => {
                let body = json!({ "errors": violations });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            AppError::Core(core) => match core {
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // Authentication failures: log the precise cause, answer with a
            // fixed message so callers cannot tell which gate rejected them.
            AppError::Auth(auth) => {
                tracing::debug!(reason = %auth, "Authentication rejected");
                let message = match auth {
                    AuthError::BadCredentials => "Invalid Email or Password",
                    _ => "Unauthorized",
                };
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    message.to_string(),
                )
            }

            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// Unique-constraint violations (constraint name starting with `uq_`) map
/// to 409. Everything else maps to a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::Database(db_err) = err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
