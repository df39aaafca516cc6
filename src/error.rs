use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::ingest::IngestError;
use crate::validation::validation_failed_body;

/// AppError
///
/// The request-level error taxonomy. Every handler returns `Result<_, AppError>`
/// and the `IntoResponse` implementation below maps each variant onto the API's
/// error response shapes:
///
/// - protocol errors (non-multipart bodies) and validation failures answer 422
///   with a structured, per-field error object,
/// - invalid identifiers, unique violations and refused deletes answer 400,
/// - missing records answer 404,
/// - stream, storage and database failures answer 500 with a generic body after
///   logging the underlying cause.
#[derive(Debug, Error)]
pub enum AppError {
    /// A multipart endpoint received a non-multipart body. Rejected before any
    /// extraction is attempted.
    #[error("Request must be multipart/form-data")]
    NotMultipart,

    /// The ingestion pipeline failed (stream read, storage write, malformed
    /// indexed key).
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Schema validation rejected the payload.
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// A path parameter was not a well-formed UUID. Carries the entity name so
    /// the message matches the API contract ("Invalid News ID format").
    #[error("Invalid {0} ID format")]
    InvalidId(&'static str),

    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A client mistake that is not a schema violation: duplicate unique value,
    /// delete refused because of an association, disallowed role value.
    #[error("{0}")]
    BadRequest(String),

    /// A form supplied a field its schema does not allow.
    #[error("\"{0}\" is not allowed.")]
    UnknownField(String),

    /// Login with an unknown email or a wrong password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Password hashing failed; internal, never a client mistake.
    #[error("password hashing failed")]
    PasswordHash,

    /// The authenticated user lacks the required role.
    #[error("forbidden")]
    Forbidden,

    /// Unexpected persistence failure.
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Builds the 422 body for a single dynamically named field.
fn field_error_body(field: &str, message: String) -> serde_json::Value {
    let mut errors = serde_json::Map::new();
    errors.insert(field.to_string(), serde_json::Value::String(message));
    json!({ "message": "Validation failed", "errors": errors })
}

/// on_conflict
///
/// Narrows a sqlx error to the API's 400 response when the database reported a
/// unique violation (e.g. "Category name must be unique."); everything else stays
/// a 500-class database error.
pub fn on_conflict(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::BadRequest(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotMultipart => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "Request must be multipart/form-data" })),
            )
                .into_response(),

            AppError::Ingest(IngestError::BadArrayIndex { key }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(field_error_body(
                    &key,
                    "Array index must be a non-negative integer.".to_string(),
                )),
            )
                .into_response(),

            AppError::Ingest(err) => {
                tracing::error!("ingestion failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": "An error occurred while processing the upload.",
                        "error": err.to_string()
                    })),
                )
                    .into_response()
            }

            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(validation_failed_body(&errors)),
            )
                .into_response(),

            AppError::InvalidId(entity) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": format!("Invalid {entity} ID format") })),
            )
                .into_response(),

            AppError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("{entity} not found") })),
            )
                .into_response(),

            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }

            AppError::UnknownField(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(field_error_body(
                    &field,
                    format!("\"{field}\" is not allowed."),
                )),
            )
                .into_response(),

            AppError::InvalidCredentials => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Invalid email or password." })),
            )
                .into_response(),

            AppError::Forbidden => StatusCode::FORBIDDEN.into_response(),

            AppError::PasswordHash => {
                tracing::error!("password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "An unexpected error occurred." })),
                )
                    .into_response()
            }

            AppError::Database(err) => {
                tracing::error!("database error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": "An unexpected error occurred.",
                        "error": err.to_string()
                    })),
                )
                    .into_response()
            }
        }
    }
}
