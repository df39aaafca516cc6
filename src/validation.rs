use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::borrow::Cow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;
use crate::ingest::{self, FieldMap};

// --- Payload Schemas ---
//
// One struct per validated form, mirroring the portal's schema rules. Every field
// is optional at the deserialization layer (multipart forms arrive as loose string
// maps); presence requirements are expressed as validation rules so a missing
// field surfaces as a per-field 422 error rather than a deserialization failure.

/// NewsPayload
///
/// The news create/update form after array reconstruction. Unknown extra fields
/// are tolerated.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct NewsPayload {
    #[validate(
        required(message = "Name is required."),
        length(min = 3, max = 200, message = "Name should be between 3 and 200 characters.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Author name is required."),
        length(
            min = 3,
            max = 100,
            message = "Author name should be between 3 and 100 characters."
        )
    )]
    pub author_name: Option<String>,

    /// ISO 8601 date; checked by `validate_news` below.
    #[validate(required(message = "Publish date is required."))]
    pub publish_date: Option<String>,

    /// Set when the form carried an `image_url` value directly.
    pub image_url: Option<String>,

    /// Set when the form carried an `image` file part (the stored location).
    pub image: Option<String>,

    pub category: Option<String>,
    pub tags: Option<Vec<String>>,

    #[validate(length(max = 1000, message = "Short description should not exceed 1000 characters."))]
    pub short_description: Option<String>,

    #[validate(length(max = 1000, message = "Long description should not exceed 1000 characters."))]
    pub long_description: Option<String>,

    pub kind: Option<String>,
    pub status: Option<String>,
}

/// UserPayload
///
/// The user create/update form. On update the password pair may be omitted;
/// `validate_user` enforces presence on create.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UserPayload {
    #[validate(
        required(message = "Name is required."),
        length(min = 3, max = 200, message = "Name should be between 3 and 200 characters.")
    )]
    pub name: Option<String>,

    #[validate(required(message = "Role is required."))]
    pub role: Option<String>,

    #[validate(
        required(message = "Email is required."),
        email(message = "Email must be a valid email address.")
    )]
    pub email: Option<String>,

    #[validate(length(
        min = 8,
        max = 100,
        message = "Password should be between 8 and 100 characters."
    ))]
    pub password: Option<String>,

    #[validate(must_match(other = "password", message = "Passwords must match."))]
    pub confirm_password: Option<String>,

    /// Avatar location produced by the upload pipeline.
    pub image: Option<String>,

    pub mobile: Option<String>,
}

/// NamePayload
///
/// The single-field form shared by tag and category creation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct NamePayload {
    #[validate(
        required(message = "Name is required."),
        length(min = 3, max = 200, message = "Name should be between 3 and 200 characters.")
    )]
    pub name: Option<String>,
}

/// LoginPayload
///
/// The JSON login form.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginPayload {
    #[validate(
        required(message = "Email is required."),
        email(message = "Email must be a valid email address.")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required."),
        length(min = 3, max = 200, message = "Password should be between 3 and 200 characters.")
    )]
    pub password: Option<String>,
}

/// SubmissionPayload
///
/// The public contact form. This is the one schema that rejects unknown fields;
/// `validate_submission` enforces the allow-list.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SubmissionPayload {
    #[validate(
        required(message = "Name is required."),
        length(max = 100, message = "Name should not exceed 100 characters.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Mobile is required."),
        length(max = 20, message = "Mobile should not exceed 20 characters.")
    )]
    pub mobile: Option<String>,

    #[validate(email(message = "Email must be a valid email address."))]
    pub email: Option<String>,

    #[validate(
        required(message = "Title is required."),
        length(max = 250, message = "Title should not exceed 250 characters.")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Message is required."),
        length(max = 3000, message = "Message should not exceed 3000 characters.")
    )]
    pub message: Option<String>,
}

/// Fields the submission form accepts; anything else is rejected.
const SUBMISSION_FIELDS: [&str; 5] = ["name", "mobile", "email", "title", "message"];

/// Roles a portal account may hold.
pub const ALLOWED_ROLES: [&str; 2] = ["admin", "publisher"];

// --- Validation Entry Points ---

/// validate_news
///
/// Deserializes the normalized field map into a `NewsPayload` and applies the
/// news schema, including the ISO date and identifier checks that the derive
/// rules cannot express.
pub fn validate_news(fields: &FieldMap) -> Result<NewsPayload, AppError> {
    let payload: NewsPayload = payload_from(fields)?;
    let mut errors = collect_errors(&payload);

    if let Some(date) = &payload.publish_date {
        if !is_iso_date(date) {
            add_error(
                &mut errors,
                "publish_date",
                "Publish date must be in ISO 8601 format.",
            );
        }
    }
    if let Some(category) = &payload.category {
        if Uuid::parse_str(category).is_err() {
            add_error(&mut errors, "category", "Category must be a valid ID.");
        }
    }
    if let Some(tags) = &payload.tags {
        if tags.iter().any(|tag| Uuid::parse_str(tag).is_err()) {
            add_error(&mut errors, "tags", "Each tag must be a valid ID.");
        }
    }

    finish(payload, errors)
}

/// validate_user
///
/// Applies the user schema. `is_update` relaxes the password requirement, the
/// same switch the create and update forms share.
pub fn validate_user(fields: &FieldMap, is_update: bool) -> Result<UserPayload, AppError> {
    let payload: UserPayload = payload_from(fields)?;
    let mut errors = collect_errors(&payload);

    if !is_update {
        if payload.password.is_none() {
            add_error(&mut errors, "password", "Password is required.");
        }
        if payload.confirm_password.is_none() {
            add_error(
                &mut errors,
                "confirm_password",
                "Confirm password is required.",
            );
        }
    }

    if let Some(role) = &payload.role {
        if !ALLOWED_ROLES.contains(&role.as_str()) {
            add_error(
                &mut errors,
                "role",
                "Invalid role. Allowed roles are: admin, publisher",
            );
        }
    }

    finish(payload, errors)
}

/// validate_name
///
/// Applies the shared name schema (tags and categories).
pub fn validate_name(fields: &FieldMap) -> Result<NamePayload, AppError> {
    let payload: NamePayload = payload_from(fields)?;
    let errors = collect_errors(&payload);
    finish(payload, errors)
}

/// validate_payload
///
/// Applies a schema to an already-typed JSON payload (login, tag and category
/// bodies arrive as JSON rather than multipart).
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    let errors = collect_errors(payload);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// validate_submission
///
/// Applies the submission schema and rejects fields outside the allow-list.
pub fn validate_submission(fields: &FieldMap) -> Result<SubmissionPayload, AppError> {
    if let Some(unknown) = fields
        .keys()
        .find(|key| !SUBMISSION_FIELDS.contains(&key.as_str()))
    {
        return Err(AppError::UnknownField(unknown.clone()));
    }

    let payload: SubmissionPayload = payload_from(fields)?;
    let errors = collect_errors(&payload);
    finish(payload, errors)
}

// --- Response Shaping ---

/// validation_failed_body
///
/// Renders a `ValidationErrors` into the API's 422 body: one message per field,
/// keyed by field name.
pub fn validation_failed_body(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    for (field, field_errors) in errors.field_errors() {
        if let Some(first) = field_errors.first() {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid."));
            fields.insert(field.to_string(), Value::String(message));
        }
    }
    json!({ "message": "Validation failed", "errors": fields })
}

// --- Helpers ---

fn payload_from<T: serde::de::DeserializeOwned>(fields: &FieldMap) -> Result<T, AppError> {
    serde_json::from_value(ingest::to_json(fields))
        .map_err(|e| AppError::BadRequest(format!("Malformed payload: {e}")))
}

fn collect_errors<T: Validate>(payload: &T) -> ValidationErrors {
    payload.validate().err().unwrap_or_else(ValidationErrors::new)
}

fn finish<T>(payload: T, errors: ValidationErrors) -> Result<T, AppError> {
    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(AppError::Validation(errors))
    }
}

fn add_error(errors: &mut ValidationErrors, field: &'static str, message: &'static str) {
    let mut error = ValidationError::new("invalid");
    error.message = Some(Cow::Borrowed(message));
    errors.add(field, error);
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok()
}
