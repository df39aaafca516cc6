use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// News
///
/// Represents one news story or long-form article from the `news` table. This is
/// the primary content record of the portal; `tags` holds the ordered tag IDs
/// recovered from the multipart form's indexed keys.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct News {
    pub id: Uuid,
    pub name: String,
    pub author_name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    // Stored as the client-submitted ISO 8601 string.
    pub publish_date: Option<String>,
    // Public path (local storage) or absolute URL (object storage).
    pub image_url: Option<String>,
    // FK to categories.id.
    pub category: Option<Uuid>,
    pub tags: Vec<Uuid>,
    // Editorial split used by the dashboard counters: "news" or "article".
    pub kind: String,
    // Publication state: "draft" or "published". Only published records are
    // visible on the public routes.
    pub status: String,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Category
///
/// A content category from the `categories` table. Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Tag
///
/// A free-form content tag from the `tags` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// User
///
/// The public shape of a portal account ('admin' or 'publisher'). Never carries
/// credential material; see `UserRecord` for the internal row.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    // The RBAC field: 'admin' or 'publisher'.
    pub role: String,
    // Avatar path or URL produced by the upload pipeline.
    pub image: Option<String>,
    pub mobile: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// UserRecord
///
/// Raw database row (internal use). Directly maps to the `users` table and
/// carries the argon2 PHC hash, so it must never be serialized into a response;
/// convert with `into_public` first.
#[derive(Debug, Clone, FromRow, Default)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub image: Option<String>,
    pub mobile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Strips the credential material off the row.
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            image: self.image,
            mobile: self.mobile,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Submission
///
/// A reader-submitted contact/tip record from the `submissions` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub title: String,
    pub message: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Persistence Inputs ---

/// CreateNews
///
/// The fully validated input for inserting a news record. Built by the handler
/// from the normalized field map after schema validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateNews {
    pub name: String,
    pub author_name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub publish_date: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<Uuid>,
    pub tags: Vec<Uuid>,
    pub kind: String,
    pub status: String,
}

/// UpdateNews
///
/// Partial update input for a news record. `Option<T>` per column keeps the
/// repository's COALESCE update to the fields actually supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateNews {
    pub name: Option<String>,
    pub author_name: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub publish_date: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<Uuid>,
    pub tags: Option<Vec<Uuid>>,
    pub kind: Option<String>,
    pub status: Option<String>,
}

/// CreateUser
///
/// Insert input for a portal account. `password_hash` is the argon2 PHC string,
/// hashed before this struct is built.
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub image: Option<String>,
    pub mobile: Option<String>,
}

/// UpdateUser
///
/// Partial update input for a portal account. A `None` password keeps the
/// stored hash (the update form may omit the password).
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password_hash: Option<String>,
    pub image: Option<String>,
    pub mobile: Option<String>,
}

/// CreateSubmission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSubmission {
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub title: String,
    pub message: String,
}

/// UpdateSubmission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSubmission {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
}

// --- Query Filters ---

/// NewsFilter
///
/// Accepted query parameters for the public news listing (GET /news).
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct NewsFilter {
    /// Case-insensitive search across name, descriptions and author.
    pub search: Option<String>,
    /// Restrict to one category.
    pub category: Option<Uuid>,
    /// Restrict to "news" or "article".
    pub kind: Option<String>,
}

/// SubmissionFilter
///
/// Accepted query parameters for the dashboard submission listing; each filter
/// matches its own column case-insensitively.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct SubmissionFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
}

// --- Auth & Dashboard Schemas (Output) ---

/// LoginUser
///
/// The user fragment of a successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// LoginResponse
///
/// Output schema of POST /login: the authenticated user plus a signed JWT.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub token: String,
}

/// ChangeStatusRequest
///
/// Input payload for the news status endpoint (PATCH /dashboard/news/{id}/status).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ChangeStatusRequest {
    /// "draft" or "published".
    pub status: String,
}

/// DashboardStats
///
/// Output schema for the dashboard statistics endpoint (GET /dashboard/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct DashboardStats {
    pub total_categories: i64,
    pub total_users: i64,
    pub total_submissions: i64,
    pub total_tags: i64,
    pub total_articles: i64,
    pub total_news: i64,
}
