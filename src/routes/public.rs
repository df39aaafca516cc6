use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in). These routes handle read-only content access, the
/// login gateway, and the reader submission form.
///
/// Security Mandate:
/// The news retrieval handlers in this module must only release published
/// records; the `status = 'published'` restriction is enforced at the
/// Repository level so drafts can never leak to anonymous readers.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // POST /login
        // Credential check plus JWT issuance. The token gates every /dashboard
        // and /admin route.
        .route("/login", post(handlers::login))
        // GET /news?search=...&category=...&kind=...
        // Lists published news, supporting category, kind and full-text filters.
        .route("/news", get(handlers::get_news_list))
        // GET /news/{id}
        // Retrieves the detailed view of a single record.
        .route("/news/{id}", get(handlers::get_news_details))
        // GET /categories, /categories/{id}
        // Category reads back the public navigation.
        .route("/categories", get(handlers::get_categories))
        .route("/categories/{id}", get(handlers::get_category_details))
        // GET /tags, /tags/{id}
        .route("/tags", get(handlers::get_tags))
        .route("/tags/{id}", get(handlers::get_tag_details))
        // POST /submissions
        // The reader contact/tip form. Multipart; runs the full ingestion
        // pipeline with the strict submission schema.
        .route("/submissions", post(handlers::create_submission))
}
