use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, patch, post, put},
};

/// Authenticated Router Module
///
/// Defines the editorial dashboard: every route here is accessible to any user
/// who has passed the authentication layer ('admin' or 'publisher'), covering
/// content management for news, categories, tags and submissions plus the
/// statistics endpoint.
///
/// Access Control Strategy:
/// Every handler in this module relies on the `AuthUser` extractor middleware
/// being present on the router layer above this module. This guarantees that all
/// handlers receive a validated `AuthUser` struct containing the user's ID and
/// role.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // --- News Management ---
        // GET /dashboard/news
        // Lists every record, drafts included, for the editorial queue.
        .route("/dashboard/news", get(handlers::get_dashboard_news))
        // POST /dashboard/news
        // Creates a record from the multipart form: image upload, tags[i]
        // reconstruction and schema validation run before persistence.
        .route("/dashboard/news", post(handlers::create_news))
        // PUT/DELETE /dashboard/news/{id}
        .route(
            "/dashboard/news/{id}",
            put(handlers::update_news).delete(handlers::delete_news),
        )
        // PATCH /dashboard/news/{id}/status
        // Publishes or retracts a record.
        .route(
            "/dashboard/news/{id}/status",
            patch(handlers::change_news_status),
        )
        // --- Category Management ---
        .route("/dashboard/categories", post(handlers::create_category))
        .route(
            "/dashboard/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        // --- Tag Management ---
        .route("/dashboard/tags", post(handlers::create_tag))
        .route(
            "/dashboard/tags/{id}",
            put(handlers::update_tag).delete(handlers::delete_tag),
        )
        // --- Submission Review ---
        // GET /dashboard/submissions?name=...&email=...
        // Per-column, case-insensitive filtering.
        .route("/dashboard/submissions", get(handlers::get_submissions))
        .route(
            "/dashboard/submissions/{id}",
            get(handlers::get_submission_details)
                .put(handlers::update_submission)
                .delete(handlers::delete_submission),
        )
        // --- Statistics ---
        // GET /dashboard/stats
        // Entity counters for the dashboard landing page.
        .route("/dashboard/stats", get(handlers::get_dashboard_stats))
}
