use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Defines the routes exclusively accessible to users with the 'admin' role:
/// account management for the portal's publishers and administrators.
///
/// Access Control:
/// This router is mounted behind the same authentication layer as the dashboard;
/// the `role='admin'` permission is then checked explicitly inside each handler
/// before any repository call, so a publisher session can never reach account
/// data.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/users
        // Lists all accounts (credential material stripped at the model layer).
        // POST /admin/users
        // Creates an account from the multipart form; the avatar rides in as a
        // file part and the password is hashed before persistence.
        .route(
            "/users",
            get(handlers::get_users).post(handlers::create_user),
        )
        // GET/PUT/DELETE /admin/users/{id}
        // Single-account retrieval, update (password optional) and removal.
        .route(
            "/users/{id}",
            get(handlers::get_user_details)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
}
