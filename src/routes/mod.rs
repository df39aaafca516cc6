/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules.
/// Access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.
///
/// The three modules map directly to the portal's access tiers.

/// Routes accessible to all users (anonymous reads, login, the public
/// submission form). Handlers must restrict news reads to published records
/// at the Repository level.
pub mod public;

/// The editorial dashboard, protected by the `AuthUser` extractor middleware.
/// Requires a validated user session ('admin' or 'publisher').
pub mod authenticated;

/// Routes restricted exclusively to users with the 'admin' role.
/// Implements mandatory authorization checks.
pub mod admin;
