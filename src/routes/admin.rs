use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Admin Router Module
///
/// Back-office endpoints. `create_router` wraps this whole router in the admin guard,
/// so a request without a valid admin session gets 401 before any handler runs.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /inquiries
        // Inquiry inbox with property and user expanded.
        .route("/inquiries", get(handlers::list_inquiries))
        // PATCH /inquiries/{id}
        // Partial update of one inquiry (status, notes, contact fields).
        .route("/inquiries/{id}", patch(handlers::update_inquiry))
        // GET /subscribers
        .route("/subscribers", get(handlers::list_subscribers))
        // GET /admin/me
        // Profile of the admin behind the session.
        .route("/admin/me", get(handlers::get_admin_me))
        // POST /admin/cache/clear
        // Drops the cached site settings.
        .route("/admin/cache/clear", post(handlers::clear_cache))
        // GET/PUT /admin/settings
        // Full settings read, and partial update followed by cache invalidation.
        .route(
            "/admin/settings",
            get(handlers::get_admin_settings).put(handlers::update_admin_settings),
        )
}
