use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{any, get},
};

/// Public Router Module
///
/// Unauthenticated endpoints. Anything returned here must be safe for anonymous
/// callers, which is why settings go through redaction in the handler.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for the load balancer.
        .route("/health", get(|| async { "ok" }))
        // GET /ratings/featured
        // Top 3 approved and verified ratings.
        .route("/ratings/featured", get(handlers::get_featured_ratings))
        // GET /settings/public
        // Cached site settings with emailPassword and adminEmail blanked.
        .route("/settings/public", get(handlers::get_public_settings))
        // ANY /blog/categories
        // Disabled during the blog data migration; always 503.
        .route("/blog/categories", any(handlers::blog_categories))
}
