use crate::{AppState, pages};
use axum::{Router, routing::get};

/// Page Router Module
///
/// Server-rendered shells. The layout decides header/footer from the path, so the
/// admin shell here renders bare.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home_page))
        .route("/admin", get(pages::admin_page))
}
