use axum::{extract::State, response::Html};

use crate::{
    AppState,
    errors::ApiError,
    ui::{PageViewTracker, ShellContent, render_shell},
};

/// home_page
///
/// Public landing shell. The site name comes from the settings cache, so it follows
/// admin edits after the next cache clear.
pub async fn home_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let settings = state
        .settings
        .get_site_settings()
        .await
        .map_err(ApiError::internal("Failed to fetch settings"))?;

    // Each render is one mount of the layout.
    let tracker = PageViewTracker::new();
    let body = r#"<section id="featured-ratings" data-source="/ratings/featured"></section>"#;
    let markup = render_shell(
        "/",
        &ShellContent {
            site_name: &settings.site_name,
            title: &settings.site_description,
            body,
        },
        Some(&tracker),
    );
    Ok(Html(markup.into_string()))
}

/// admin_page
///
/// Back-office shell. Rendered without header and footer or page-view tracking; the
/// client app inside talks to the admin JSON routes, which do their own auth.
pub async fn admin_page() -> Html<String> {
    let body = r#"<div id="admin-app" data-session="/admin/me"></div>"#;
    Html(render_shell(
        "/admin",
        &ShellContent {
            site_name: "Admin",
            title: "Dashboard",
            body,
        },
        None,
    )
    .into_string())
}
