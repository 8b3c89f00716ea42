use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod cache;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod pages;
pub mod repository;
pub mod ui;

// Public, admin-only, and server-rendered page routers.
pub mod routes;
use auth::AdminUser;
use routes::{admin, pages as page_routes, public};

// --- Public Re-exports ---

pub use cache::SettingsCache;
pub use config::AppConfig;
pub use memory::InMemoryRepository;
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for every JSON route, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_inquiries, handlers::update_inquiry, handlers::list_subscribers,
        handlers::get_admin_me, handlers::clear_cache, handlers::get_admin_settings,
        handlers::update_admin_settings, handlers::get_featured_ratings,
        handlers::get_public_settings, handlers::blog_categories
    ),
    components(
        schemas(
            models::Admin, models::Inquiry, models::InquiryProperty, models::InquiryUser,
            models::UpdateInquiryRequest, models::EmailSubscriber, models::Rating,
            models::RatingStatus, models::RatingProperty, models::SiteSettings,
            models::UpdateSettingsRequest, models::InquiriesResponse, models::InquiryResponse,
            models::SubscribersResponse, models::AdminResponse, models::ActionResponse,
            models::FeaturedRatingsResponse, models::PublicSettingsResponse,
            models::SettingsResponse, models::SettingsUpdateResponse, models::ErrorBody,
            models::MaintenanceBody,
        )
    ),
    tags(
        (name = "realty-portal", description = "Real-estate listing back office API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared by every request: the data layer, the settings cache sitting on top of it,
/// and the immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub settings: SettingsCache,
    pub config: AppConfig,
}

impl AppState {
    /// Wires a settings cache over `repo`.
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        Self {
            settings: SettingsCache::new(repo.clone()),
            repo,
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for SettingsCache {
    fn from_ref(app_state: &AppState) -> SettingsCache {
        app_state.settings.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// admin_middleware
///
/// Guards the admin router. Resolving `AdminUser` rejects with 401 before the handler
/// runs; on success the admin is stashed in the request extensions so the handler's
/// own `AdminUser` argument does not look it up a second time.
async fn admin_middleware(AdminUser(admin): AdminUser, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(admin);
    next.run(request).await
}

/// create_router
///
/// Assembles the routers, the admin guard, and the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(page_routes::page_routes())
        .merge(
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                admin_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, URI and the `x-request-id` set by the layer above.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
