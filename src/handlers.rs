use crate::{
    AppState,
    auth::AdminUser,
    errors::ApiError,
    models::{
        ActionResponse, AdminResponse, ErrorBody, FEATURED_RATINGS_LIMIT, FeaturedRatingsResponse,
        InquiriesResponse, InquiryResponse, MaintenanceBody, PublicSettingsResponse,
        SettingsResponse, SettingsUpdateResponse, SubscribersResponse, UpdateInquiryRequest,
        UpdateSettingsRequest,
    },
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use uuid::Uuid;

// --- Admin: Inquiries ---

/// list_inquiries
///
/// [Admin Route] Every inquiry with its property and user expanded, newest first.
#[utoipa::path(
    get,
    path = "/inquiries",
    responses(
        (status = 200, description = "All inquiries", body = InquiriesResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn list_inquiries(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<InquiriesResponse>, ApiError> {
    let inquiries = state
        .repo
        .list_inquiries()
        .await
        .map_err(ApiError::internal("Failed to fetch inquiries"))?;
    Ok(Json(InquiriesResponse { inquiries }))
}

/// update_inquiry
///
/// [Admin Route] Applies a partial patch to one inquiry and returns it with relations.
///
/// The body is written as-is: any present field overwrites the column, with no
/// business-rule checks on values such as `status`.
#[utoipa::path(
    patch,
    path = "/inquiries/{id}",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    request_body = UpdateInquiryRequest,
    responses(
        (status = 200, description = "Updated inquiry", body = InquiryResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn update_inquiry(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateInquiryRequest>, JsonRejection>,
) -> Result<Json<InquiryResponse>, ApiError> {
    // An unreadable id or body is an internal failure like any other, not a 4xx.
    let Path(id) = id.map_err(ApiError::internal("Failed to update inquiry"))?;
    let Json(patch) = payload.map_err(ApiError::internal("Failed to update inquiry"))?;
    tracing::debug!(
        inquiry_id = %id,
        admin_id = %admin.id,
        fields = ?patch.present_fields(),
        "patching inquiry"
    );
    let inquiry = state
        .repo
        .update_inquiry(id, patch)
        .await
        .map_err(ApiError::internal("Failed to update inquiry"))?;
    Ok(Json(InquiryResponse { inquiry }))
}

// --- Admin: Subscribers ---

/// list_subscribers
///
/// [Admin Route] Newsletter subscribers, most recent first.
#[utoipa::path(
    get,
    path = "/subscribers",
    responses(
        (status = 200, description = "All subscribers", body = SubscribersResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn list_subscribers(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<SubscribersResponse>, ApiError> {
    let subscribers = state
        .repo
        .list_subscribers()
        .await
        .map_err(ApiError::internal("Failed to fetch subscribers"))?;
    Ok(Json(SubscribersResponse { subscribers }))
}

// --- Admin: Session & Settings ---

/// get_admin_me
///
/// [Admin Route] The admin resolved from the session.
#[utoipa::path(
    get,
    path = "/admin/me",
    responses(
        (status = 200, description = "Current admin", body = AdminResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn get_admin_me(AdminUser(admin): AdminUser) -> Json<AdminResponse> {
    Json(AdminResponse { admin })
}

/// clear_cache
///
/// [Admin Route] Invalidates the settings cache so the next read hits the store.
#[utoipa::path(
    post,
    path = "/admin/cache/clear",
    responses(
        (status = 200, description = "Cache cleared", body = ActionResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn clear_cache(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
) -> Json<ActionResponse> {
    state.settings.clear_settings_cache().await;
    tracing::info!(admin_id = %admin.id, "settings cache cleared by admin");
    Json(ActionResponse {
        success: true,
        message: "Settings cache cleared successfully".to_string(),
    })
}

/// get_admin_settings
///
/// [Admin Route] Full, unredacted settings.
#[utoipa::path(
    get,
    path = "/admin/settings",
    responses(
        (status = 200, description = "Site settings", body = SettingsResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn get_admin_settings(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = state
        .settings
        .get_site_settings()
        .await
        .map_err(ApiError::internal("Failed to fetch settings"))?;
    Ok(Json(SettingsResponse { settings }))
}

/// update_admin_settings
///
/// [Admin Route] Saves a partial settings patch, then invalidates the cache so public
/// readers see the change on their next request.
#[utoipa::path(
    put,
    path = "/admin/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings saved", body = SettingsUpdateResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn update_admin_settings(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<SettingsUpdateResponse>, ApiError> {
    let Json(patch) = payload.map_err(ApiError::internal("Failed to update settings"))?;
    let settings = state
        .repo
        .update_site_settings(patch)
        .await
        .map_err(ApiError::internal("Failed to update settings"))?;
    state.settings.clear_settings_cache().await;
    tracing::info!(admin_id = %admin.id, "site settings updated");
    Ok(Json(SettingsUpdateResponse {
        success: true,
        settings,
    }))
}

// --- Public ---

/// get_featured_ratings
///
/// [Public Route] Top approved, verified ratings for the home page.
#[utoipa::path(
    get,
    path = "/ratings/featured",
    responses(
        (status = 200, description = "Featured ratings", body = FeaturedRatingsResponse),
        (status = 500, description = "Internal error")
    )
)]
pub async fn get_featured_ratings(
    State(state): State<AppState>,
) -> Result<Json<FeaturedRatingsResponse>, ApiError> {
    let data = state
        .repo
        .featured_ratings(FEATURED_RATINGS_LIMIT)
        .await
        .map_err(ApiError::envelope("Failed to fetch featured ratings"))?;
    Ok(Json(FeaturedRatingsResponse {
        success: true,
        data,
    }))
}

/// get_public_settings
///
/// [Public Route] Site settings with the sensitive fields blanked. Redaction happens
/// here on every call, regardless of what the cache holds.
#[utoipa::path(
    get,
    path = "/settings/public",
    responses(
        (status = 200, description = "Redacted site settings", body = PublicSettingsResponse),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn get_public_settings(
    State(state): State<AppState>,
) -> Result<Json<PublicSettingsResponse>, ApiError> {
    let settings = state
        .settings
        .get_site_settings()
        .await
        .map_err(ApiError::internal("Failed to fetch settings"))?;
    Ok(Json(PublicSettingsResponse {
        success: true,
        settings: settings.redacted(),
    }))
}

/// blog_categories
///
/// [Public Route] Parked while blog data moves to the new database. Answers every
/// method and body with the same 503.
#[utoipa::path(
    get,
    path = "/blog/categories",
    responses((status = 503, description = "Maintenance", body = MaintenanceBody))
)]
pub async fn blog_categories() -> ApiError {
    ApiError::Maintenance
}
