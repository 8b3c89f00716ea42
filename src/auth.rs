use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    errors::ApiError,
    models::Admin,
    repository::{RepoError, RepositoryState},
};

/// Header accepted in `Env::Local` only, carrying an admin UUID in place of a token.
pub const LOCAL_BYPASS_HEADER: &str = "x-admin-id";

/// AdminClaims
///
/// Payload of an admin session token. Tokens are issued by the external session
/// provider and signed with the shared admin secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject: the admin's id.
    pub sub: Uuid,
    /// Expiration time. Always validated.
    pub exp: usize,
    /// Issued at.
    pub iat: usize,
}

/// get_admin_from_request
///
/// The admin auth check. Resolves the admin behind the request's credentials:
/// the session cookie first, then an `Authorization: Bearer` header.
///
/// Missing, malformed, expired or wrongly-signed tokens, and tokens whose admin no
/// longer exists, all yield `Ok(None)`. Only a failing admin lookup is an error.
pub async fn get_admin_from_request(
    headers: &HeaderMap,
    config: &AppConfig,
    repo: &RepositoryState,
) -> Result<Option<Admin>, RepoError> {
    if config.env == Env::Local {
        let bypass_id = headers
            .get(LOCAL_BYPASS_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        if let Some(admin_id) = bypass_id {
            // The bypass still requires a real admin row.
            if let Some(admin) = repo.find_admin(admin_id).await? {
                return Ok(Some(admin));
            }
        }
    }

    let Some(token) = session_token(headers, &config.admin_cookie) else {
        return Ok(None);
    };

    let decoding_key = DecodingKey::from_secret(config.admin_jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let claims = match decode::<AdminClaims>(token, &decoding_key, &validation) {
        Ok(data) => data.claims,
        Err(e) => {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("admin token expired"),
                _ => tracing::debug!(error = %e, "admin token rejected"),
            }
            return Ok(None);
        }
    };

    let admin = repo.find_admin(claims.sub).await?;
    if admin.is_none() {
        tracing::debug!(admin_id = %claims.sub, "token subject is not an admin");
    }
    Ok(admin)
}

/// Extracts the raw session token from the admin cookie or the bearer header.
fn session_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
    })
}

/// AdminUser Extractor Result
///
/// A verified admin. Taking this as a handler argument guarantees the request is
/// rejected with 401 before the handler body (and therefore any data access) runs.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Admin);

/// AdminUser Extractor Implementation
///
/// Reuses an admin already resolved by the admin router middleware when present,
/// otherwise runs the auth check itself.
///
/// Rejection: `ApiError::Unauthorized` (401) when no admin is resolved,
/// `ApiError::Internal` (500) when the admin lookup fails.
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(admin) = parts.extensions.get::<Admin>() {
            return Ok(AdminUser(admin.clone()));
        }

        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        get_admin_from_request(&parts.headers, &config, &repo)
            .await
            .map_err(ApiError::internal("Internal server error"))?
            .map(AdminUser)
            .ok_or(ApiError::Unauthorized)
    }
}
