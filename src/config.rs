use std::env;

use thiserror::Error;

/// Fallback signing secret for admin tokens outside production.
pub const LOCAL_ADMIN_SECRET: &str = "local-admin-secret-change-me";

/// AppConfig
///
/// Holds the application's configuration. Loaded once at startup and shared with
/// handlers and the auth extractor through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Gates the local admin bypass header.
    pub env: Env,
    // Which data layer implementation backs the repository.
    pub backend: Backend,
    // Postgres connection string. Only required for `Backend::Postgres`.
    pub db_url: Option<String>,
    // HS256 secret used to verify admin session tokens.
    pub admin_jwt_secret: String,
    // Cookie that carries the admin session token.
    pub admin_cookie: String,
    pub bind_addr: String,
}

/// Env
///
/// Runtime context. `Local` enables development shortcuts, `Production` hardens them away.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Backend
///
/// The data layer is mid-migration, so the repository implementation is picked at startup.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Backend {
    Postgres,
    Memory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    MissingInProduction(&'static str),

    #[error("DATABASE_URL is required for the postgres backend")]
    MissingDatabaseUrl,

    #[error("the in-memory backend cannot run in production")]
    MemoryBackendInProduction,

    #[error("unknown DATA_BACKEND value: {0}")]
    UnknownBackend(String),
}

impl Default for AppConfig {
    /// Non-panicking values for test state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            backend: Backend::Memory,
            db_url: None,
            admin_jwt_secret: LOCAL_ADMIN_SECRET.to_string(),
            admin_cookie: "admin_token".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables. Production refuses to start
    /// without an explicit admin secret and a database, so a misconfigured deploy fails
    /// before it serves a request.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let backend = match env::var("DATA_BACKEND") {
            Err(_) => Backend::Postgres,
            Ok(value) => match value.as_str() {
                "postgres" => Backend::Postgres,
                "memory" => Backend::Memory,
                _ => return Err(ConfigError::UnknownBackend(value)),
            },
        };

        let db_url = env::var("DATABASE_URL").ok();
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let admin_cookie =
            env::var("ADMIN_COOKIE_NAME").unwrap_or_else(|_| "admin_token".to_string());

        let admin_jwt_secret = match env {
            Env::Production => env::var("ADMIN_JWT_SECRET")
                .map_err(|_| ConfigError::MissingInProduction("ADMIN_JWT_SECRET"))?,
            Env::Local => {
                env::var("ADMIN_JWT_SECRET").unwrap_or_else(|_| LOCAL_ADMIN_SECRET.to_string())
            }
        };

        match (&env, backend) {
            (Env::Production, Backend::Memory) => return Err(ConfigError::MemoryBackendInProduction),
            (Env::Production, Backend::Postgres) if db_url.is_none() => {
                return Err(ConfigError::MissingInProduction("DATABASE_URL"));
            }
            (Env::Local, Backend::Postgres) if db_url.is_none() => {
                return Err(ConfigError::MissingDatabaseUrl);
            }
            _ => {}
        }

        Ok(Self {
            env,
            backend,
            db_url,
            admin_jwt_secret,
            admin_cookie,
            bind_addr,
        })
    }
}
