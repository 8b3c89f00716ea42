#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use realty_portal::{
    AppState, InMemoryRepository,
    auth::AdminClaims,
    config::{AppConfig, Env},
    models::{
        Admin, EmailSubscriber, Inquiry, InquiryProperty, InquiryUser, Rating, RatingProperty,
        RatingStatus, SiteSettings, UpdateInquiryRequest, UpdateSettingsRequest,
    },
    repository::{RepoError, Repository, RepositoryState},
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::SystemTime,
};
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-admin-secret-0123456789";
pub const ADMIN_ID: Uuid = Uuid::from_u128(0xA11CE);
pub const PROPERTY_ID: Uuid = Uuid::from_u128(0x9000);
pub const USER_ID: Uuid = Uuid::from_u128(0x7000);

// --- Fixtures ---

pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

pub fn admin() -> Admin {
    Admin {
        id: ADMIN_ID,
        email: "admin@realty.test".to_string(),
        name: Some("Ada Admin".to_string()),
        created_at: at(0),
    }
}

pub fn inquiry(n: u128, created: i64) -> Inquiry {
    Inquiry {
        id: Uuid::from_u128(n),
        name: format!("Visitor {n}"),
        email: format!("visitor{n}@mail.test"),
        phone: None,
        message: "Is this still available?".to_string(),
        status: "NEW".to_string(),
        notes: None,
        property_id: PROPERTY_ID,
        user_id: Some(USER_ID),
        created_at: at(created),
        updated_at: at(created),
        property: InquiryProperty {
            title: "Sunny Loft".to_string(),
            slug: "sunny-loft".to_string(),
        },
        user: Some(InquiryUser {
            name: Some("Vera Visitor".to_string()),
            email: "vera@mail.test".to_string(),
        }),
    }
}

pub fn subscriber(n: u128, subscribed: i64) -> EmailSubscriber {
    EmailSubscriber {
        id: Uuid::from_u128(n),
        email: format!("sub{n}@mail.test"),
        name: None,
        is_active: true,
        subscribed_at: at(subscribed),
    }
}

pub fn rating(
    n: u128,
    stars: i32,
    helpful: i32,
    created: i64,
    status: RatingStatus,
    verified: bool,
) -> Rating {
    Rating {
        id: Uuid::from_u128(n),
        rating: stars,
        title: Some(format!("Review {n}")),
        comment: None,
        helpful,
        status,
        verified,
        created_at: at(created),
        property: RatingProperty {
            id: PROPERTY_ID,
            title: "Sunny Loft".to_string(),
            location: "Dublin".to_string(),
        },
    }
}

pub fn stored_settings() -> SiteSettings {
    SiteSettings {
        site_name: "Harbor Homes".to_string(),
        contact_email: "hello@harbor.test".to_string(),
        email_password: "smtp-secret".to_string(),
        admin_email: "owner@harbor.test".to_string(),
        ..SiteSettings::default()
    }
}

/// A mixed set: only ids 1, 2, 3 and 5 are featurable.
pub fn mixed_ratings() -> Vec<Rating> {
    vec![
        rating(1, 5, 10, 10, RatingStatus::Approved, true),
        rating(2, 5, 10, 20, RatingStatus::Approved, true),
        rating(3, 4, 50, 30, RatingStatus::Approved, true),
        rating(4, 5, 99, 40, RatingStatus::Approved, false),
        rating(5, 3, 0, 50, RatingStatus::Approved, true),
        rating(6, 5, 99, 60, RatingStatus::Pending, true),
        rating(7, 5, 99, 70, RatingStatus::Rejected, true),
    ]
}

pub async fn seeded_memory() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    repo.insert_admin(admin()).await;
    repo.insert_inquiry(inquiry(1, 10)).await;
    repo.insert_inquiry(inquiry(2, 30)).await;
    repo.insert_inquiry(inquiry(3, 20)).await;
    repo.insert_subscriber(subscriber(11, 5)).await;
    repo.insert_subscriber(subscriber(12, 15)).await;
    for r in mixed_ratings() {
        repo.insert_rating(r).await;
    }
    repo.put_site_settings(stored_settings()).await;
    repo
}

// --- Tokens & Config ---

fn now() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Signs an admin token expiring `exp_offset` seconds from now (negative = expired).
pub fn mint_token(sub: Uuid, secret: &str, exp_offset: i64) -> String {
    let now = now();
    let claims = AdminClaims {
        sub,
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    mint_token(ADMIN_ID, TEST_SECRET, 3600)
}

pub fn production_config() -> AppConfig {
    AppConfig {
        env: Env::Production,
        admin_jwt_secret: TEST_SECRET.to_string(),
        ..AppConfig::default()
    }
}

// --- Instrumented Repository ---

/// Wraps the in-memory store, counting every call and failing on demand.
#[derive(Default)]
pub struct CountingRepo {
    pub inner: InMemoryRepository,
    calls: AtomicUsize,
    fail_queries: AtomicBool,
    fail_admin_lookup: AtomicBool,
}

impl CountingRepo {
    pub async fn seeded() -> Arc<Self> {
        Arc::new(Self {
            inner: seeded_memory().await,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every method except the admin lookup fails from now on.
    pub fn fail_queries(&self) {
        self.fail_queries.store(true, Ordering::SeqCst);
    }

    pub fn fail_admin_lookup(&self) {
        self.fail_admin_lookup.store(true, Ordering::SeqCst);
    }

    fn record(&self, failing: &AtomicBool) -> Result<(), RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if failing.load(Ordering::SeqCst) {
            return Err(RepoError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for CountingRepo {
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, RepoError> {
        self.record(&self.fail_queries)?;
        self.inner.list_inquiries().await
    }
    async fn update_inquiry(
        &self,
        id: Uuid,
        patch: UpdateInquiryRequest,
    ) -> Result<Inquiry, RepoError> {
        self.record(&self.fail_queries)?;
        self.inner.update_inquiry(id, patch).await
    }
    async fn list_subscribers(&self) -> Result<Vec<EmailSubscriber>, RepoError> {
        self.record(&self.fail_queries)?;
        self.inner.list_subscribers().await
    }
    async fn featured_ratings(&self, limit: usize) -> Result<Vec<Rating>, RepoError> {
        self.record(&self.fail_queries)?;
        self.inner.featured_ratings(limit).await
    }
    async fn site_settings(&self) -> Result<SiteSettings, RepoError> {
        self.record(&self.fail_queries)?;
        self.inner.site_settings().await
    }
    async fn update_site_settings(
        &self,
        patch: UpdateSettingsRequest,
    ) -> Result<SiteSettings, RepoError> {
        self.record(&self.fail_queries)?;
        self.inner.update_site_settings(patch).await
    }
    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, RepoError> {
        self.record(&self.fail_admin_lookup)?;
        self.inner.find_admin(id).await
    }
}

// --- App Helpers ---

pub fn app_state(repo: Arc<CountingRepo>, config: AppConfig) -> AppState {
    AppState::new(repo as RepositoryState, config)
}

/// Runs one request through a fresh clone of `app` and decodes the JSON body
/// (`Null` when the body is empty or not JSON).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn with_token(method: &str, uri: &str, token: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
