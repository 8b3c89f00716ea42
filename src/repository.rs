use crate::models::{
    Admin, EmailSubscriber, Inquiry, InquiryProperty, InquiryUser, Rating, RatingProperty,
    SiteSettings, UpdateInquiryRequest, UpdateSettingsRequest,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, query_builder::QueryBuilder};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// RepoError
///
/// Failures surfaced by the data layer. Handlers never inspect these beyond logging:
/// every variant becomes a generic 500.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record not found")]
    NotFound,

    #[error("invalid stored value: {0}")]
    Corrupt(String),
}

/// Repository Trait
///
/// The persistence contract shared by the Postgres store and the in-memory store used
/// while the data migration is in progress. Each method is a single query shape; no
/// business logic lives behind it.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Inquiries ---
    // All inquiries with property (title, slug) and user (name, email), newest first.
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, RepoError>;
    // Applies the partial patch and returns the row with its relations expanded.
    async fn update_inquiry(
        &self,
        id: Uuid,
        patch: UpdateInquiryRequest,
    ) -> Result<Inquiry, RepoError>;

    // --- Subscribers ---
    async fn list_subscribers(&self) -> Result<Vec<EmailSubscriber>, RepoError>;

    // --- Ratings ---
    // Approved and verified ratings ranked by (rating, helpful, created_at), all descending.
    async fn featured_ratings(&self, limit: usize) -> Result<Vec<Rating>, RepoError>;

    // --- Site Settings ---
    // The stored singleton, or the defaults when nothing has been saved yet.
    async fn site_settings(&self) -> Result<SiteSettings, RepoError>;
    async fn update_site_settings(
        &self,
        patch: UpdateSettingsRequest,
    ) -> Result<SiteSettings, RepoError>;

    // --- Admins ---
    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, RepoError>;
}

/// RepositoryState
///
/// The shared handle to whichever data layer was selected at startup.
pub type RepositoryState = Arc<dyn Repository>;

/// Flat join row for inquiries; folded into the nested `Inquiry` shape.
#[derive(FromRow)]
struct InquiryRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    status: String,
    notes: Option<String>,
    property_id: Uuid,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    property_title: String,
    property_slug: String,
    user_name: Option<String>,
    user_email: Option<String>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Inquiry {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            status: row.status,
            notes: row.notes,
            property_id: row.property_id,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            property: InquiryProperty {
                title: row.property_title,
                slug: row.property_slug,
            },
            // LEFT JOIN: no email means no user row.
            user: row.user_email.map(|email| InquiryUser {
                name: row.user_name,
                email,
            }),
        }
    }
}

#[derive(FromRow)]
struct RatingRow {
    id: Uuid,
    rating: i32,
    title: Option<String>,
    comment: Option<String>,
    helpful: i32,
    status: String,
    verified: bool,
    created_at: DateTime<Utc>,
    property_id: Uuid,
    property_title: String,
    property_location: String,
}

impl TryFrom<RatingRow> for Rating {
    type Error = RepoError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        Ok(Rating {
            id: row.id,
            rating: row.rating,
            title: row.title,
            comment: row.comment,
            helpful: row.helpful,
            status: row.status.parse().map_err(RepoError::Corrupt)?,
            verified: row.verified,
            created_at: row.created_at,
            property: RatingProperty {
                id: row.property_id,
                title: row.property_title,
                location: row.property_location,
            },
        })
    }
}

// Projection shared by the inquiry list and the post-update read.
const INQUIRY_PROJECTION: &str = r#"
    i.id, i.name, i.email, i.phone, i.message, i.status, i.notes,
    i.property_id, i.user_id, i.created_at, i.updated_at,
    p.title AS property_title, p.slug AS property_slug,
    u.name AS user_name, u.email AS user_email
"#;

const SETTINGS_COLUMNS: &str = r#"
    id, site_name, site_description, contact_email, contact_phone, address,
    logo_url, facebook_url, twitter_url, instagram_url, linkedin_url,
    smtp_host, smtp_port, smtp_user, email_password, admin_email,
    maintenance_mode, updated_at
"#;

/// PostgresRepository
///
/// The `Repository` implementation backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// list_inquiries
    ///
    /// Joins the property and (optional) user so the admin inbox can render without
    /// further lookups.
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, RepoError> {
        let query = format!(
            r#"
            SELECT {INQUIRY_PROJECTION}
            FROM inquiries i
            JOIN properties p ON p.id = i.property_id
            LEFT JOIN users u ON u.id = i.user_id
            ORDER BY i.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, InquiryRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Inquiry::from).collect())
    }

    /// update_inquiry
    ///
    /// Builds the SET list from whichever patch fields are present and reads the
    /// expanded row back through a CTE, so the update and the join are one round trip.
    async fn update_inquiry(
        &self,
        id: Uuid,
        patch: UpdateInquiryRequest,
    ) -> Result<Inquiry, RepoError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("WITH updated AS (UPDATE inquiries SET updated_at = NOW()");

        if let Some(name) = patch.name {
            builder.push(", name = ").push_bind(name);
        }
        if let Some(email) = patch.email {
            builder.push(", email = ").push_bind(email);
        }
        if let Some(phone) = patch.phone {
            builder.push(", phone = ").push_bind(phone);
        }
        if let Some(message) = patch.message {
            builder.push(", message = ").push_bind(message);
        }
        if let Some(status) = patch.status {
            builder.push(", status = ").push_bind(status);
        }
        if let Some(notes) = patch.notes {
            builder.push(", notes = ").push_bind(notes);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(format!(
            r#" RETURNING *)
            SELECT {INQUIRY_PROJECTION}
            FROM updated i
            JOIN properties p ON p.id = i.property_id
            LEFT JOIN users u ON u.id = i.user_id
            "#
        ));

        builder
            .build_query_as::<InquiryRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Inquiry::from)
            .ok_or(RepoError::NotFound)
    }

    async fn list_subscribers(&self) -> Result<Vec<EmailSubscriber>, RepoError> {
        let subscribers = sqlx::query_as::<_, EmailSubscriber>(
            r#"
            SELECT id, email, name, is_active, subscribed_at
            FROM email_subscribers
            ORDER BY subscribed_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(subscribers)
    }

    /// featured_ratings
    ///
    /// Eligibility and ranking are pushed into SQL; the result is already the final
    /// featured list.
    async fn featured_ratings(&self, limit: usize) -> Result<Vec<Rating>, RepoError> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT
                r.id, r.rating, r.title, r.comment, r.helpful, r.status, r.verified, r.created_at,
                p.id AS property_id, p.title AS property_title, p.location AS property_location
            FROM ratings r
            JOIN properties p ON p.id = r.property_id
            WHERE r.status = 'APPROVED' AND r.verified = true
            ORDER BY r.rating DESC, r.helpful DESC, r.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Rating::try_from).collect()
    }

    async fn site_settings(&self) -> Result<SiteSettings, RepoError> {
        let query = format!("SELECT {SETTINGS_COLUMNS} FROM site_settings WHERE id = 1");
        let stored = sqlx::query_as::<_, SiteSettings>(&query)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stored.unwrap_or_default())
    }

    /// update_site_settings
    ///
    /// Merges the patch onto the current record (or the defaults) and upserts the
    /// singleton row.
    async fn update_site_settings(
        &self,
        patch: UpdateSettingsRequest,
    ) -> Result<SiteSettings, RepoError> {
        let mut settings = self.site_settings().await?;
        settings.apply(patch);

        let query = format!(
            r#"
            INSERT INTO site_settings ({SETTINGS_COLUMNS})
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (id) DO UPDATE SET
                site_name = EXCLUDED.site_name,
                site_description = EXCLUDED.site_description,
                contact_email = EXCLUDED.contact_email,
                contact_phone = EXCLUDED.contact_phone,
                address = EXCLUDED.address,
                logo_url = EXCLUDED.logo_url,
                facebook_url = EXCLUDED.facebook_url,
                twitter_url = EXCLUDED.twitter_url,
                instagram_url = EXCLUDED.instagram_url,
                linkedin_url = EXCLUDED.linkedin_url,
                smtp_host = EXCLUDED.smtp_host,
                smtp_port = EXCLUDED.smtp_port,
                smtp_user = EXCLUDED.smtp_user,
                email_password = EXCLUDED.email_password,
                admin_email = EXCLUDED.admin_email,
                maintenance_mode = EXCLUDED.maintenance_mode,
                updated_at = EXCLUDED.updated_at
            RETURNING {SETTINGS_COLUMNS}
            "#
        );

        let saved = sqlx::query_as::<_, SiteSettings>(&query)
            .bind(settings.site_name)
            .bind(settings.site_description)
            .bind(settings.contact_email)
            .bind(settings.contact_phone)
            .bind(settings.address)
            .bind(settings.logo_url)
            .bind(settings.facebook_url)
            .bind(settings.twitter_url)
            .bind(settings.instagram_url)
            .bind(settings.linkedin_url)
            .bind(settings.smtp_host)
            .bind(settings.smtp_port)
            .bind(settings.smtp_user)
            .bind(settings.email_password)
            .bind(settings.admin_email)
            .bind(settings.maintenance_mode)
            .bind(settings.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved)
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, RepoError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, name, created_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }
}
