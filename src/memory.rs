use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{
        Admin, EmailSubscriber, Inquiry, Rating, SiteSettings, UpdateInquiryRequest,
        UpdateSettingsRequest, rank_featured,
    },
    repository::{RepoError, Repository},
};

#[derive(Default)]
struct Tables {
    admins: Vec<Admin>,
    inquiries: Vec<Inquiry>,
    subscribers: Vec<EmailSubscriber>,
    ratings: Vec<Rating>,
    settings: Option<SiteSettings>,
}

/// InMemoryRepository
///
/// A process-local `Repository` holding every table in memory. Selected with
/// `DATA_BACKEND=memory` for local work while the database migration is underway, and
/// used by the test suites as a faithful stand-in for Postgres: orderings, joins and
/// featured ranking match the SQL implementation.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Seeding ---

    pub async fn insert_admin(&self, admin: Admin) {
        self.tables.write().await.admins.push(admin);
    }

    pub async fn insert_inquiry(&self, inquiry: Inquiry) {
        self.tables.write().await.inquiries.push(inquiry);
    }

    pub async fn insert_subscriber(&self, subscriber: EmailSubscriber) {
        self.tables.write().await.subscribers.push(subscriber);
    }

    pub async fn insert_rating(&self, rating: Rating) {
        self.tables.write().await.ratings.push(rating);
    }

    /// Replaces the stored settings directly, bypassing any cache in front of the store.
    pub async fn put_site_settings(&self, settings: SiteSettings) {
        self.tables.write().await.settings = Some(settings);
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, RepoError> {
        let mut inquiries = self.tables.read().await.inquiries.clone();
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inquiries)
    }

    async fn update_inquiry(
        &self,
        id: Uuid,
        patch: UpdateInquiryRequest,
    ) -> Result<Inquiry, RepoError> {
        let mut tables = self.tables.write().await;
        let inquiry = tables
            .inquiries
            .iter_mut()
            .find(|inquiry| inquiry.id == id)
            .ok_or(RepoError::NotFound)?;

        if let Some(name) = patch.name {
            inquiry.name = name;
        }
        if let Some(email) = patch.email {
            inquiry.email = email;
        }
        if let Some(phone) = patch.phone {
            inquiry.phone = phone;
        }
        if let Some(message) = patch.message {
            inquiry.message = message;
        }
        if let Some(status) = patch.status {
            inquiry.status = status;
        }
        if let Some(notes) = patch.notes {
            inquiry.notes = notes;
        }
        inquiry.updated_at = Utc::now();

        Ok(inquiry.clone())
    }

    async fn list_subscribers(&self) -> Result<Vec<EmailSubscriber>, RepoError> {
        let mut subscribers = self.tables.read().await.subscribers.clone();
        subscribers.sort_by(|a, b| b.subscribed_at.cmp(&a.subscribed_at));
        Ok(subscribers)
    }

    async fn featured_ratings(&self, limit: usize) -> Result<Vec<Rating>, RepoError> {
        let ratings = self.tables.read().await.ratings.clone();
        Ok(rank_featured(ratings, limit))
    }

    async fn site_settings(&self) -> Result<SiteSettings, RepoError> {
        Ok(self
            .tables
            .read()
            .await
            .settings
            .clone()
            .unwrap_or_default())
    }

    async fn update_site_settings(
        &self,
        patch: UpdateSettingsRequest,
    ) -> Result<SiteSettings, RepoError> {
        let mut tables = self.tables.write().await;
        let settings = tables.settings.get_or_insert_with(SiteSettings::default);
        settings.apply(patch);
        Ok(settings.clone())
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, RepoError> {
        Ok(self
            .tables
            .read()
            .await
            .admins
            .iter()
            .find(|admin| admin.id == id)
            .cloned())
    }
}
