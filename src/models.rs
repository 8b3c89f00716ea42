use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of ratings surfaced by the featured view.
pub const FEATURED_RATINGS_LIMIT: usize = 3;

// --- Core Application Schemas ---

/// Admin
///
/// Back-office identity resolved by the auth check. Never mutated by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// InquiryProperty
///
/// The slice of the listing that an inquiry expands to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct InquiryProperty {
    pub title: String,
    pub slug: String,
}

/// InquiryUser
///
/// The registered user behind an inquiry, when the visitor was signed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct InquiryUser {
    pub name: Option<String>,
    pub email: String,
}

/// Inquiry
///
/// A visitor's message about a listing. Listed newest first and changed only through
/// the admin PATCH route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub notes: Option<String>,
    pub property_id: Uuid,
    pub user_id: Option<Uuid>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
    pub property: InquiryProperty,
    pub user: Option<InquiryUser>,
}

/// UpdateInquiryRequest
///
/// Partial patch for PATCH /inquiries/{id}. Every present field is written as-is;
/// absent fields are left untouched. `phone` and `notes` are nullable: an explicit
/// `null` clears them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateInquiryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "::serde_with::rust::double_option::deserialize"
    )]
    #[schema(value_type = Option<String>)]
    #[ts(optional)]
    pub phone: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "::serde_with::rust::double_option::deserialize"
    )]
    #[schema(value_type = Option<String>)]
    #[ts(optional)]
    pub notes: Option<Option<String>>,
}

impl UpdateInquiryRequest {
    /// Names of the fields the patch will write, in column order.
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("email", self.email.is_some()),
            ("phone", self.phone.is_some()),
            ("message", self.message.is_some()),
            ("status", self.status.is_some()),
            ("notes", self.notes.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }
}

/// EmailSubscriber
///
/// Newsletter signup. Read-only here, listed by most recent subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EmailSubscriber {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    #[ts(type = "string")]
    pub subscribed_at: DateTime<Utc>,
}

/// RatingStatus
///
/// Moderation state of a rating. Stored and serialized in upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RatingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RatingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RatingStatus::Pending => "PENDING",
            RatingStatus::Approved => "APPROVED",
            RatingStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RatingStatus::Pending),
            "APPROVED" => Ok(RatingStatus::Approved),
            "REJECTED" => Ok(RatingStatus::Rejected),
            other => Err(format!("unknown rating status: {other}")),
        }
    }
}

/// RatingProperty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RatingProperty {
    pub id: Uuid,
    pub title: String,
    pub location: String,
}

/// Rating
///
/// A review left on a property. Only approved and verified ratings are eligible for
/// the featured view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Rating {
    pub id: Uuid,
    pub rating: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub helpful: i32,
    pub status: RatingStatus,
    pub verified: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub property: RatingProperty,
}

impl Rating {
    pub fn is_featurable(&self) -> bool {
        self.status == RatingStatus::Approved && self.verified
    }

    /// Featured order: rating desc, then helpful desc, then newest first.
    pub fn featured_order(a: &Rating, b: &Rating) -> Ordering {
        b.rating
            .cmp(&a.rating)
            .then_with(|| b.helpful.cmp(&a.helpful))
            .then_with(|| b.created_at.cmp(&a.created_at))
    }
}

/// Filters to featurable ratings, ranks them and keeps the top `limit`.
pub fn rank_featured<I>(ratings: I, limit: usize) -> Vec<Rating>
where
    I: IntoIterator<Item = Rating>,
{
    let mut eligible: Vec<Rating> = ratings.into_iter().filter(Rating::is_featurable).collect();
    eligible.sort_by(Rating::featured_order);
    eligible.truncate(limit);
    eligible
}

/// SiteSettings
///
/// The singleton site configuration record. `email_password` and `admin_email` are
/// sensitive and must go through `redacted()` before reaching a public caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SiteSettings {
    pub id: i32,
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub logo_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub smtp_host: String,
    pub smtp_port: i32,
    pub smtp_user: String,
    pub email_password: String,
    pub admin_email: String,
    pub maintenance_mode: bool,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl Default for SiteSettings {
    /// Served when no settings row has been stored yet.
    fn default() -> Self {
        Self {
            id: 1,
            site_name: "Realty Portal".to_string(),
            site_description: "Find your next home".to_string(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: String::new(),
            logo_url: None,
            facebook_url: None,
            twitter_url: None,
            instagram_url: None,
            linkedin_url: None,
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_user: String::new(),
            email_password: String::new(),
            admin_email: String::new(),
            maintenance_mode: false,
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

impl SiteSettings {
    /// Copy safe for non-admin callers: sensitive fields are blanked.
    pub fn redacted(&self) -> Self {
        Self {
            email_password: String::new(),
            admin_email: String::new(),
            ..self.clone()
        }
    }

    /// Writes every present field of `patch` onto `self`.
    pub fn apply(&mut self, patch: UpdateSettingsRequest) {
        let UpdateSettingsRequest {
            site_name,
            site_description,
            contact_email,
            contact_phone,
            address,
            logo_url,
            facebook_url,
            twitter_url,
            instagram_url,
            linkedin_url,
            smtp_host,
            smtp_port,
            smtp_user,
            email_password,
            admin_email,
            maintenance_mode,
        } = patch;

        set(&mut self.site_name, site_name);
        set(&mut self.site_description, site_description);
        set(&mut self.contact_email, contact_email);
        set(&mut self.contact_phone, contact_phone);
        set(&mut self.address, address);
        set(&mut self.logo_url, logo_url);
        set(&mut self.facebook_url, facebook_url);
        set(&mut self.twitter_url, twitter_url);
        set(&mut self.instagram_url, instagram_url);
        set(&mut self.linkedin_url, linkedin_url);
        set(&mut self.smtp_host, smtp_host);
        set(&mut self.smtp_port, smtp_port);
        set(&mut self.smtp_user, smtp_user);
        set(&mut self.email_password, email_password);
        set(&mut self.admin_email, admin_email);
        set(&mut self.maintenance_mode, maintenance_mode);
        self.updated_at = Utc::now();
    }
}

/// UpdateSettingsRequest
///
/// Partial update payload for PUT /admin/settings. An explicit `null` clears a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "::serde_with::rust::double_option::deserialize"
    )]
    #[schema(value_type = Option<String>)]
    #[ts(optional)]
    pub logo_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "::serde_with::rust::double_option::deserialize"
    )]
    #[schema(value_type = Option<String>)]
    #[ts(optional)]
    pub facebook_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "::serde_with::rust::double_option::deserialize"
    )]
    #[schema(value_type = Option<String>)]
    #[ts(optional)]
    pub twitter_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "::serde_with::rust::double_option::deserialize"
    )]
    #[schema(value_type = Option<String>)]
    #[ts(optional)]
    pub instagram_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "::serde_with::rust::double_option::deserialize"
    )]
    #[schema(value_type = Option<String>)]
    #[ts(optional)]
    pub linkedin_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

// --- Response Envelopes ---

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct InquiriesResponse {
    pub inquiries: Vec<Inquiry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct InquiryResponse {
    pub inquiry: Inquiry,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SubscribersResponse {
    pub subscribers: Vec<EmailSubscriber>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminResponse {
    pub admin: Admin,
}

/// Shape shared by admin actions that only report success.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct FeaturedRatingsResponse {
    pub success: bool,
    pub data: Vec<Rating>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PublicSettingsResponse {
    pub success: bool,
    pub settings: SiteSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SettingsResponse {
    pub settings: SiteSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SettingsUpdateResponse {
    pub success: bool,
    pub settings: SiteSettings,
}

/// Body of every 401/500 response on the plain error shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of the 503 returned by routes disabled during the migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MaintenanceBody {
    pub error: String,
    pub message: String,
    pub categories: Vec<String>,
}
