use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AvailabilityStatus, ItemCondition, Price};

/// Placeholder store name used when the first settings write omits it.
pub const DEFAULT_STORE_NAME: &str = "Antique Store";

/// Placeholder contact address used when the first settings write omits it.
pub const DEFAULT_CONTACT_EMAIL: &str = "info@antiquestore.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntiqueItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub year: Option<i32>,
    pub origin: Option<String>,
    pub price: Price,
    pub availability_status: AvailabilityStatus,
    pub category: String,
    pub condition: ItemCondition,
    pub dimensions: Option<String>,
    pub material: Option<String>,
    pub main_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gallery images are write-once; only deletion follows creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub display_order: i32,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub id: i64,
    pub page_slug: String,
    pub title: String,
    /// Rich text, stored and returned untouched.
    pub content: String,
    pub meta_description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub id: i64,
    pub store_name: String,
    pub store_description: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub business_hours: Option<String>,
    pub google_maps_embed_url: Option<String>,
    pub social_facebook: Option<String>,
    pub social_instagram: Option<String>,
    pub social_twitter: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl StoreSettings {
    /// The row a first write starts from before its own fields are layered on.
    /// The id is assigned by the store when the row is inserted.
    #[must_use]
    pub fn first_write(updated_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            store_name: DEFAULT_STORE_NAME.to_string(),
            store_description: None,
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            contact_phone: None,
            address: None,
            business_hours: None,
            google_maps_embed_url: None,
            social_facebook: None,
            social_instagram: None,
            social_twitter: None,
            updated_at,
        }
    }
}
