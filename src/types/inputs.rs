//! Inbound shapes for every write and lookup.
//!
//! Shapes are decoded through `FromFields` and checked with `validator`, so a
//! rejected input names every violated field at once. Nullable columns use
//! `Option<Option<T>>` in the partial-update shapes: absent keeps the stored
//! value, `null` clears it.

use serde::{Serialize, Serializer};
use validator::Validate;

use super::fields::{Fields, FromFields};
use super::price::validate_price;
use super::{AvailabilityStatus, ItemCondition, Price, StoreSettings};

/// Writes a cleared nullable field as `null`.
fn serialize_nullable<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(Some(inner)) => serializer.serialize_some(inner),
        _ => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewAntiqueItem {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub year: Option<i32>,
    pub origin: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Price,
    pub availability_status: AvailabilityStatus,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub condition: ItemCondition,
    pub dimensions: Option<String>,
    pub material: Option<String>,
    #[validate(url(message = "Must be a valid URL"))]
    pub main_image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct AntiqueItemUpdate {
    #[validate(range(min = 1, message = "Id must be a positive integer"))]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub year: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub origin: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<AvailabilityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ItemCondition>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub dimensions: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub material: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    #[validate(url(message = "Must be a valid URL"))]
    pub main_image_url: Option<Option<String>>,
}

impl AntiqueItemUpdate {
    /// Returns true when no field besides the id was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.year.is_none()
            && self.origin.is_none()
            && self.price.is_none()
            && self.availability_status.is_none()
            && self.category.is_none()
            && self.condition.is_none()
            && self.dimensions.is_none()
            && self.material.is_none()
            && self.main_image_url.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewGalleryImage {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(url(message = "Must be a valid URL"))]
    pub image_url: String,
    pub alt_text: Option<String>,
    #[validate(range(min = 0, message = "Display order cannot be negative"))]
    pub display_order: i32,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewPageContent {
    #[validate(length(min = 1, message = "Page slug is required"))]
    pub page_slug: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub meta_description: Option<String>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct PageContentUpdate {
    #[validate(range(min = 1, message = "Id must be a positive integer"))]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Page slug cannot be empty"))]
    pub page_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub meta_description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl PageContentUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page_slug.is_none()
            && self.title.is_none()
            && self.content.is_none()
            && self.meta_description.is_none()
            && self.is_published.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewContactForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Partial settings write. The singleton row is created on first use.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct StoreSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Store name cannot be empty"))]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub store_description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Must be a valid email"))]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub contact_phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub address: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    pub business_hours: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    #[validate(url(message = "Must be a valid URL"))]
    pub google_maps_embed_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    #[validate(url(message = "Must be a valid URL"))]
    pub social_facebook: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    #[validate(url(message = "Must be a valid URL"))]
    pub social_instagram: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_nullable")]
    #[validate(url(message = "Must be a valid URL"))]
    pub social_twitter: Option<Option<String>>,
}

impl StoreSettingsUpdate {
    /// Layers the supplied fields onto `settings`, leaving the rest untouched.
    pub fn apply(&self, settings: &mut StoreSettings) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut settings.store_name, &self.store_name);
        set(&mut settings.store_description, &self.store_description);
        set(&mut settings.contact_email, &self.contact_email);
        set(&mut settings.contact_phone, &self.contact_phone);
        set(&mut settings.address, &self.address);
        set(&mut settings.business_hours, &self.business_hours);
        set(&mut settings.google_maps_embed_url, &self.google_maps_embed_url);
        set(&mut settings.social_facebook, &self.social_facebook);
        set(&mut settings.social_instagram, &self.social_instagram);
        set(&mut settings.social_twitter, &self.social_twitter);
    }
}

/// Lookup, delete and mark-read input.
#[derive(Debug, Clone, Copy, Serialize, Validate)]
pub struct IdInput {
    #[validate(range(min = 1, message = "Id must be a positive integer"))]
    pub id: i64,
}

/// Published-page lookup. Any string is accepted; an unknown slug reads as not found.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SlugInput {
    pub slug: String,
}

impl FromFields for NewAntiqueItem {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            name: fields.required("name"),
            description: fields.required("description"),
            year: fields.optional("year"),
            origin: fields.optional("origin"),
            price: fields.required_or("price", Price::from_cents(0)),
            availability_status: fields.optional("availability_status").unwrap_or_default(),
            category: fields.required("category"),
            condition: fields.required_or("condition", ItemCondition::Good),
            dimensions: fields.optional("dimensions"),
            material: fields.optional("material"),
            main_image_url: fields.optional("main_image_url"),
        }
    }
}

impl FromFields for AntiqueItemUpdate {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            id: fields.required("id"),
            name: fields.optional("name"),
            description: fields.optional("description"),
            year: fields.nullable("year"),
            origin: fields.nullable("origin"),
            price: fields.optional("price"),
            availability_status: fields.optional("availability_status"),
            category: fields.optional("category"),
            condition: fields.optional("condition"),
            dimensions: fields.nullable("dimensions"),
            material: fields.nullable("material"),
            main_image_url: fields.nullable("main_image_url"),
        }
    }
}

impl FromFields for NewGalleryImage {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            title: fields.required("title"),
            description: fields.optional("description"),
            image_url: fields.required("image_url"),
            alt_text: fields.optional("alt_text"),
            display_order: fields.optional("display_order").unwrap_or_default(),
            is_featured: fields.optional("is_featured").unwrap_or_default(),
        }
    }
}

impl FromFields for NewPageContent {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            page_slug: fields.required("page_slug"),
            title: fields.required("title"),
            content: fields.required("content"),
            meta_description: fields.optional("meta_description"),
            is_published: fields.optional("is_published").unwrap_or(true),
        }
    }
}

impl FromFields for PageContentUpdate {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            id: fields.required("id"),
            page_slug: fields.optional("page_slug"),
            title: fields.optional("title"),
            content: fields.optional("content"),
            meta_description: fields.nullable("meta_description"),
            is_published: fields.optional("is_published"),
        }
    }
}

impl FromFields for NewContactForm {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            name: fields.required("name"),
            email: fields.required("email"),
            phone: fields.optional("phone"),
            subject: fields.required("subject"),
            message: fields.required("message"),
        }
    }
}

impl FromFields for StoreSettingsUpdate {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            store_name: fields.optional("store_name"),
            store_description: fields.nullable("store_description"),
            contact_email: fields.optional("contact_email"),
            contact_phone: fields.nullable("contact_phone"),
            address: fields.nullable("address"),
            business_hours: fields.nullable("business_hours"),
            google_maps_embed_url: fields.nullable("google_maps_embed_url"),
            social_facebook: fields.nullable("social_facebook"),
            social_instagram: fields.nullable("social_instagram"),
            social_twitter: fields.nullable("social_twitter"),
        }
    }
}

impl FromFields for IdInput {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            id: fields.required("id"),
        }
    }
}

impl FromFields for SlugInput {
    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            slug: fields.required("slug"),
        }
    }
}
