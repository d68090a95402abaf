mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// Lookups that match nothing return `Ok(None)` (or `Ok(false)` for deletes);
/// errors are reserved for store faults and uniqueness conflicts.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Antique item operations
    fn create_antique_item(&self, item: &NewAntiqueItem) -> Result<AntiqueItem>;
    fn list_antique_items(&self) -> Result<Vec<AntiqueItem>>;
    fn get_antique_item(&self, id: i64) -> Result<Option<AntiqueItem>>;
    fn update_antique_item(&self, update: &AntiqueItemUpdate) -> Result<Option<AntiqueItem>>;
    fn delete_antique_item(&self, id: i64) -> Result<bool>;

    // Gallery image operations
    fn create_gallery_image(&self, image: &NewGalleryImage) -> Result<GalleryImage>;
    fn list_gallery_images(&self) -> Result<Vec<GalleryImage>>;
    fn list_featured_gallery_images(&self) -> Result<Vec<GalleryImage>>;
    fn get_gallery_image(&self, id: i64) -> Result<Option<GalleryImage>>;
    fn delete_gallery_image(&self, id: i64) -> Result<bool>;

    // Page content operations
    fn create_page_content(&self, page: &NewPageContent) -> Result<PageContent>;
    fn list_page_content(&self) -> Result<Vec<PageContent>>;
    fn get_page_content(&self, id: i64) -> Result<Option<PageContent>>;
    fn get_published_page_by_slug(&self, slug: &str) -> Result<Option<PageContent>>;
    fn update_page_content(&self, update: &PageContentUpdate) -> Result<Option<PageContent>>;
    fn delete_page_content(&self, id: i64) -> Result<bool>;

    // Contact form operations
    fn create_contact_form(&self, form: &NewContactForm) -> Result<ContactForm>;
    fn list_contact_forms(&self) -> Result<Vec<ContactForm>>;
    fn get_contact_form(&self, id: i64) -> Result<Option<ContactForm>>;
    fn mark_contact_form_read(&self, id: i64) -> Result<Option<ContactForm>>;

    // Store settings (singleton)
    fn get_store_settings(&self) -> Result<Option<StoreSettings>>;
    fn upsert_store_settings(&self, update: &StoreSettingsUpdate) -> Result<StoreSettings>;
}
