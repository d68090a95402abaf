use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{
    Connection, OptionalExtension, Row, TransactionBehavior, params, params_from_iter,
};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const ITEM_COLUMNS: &str = "id, name, description, year, origin, price, availability_status, \
     category, condition, dimensions, material, main_image_url, created_at, updated_at";

const IMAGE_COLUMNS: &str =
    "id, title, description, image_url, alt_text, display_order, is_featured, created_at";

const PAGE_COLUMNS: &str =
    "id, page_slug, title, content, meta_description, is_published, created_at, updated_at";

const FORM_COLUMNS: &str = "id, name, email, phone, subject, message, is_read, created_at";

const SETTINGS_COLUMNS: &str = "id, store_name, store_description, contact_email, contact_phone, \
     address, business_hours, google_maps_embed_url, social_facebook, social_instagram, \
     social_twitter, updated_at";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
}

/// Reads a timestamp column; unreadable text fails the row instead of being guessed.
fn datetime_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    parse_datetime(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn unique_violation(err: rusqlite::Error, message: impl FnOnce() -> String) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Error::Conflict(message())
        }
        other => Error::from(other),
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<AntiqueItem> {
    Ok(AntiqueItem {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        year: row.get(3)?,
        origin: row.get(4)?,
        price: row.get(5)?,
        availability_status: row.get(6)?,
        category: row.get(7)?,
        condition: row.get(8)?,
        dimensions: row.get(9)?,
        material: row.get(10)?,
        main_image_url: row.get(11)?,
        created_at: datetime_column(row, 12)?,
        updated_at: datetime_column(row, 13)?,
    })
}

fn image_from_row(row: &Row<'_>) -> rusqlite::Result<GalleryImage> {
    Ok(GalleryImage {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        image_url: row.get(3)?,
        alt_text: row.get(4)?,
        display_order: row.get(5)?,
        is_featured: row.get(6)?,
        created_at: datetime_column(row, 7)?,
    })
}

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<PageContent> {
    Ok(PageContent {
        id: row.get(0)?,
        page_slug: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        meta_description: row.get(4)?,
        is_published: row.get(5)?,
        created_at: datetime_column(row, 6)?,
        updated_at: datetime_column(row, 7)?,
    })
}

fn form_from_row(row: &Row<'_>) -> rusqlite::Result<ContactForm> {
    Ok(ContactForm {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        subject: row.get(4)?,
        message: row.get(5)?,
        is_read: row.get(6)?,
        created_at: datetime_column(row, 7)?,
    })
}

fn settings_from_row(row: &Row<'_>) -> rusqlite::Result<StoreSettings> {
    Ok(StoreSettings {
        id: row.get(0)?,
        store_name: row.get(1)?,
        store_description: row.get(2)?,
        contact_email: row.get(3)?,
        contact_phone: row.get(4)?,
        address: row.get(5)?,
        business_hours: row.get(6)?,
        google_maps_embed_url: row.get(7)?,
        social_facebook: row.get(8)?,
        social_instagram: row.get(9)?,
        social_twitter: row.get(10)?,
        updated_at: datetime_column(row, 11)?,
    })
}

fn query_all<T, F>(conn: &Connection, sql: &str, map: F) -> Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Column assignments for a partial UPDATE, in bind order.
#[derive(Default)]
struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl Assignments {
    fn set(&mut self, column: &'static str, value: impl Into<Value>) {
        self.columns.push(column);
        self.values.push(value.into());
    }

    fn set_if<T>(&mut self, column: &'static str, value: &Option<T>)
    where
        T: Clone + Into<Value>,
    {
        if let Some(value) = value {
            self.set(column, value.clone());
        }
    }

    /// Runs a single `UPDATE ... RETURNING` against the row with `id`.
    fn apply<T, F>(
        mut self,
        conn: &Connection,
        table: &str,
        returning: &str,
        id: i64,
        map: F,
    ) -> rusqlite::Result<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sets: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{} RETURNING {returning}",
            sets.join(", "),
            self.values.len() + 1
        );
        self.values.push(Value::Integer(id));

        conn.query_row(&sql, params_from_iter(self.values.iter()), map)
            .optional()
    }
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Antique item operations

    fn create_antique_item(&self, item: &NewAntiqueItem) -> Result<AntiqueItem> {
        let now = format_datetime(&Utc::now());
        let conn = self.conn();
        conn.query_row(
            &format!(
                "INSERT INTO antique_items (name, description, year, origin, price, availability_status,
                     category, condition, dimensions, material, main_image_url, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)
                 RETURNING {ITEM_COLUMNS}"
            ),
            params![
                item.name,
                item.description,
                item.year,
                item.origin,
                item.price,
                item.availability_status,
                item.category,
                item.condition,
                item.dimensions,
                item.material,
                item.main_image_url,
                now,
            ],
            item_from_row,
        )
        .map_err(Error::from)
    }

    fn list_antique_items(&self) -> Result<Vec<AntiqueItem>> {
        let conn = self.conn();
        query_all(
            &conn,
            &format!("SELECT {ITEM_COLUMNS} FROM antique_items ORDER BY created_at DESC, id DESC"),
            item_from_row,
        )
    }

    fn get_antique_item(&self, id: i64) -> Result<Option<AntiqueItem>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM antique_items WHERE id = ?1"),
            params![id],
            item_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_antique_item(&self, update: &AntiqueItemUpdate) -> Result<Option<AntiqueItem>> {
        if update.is_empty() {
            return self.get_antique_item(update.id);
        }

        let mut assignments = Assignments::default();
        assignments.set_if("name", &update.name);
        assignments.set_if("description", &update.description);
        assignments.set_if("year", &update.year);
        assignments.set_if("origin", &update.origin);
        assignments.set_if("price", &update.price.map(Price::to_storage));
        assignments.set_if(
            "availability_status",
            &update.availability_status.map(|s| s.as_str().to_string()),
        );
        assignments.set_if("category", &update.category);
        assignments.set_if("condition", &update.condition.map(|c| c.as_str().to_string()));
        assignments.set_if("dimensions", &update.dimensions);
        assignments.set_if("material", &update.material);
        assignments.set_if("main_image_url", &update.main_image_url);
        assignments.set("updated_at", format_datetime(&Utc::now()));

        let conn = self.conn();
        assignments
            .apply(&conn, "antique_items", ITEM_COLUMNS, update.id, item_from_row)
            .map_err(Error::from)
    }

    fn delete_antique_item(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM antique_items WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Gallery image operations

    fn create_gallery_image(&self, image: &NewGalleryImage) -> Result<GalleryImage> {
        let conn = self.conn();
        conn.query_row(
            &format!(
                "INSERT INTO gallery_images (title, description, image_url, alt_text, display_order, is_featured, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {IMAGE_COLUMNS}"
            ),
            params![
                image.title,
                image.description,
                image.image_url,
                image.alt_text,
                image.display_order,
                image.is_featured,
                format_datetime(&Utc::now()),
            ],
            image_from_row,
        )
        .map_err(Error::from)
    }

    fn list_gallery_images(&self) -> Result<Vec<GalleryImage>> {
        let conn = self.conn();
        query_all(
            &conn,
            &format!(
                "SELECT {IMAGE_COLUMNS} FROM gallery_images
                 ORDER BY display_order ASC, created_at ASC, id ASC"
            ),
            image_from_row,
        )
    }

    fn list_featured_gallery_images(&self) -> Result<Vec<GalleryImage>> {
        let conn = self.conn();
        query_all(
            &conn,
            &format!(
                "SELECT {IMAGE_COLUMNS} FROM gallery_images WHERE is_featured = 1
                 ORDER BY display_order ASC, created_at ASC, id ASC"
            ),
            image_from_row,
        )
    }

    fn get_gallery_image(&self, id: i64) -> Result<Option<GalleryImage>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {IMAGE_COLUMNS} FROM gallery_images WHERE id = ?1"),
            params![id],
            image_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn delete_gallery_image(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM gallery_images WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Page content operations

    fn create_page_content(&self, page: &NewPageContent) -> Result<PageContent> {
        let now = format_datetime(&Utc::now());
        let conn = self.conn();
        conn.query_row(
            &format!(
                "INSERT INTO page_content (page_slug, title, content, meta_description, is_published, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 RETURNING {PAGE_COLUMNS}"
            ),
            params![
                page.page_slug,
                page.title,
                page.content,
                page.meta_description,
                page.is_published,
                now,
            ],
            page_from_row,
        )
        .map_err(|e| unique_violation(e, || format!("page slug '{}' is already taken", page.page_slug)))
    }

    fn list_page_content(&self) -> Result<Vec<PageContent>> {
        let conn = self.conn();
        query_all(
            &conn,
            &format!("SELECT {PAGE_COLUMNS} FROM page_content ORDER BY updated_at DESC, id DESC"),
            page_from_row,
        )
    }

    fn get_page_content(&self, id: i64) -> Result<Option<PageContent>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PAGE_COLUMNS} FROM page_content WHERE id = ?1"),
            params![id],
            page_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_published_page_by_slug(&self, slug: &str) -> Result<Option<PageContent>> {
        let conn = self.conn();
        conn.query_row(
            &format!(
                "SELECT {PAGE_COLUMNS} FROM page_content WHERE page_slug = ?1 AND is_published = 1"
            ),
            params![slug],
            page_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_page_content(&self, update: &PageContentUpdate) -> Result<Option<PageContent>> {
        if update.is_empty() {
            return self.get_page_content(update.id);
        }

        let mut assignments = Assignments::default();
        assignments.set_if("page_slug", &update.page_slug);
        assignments.set_if("title", &update.title);
        assignments.set_if("content", &update.content);
        assignments.set_if("meta_description", &update.meta_description);
        assignments.set_if("is_published", &update.is_published);
        assignments.set("updated_at", format_datetime(&Utc::now()));

        let conn = self.conn();
        assignments
            .apply(&conn, "page_content", PAGE_COLUMNS, update.id, page_from_row)
            .map_err(|e| {
                unique_violation(e, || {
                    format!(
                        "page slug '{}' is already taken",
                        update.page_slug.as_deref().unwrap_or_default()
                    )
                })
            })
    }

    fn delete_page_content(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM page_content WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Contact form operations

    fn create_contact_form(&self, form: &NewContactForm) -> Result<ContactForm> {
        let conn = self.conn();
        conn.query_row(
            &format!(
                "INSERT INTO contact_forms (name, email, phone, subject, message, is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
                 RETURNING {FORM_COLUMNS}"
            ),
            params![
                form.name,
                form.email,
                form.phone,
                form.subject,
                form.message,
                format_datetime(&Utc::now()),
            ],
            form_from_row,
        )
        .map_err(Error::from)
    }

    fn list_contact_forms(&self) -> Result<Vec<ContactForm>> {
        let conn = self.conn();
        query_all(
            &conn,
            &format!("SELECT {FORM_COLUMNS} FROM contact_forms ORDER BY created_at DESC, id DESC"),
            form_from_row,
        )
    }

    fn get_contact_form(&self, id: i64) -> Result<Option<ContactForm>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {FORM_COLUMNS} FROM contact_forms WHERE id = ?1"),
            params![id],
            form_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn mark_contact_form_read(&self, id: i64) -> Result<Option<ContactForm>> {
        let conn = self.conn();
        conn.query_row(
            &format!("UPDATE contact_forms SET is_read = 1 WHERE id = ?1 RETURNING {FORM_COLUMNS}"),
            params![id],
            form_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    // Store settings

    fn get_store_settings(&self) -> Result<Option<StoreSettings>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SETTINGS_COLUMNS} FROM store_settings WHERE singleton = 1"),
            [],
            settings_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn upsert_store_settings(&self, update: &StoreSettingsUpdate) -> Result<StoreSettings> {
        let now = Utc::now();
        let mut conn = self.conn();
        // Write lock is held from the read through the upsert.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = tx
            .query_row(
                &format!("SELECT {SETTINGS_COLUMNS} FROM store_settings WHERE singleton = 1"),
                [],
                settings_from_row,
            )
            .optional()?;

        let mut settings = current.unwrap_or_else(|| StoreSettings::first_write(now));
        update.apply(&mut settings);

        let saved = tx.query_row(
            &format!(
                "INSERT INTO store_settings (singleton, store_name, store_description, contact_email,
                     contact_phone, address, business_hours, google_maps_embed_url,
                     social_facebook, social_instagram, social_twitter, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 ON CONFLICT (singleton) DO UPDATE SET
                    store_name = excluded.store_name,
                    store_description = excluded.store_description,
                    contact_email = excluded.contact_email,
                    contact_phone = excluded.contact_phone,
                    address = excluded.address,
                    business_hours = excluded.business_hours,
                    google_maps_embed_url = excluded.google_maps_embed_url,
                    social_facebook = excluded.social_facebook,
                    social_instagram = excluded.social_instagram,
                    social_twitter = excluded.social_twitter,
                    updated_at = excluded.updated_at
                 RETURNING {SETTINGS_COLUMNS}"
            ),
            params![
                settings.store_name,
                settings.store_description,
                settings.contact_email,
                settings.contact_phone,
                settings.address,
                settings.business_hours,
                settings.google_maps_embed_url,
                settings.social_facebook,
                settings.social_instagram,
                settings.social_twitter,
                format_datetime(&now),
            ],
            settings_from_row,
        )?;

        tx.commit()?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    fn vase() -> NewAntiqueItem {
        NewAntiqueItem {
            name: "Vase".to_string(),
            description: "Blue and white porcelain".to_string(),
            year: None,
            origin: Some("Delft".to_string()),
            price: Price::from_cents(7500),
            availability_status: AvailabilityStatus::Available,
            category: "Ceramics".to_string(),
            condition: ItemCondition::Good,
            dimensions: None,
            material: Some("Porcelain".to_string()),
            main_image_url: None,
        }
    }

    fn image(title: &str, display_order: i32, is_featured: bool) -> NewGalleryImage {
        NewGalleryImage {
            title: title.to_string(),
            description: None,
            image_url: format!("https://example.com/{title}.jpg"),
            alt_text: None,
            display_order,
            is_featured,
        }
    }

    fn page(slug: &str, is_published: bool) -> NewPageContent {
        NewPageContent {
            page_slug: slug.to_string(),
            title: format!("{slug} page"),
            content: "<p>Hello</p>".to_string(),
            meta_description: None,
            is_published,
        }
    }

    fn pause() {
        thread::sleep(Duration::from_millis(5));
    }

    #[test]
    fn test_initialize_creates_tables() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        // Schema is idempotent
        store.initialize().unwrap();

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"antique_items".to_string()));
        assert!(tables.contains(&"gallery_images".to_string()));
        assert!(tables.contains(&"page_content".to_string()));
        assert!(tables.contains(&"contact_forms".to_string()));
        assert!(tables.contains(&"store_settings".to_string()));
    }

    #[test]
    fn test_unreadable_timestamp_is_a_store_error() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let created = store.create_antique_item(&vase()).unwrap();

        store
            .conn()
            .execute(
                "UPDATE antique_items SET updated_at = 'yesterday' WHERE id = ?1",
                params![created.id],
            )
            .unwrap();

        let result = store.get_antique_item(created.id);
        assert!(matches!(
            result,
            Err(Error::Database(rusqlite::Error::FromSqlConversionFailure(13, Type::Text, _)))
        ));
        assert!(store.list_antique_items().is_err());
    }

    #[test]
    fn test_sqlite_datetime_format_accepted() {
        let parsed = parse_datetime("2024-03-01 12:30:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2024-03-01T12:30:00.000000Z");
        assert!(parse_datetime("not a date").is_err());
    }

    #[test]
    fn test_antique_item_crud() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let created = store.create_antique_item(&vase()).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Vase");
        assert_eq!(created.year, None);
        assert_eq!(created.price, Price::from_cents(7500));
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get_antique_item(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);

        let items = store.list_antique_items().unwrap();
        assert_eq!(items, vec![created.clone()]);

        assert!(store.delete_antique_item(created.id).unwrap());
        assert!(store.get_antique_item(created.id).unwrap().is_none());
        assert!(!store.delete_antique_item(created.id).unwrap());
    }

    #[test]
    fn test_price_stored_as_fixed_point_text() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let mut item = vase();
        item.price = "1250.5".parse().unwrap();
        let created = store.create_antique_item(&item).unwrap();

        let stored: String = store
            .conn()
            .query_row(
                "SELECT price FROM antique_items WHERE id = ?1",
                params![created.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(stored, "1250.50");
        assert_eq!(created.price.to_f64(), Some(1250.5));
    }

    #[test]
    fn test_list_antique_items_newest_first() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        assert!(store.list_antique_items().unwrap().is_empty());

        let first = store.create_antique_item(&vase()).unwrap();
        pause();
        let mut clock = vase();
        clock.name = "Clock".to_string();
        let second = store.create_antique_item(&clock).unwrap();

        let ids: Vec<i64> = store
            .list_antique_items()
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_update_antique_item_changes_only_supplied_fields() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let created = store.create_antique_item(&vase()).unwrap();
        pause();

        let update = AntiqueItemUpdate {
            id: created.id,
            price: Some(Price::from_cents(8000)),
            origin: Some(None),
            ..Default::default()
        };
        let updated = store.update_antique_item(&update).unwrap().unwrap();

        assert_eq!(updated.price, Price::from_cents(8000));
        assert_eq!(updated.origin, None);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.material, created.material);
        assert_eq!(updated.condition, created.condition);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn test_update_antique_item_empty_is_noop() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let created = store.create_antique_item(&vase()).unwrap();
        pause();

        let update = AntiqueItemUpdate {
            id: created.id,
            ..Default::default()
        };
        let unchanged = store.update_antique_item(&update).unwrap().unwrap();
        assert_eq!(unchanged, created);
    }

    #[test]
    fn test_update_antique_item_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let update = AntiqueItemUpdate {
            id: 42,
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(store.update_antique_item(&update).unwrap().is_none());

        let empty = AntiqueItemUpdate {
            id: 42,
            ..Default::default()
        };
        assert!(store.update_antique_item(&empty).unwrap().is_none());
    }

    #[test]
    fn test_delete_leaves_other_rows() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let keep = store.create_antique_item(&vase()).unwrap();
        let drop = store.create_antique_item(&vase()).unwrap();

        assert!(!store.delete_antique_item(drop.id + 100).unwrap());
        assert!(store.delete_antique_item(drop.id).unwrap());
        assert_eq!(store.list_antique_items().unwrap(), vec![keep]);
    }

    #[test]
    fn test_gallery_ordering_breaks_ties_by_creation() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let late = store.create_gallery_image(&image("late", 5, true)).unwrap();
        let tie_a = store.create_gallery_image(&image("tie-a", 1, true)).unwrap();
        let tie_b = store.create_gallery_image(&image("tie-b", 1, false)).unwrap();
        let tie_c = store.create_gallery_image(&image("tie-c", 1, true)).unwrap();
        let first = store.create_gallery_image(&image("first", 0, false)).unwrap();

        let all: Vec<i64> = store
            .list_gallery_images()
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(all, vec![first.id, tie_a.id, tie_b.id, tie_c.id, late.id]);

        let featured: Vec<i64> = store
            .list_featured_gallery_images()
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(featured, vec![tie_a.id, tie_c.id, late.id]);
    }

    #[test]
    fn test_gallery_image_delete() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let created = store.create_gallery_image(&image("hall", 0, false)).unwrap();
        assert_eq!(created.display_order, 0);
        assert!(!created.is_featured);

        assert!(store.delete_gallery_image(created.id).unwrap());
        assert!(store.get_gallery_image(created.id).unwrap().is_none());
        assert!(!store.delete_gallery_image(created.id).unwrap());
    }

    #[test]
    fn test_duplicate_page_slug_conflicts() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_page_content(&page("about", true)).unwrap();
        let result = store.create_page_content(&page("about", false));
        assert!(matches!(result, Err(Error::Conflict(_))));

        let count: i64 = store
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM page_content WHERE page_slug = 'about'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_update_page_slug_conflicts() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        store.create_page_content(&page("about", true)).unwrap();
        let visit = store.create_page_content(&page("visit", true)).unwrap();

        let update = PageContentUpdate {
            id: visit.id,
            page_slug: Some("about".to_string()),
            ..Default::default()
        };
        let err = store.update_page_content(&update).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_published_lookup_hides_drafts() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let draft = store.create_page_content(&page("draft", false)).unwrap();

        assert!(store.get_published_page_by_slug("draft").unwrap().is_none());
        assert!(store.get_published_page_by_slug("missing").unwrap().is_none());
        assert_eq!(store.list_page_content().unwrap(), vec![draft.clone()]);

        let update = PageContentUpdate {
            id: draft.id,
            is_published: Some(true),
            ..Default::default()
        };
        store.update_page_content(&update).unwrap().unwrap();
        let live = store.get_published_page_by_slug("draft").unwrap().unwrap();
        assert!(live.is_published);
    }

    #[test]
    fn test_page_list_most_recently_updated_first() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let about = store.create_page_content(&page("about", true)).unwrap();
        pause();
        let visit = store.create_page_content(&page("visit", true)).unwrap();
        pause();

        let update = PageContentUpdate {
            id: about.id,
            title: Some("About us".to_string()),
            ..Default::default()
        };
        store.update_page_content(&update).unwrap().unwrap();

        let ids: Vec<i64> = store
            .list_page_content()
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![about.id, visit.id]);
        assert!(store.delete_page_content(visit.id).unwrap());
        assert!(!store.delete_page_content(visit.id).unwrap());
    }

    #[test]
    fn test_mark_contact_form_read_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        let form = store
            .create_contact_form(&NewContactForm {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
                subject: "Chair".to_string(),
                message: "Is it still available?".to_string(),
            })
            .unwrap();
        assert!(!form.is_read);

        let read = store.mark_contact_form_read(form.id).unwrap().unwrap();
        assert!(read.is_read);
        let again = store.mark_contact_form_read(form.id).unwrap().unwrap();
        assert_eq!(again, read);

        assert!(store.mark_contact_form_read(form.id + 1).unwrap().is_none());
        assert_eq!(store.list_contact_forms().unwrap(), vec![read.clone()]);
        assert_eq!(store.get_contact_form(form.id).unwrap(), Some(read));
    }

    #[test]
    fn test_settings_upsert_creates_then_merges() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);
        assert!(store.get_store_settings().unwrap().is_none());

        let first = store
            .upsert_store_settings(&StoreSettingsUpdate {
                store_description: Some(Some("Fine antiques".to_string())),
                address: Some(Some("1 High Street".to_string())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(first.store_name, DEFAULT_STORE_NAME);
        assert_eq!(first.contact_email, DEFAULT_CONTACT_EMAIL);
        assert_eq!(first.address.as_deref(), Some("1 High Street"));
        pause();

        let second = store
            .upsert_store_settings(&StoreSettingsUpdate {
                store_name: Some("Curios & Co".to_string()),
                address: Some(None),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.store_name, "Curios & Co");
        assert_eq!(second.store_description.as_deref(), Some("Fine antiques"));
        assert_eq!(second.address, None);
        assert!(second.updated_at > first.updated_at);

        assert_eq!(store.get_store_settings().unwrap(), Some(second));
    }

    #[test]
    fn test_settings_concurrent_first_writes_keep_one_row() {
        let temp = TempDir::new().unwrap();
        open_store(&temp);

        let writers = 8;
        let barrier = Arc::new(Barrier::new(writers));
        let stores: Vec<SqliteStore> = (0..writers)
            .map(|_| SqliteStore::new(temp.path().join("test.db")).unwrap())
            .collect();

        let handles: Vec<_> = stores
            .into_iter()
            .enumerate()
            .map(|(i, store)| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store
                        .upsert_store_settings(&StoreSettingsUpdate {
                            business_hours: Some(Some(format!("writer {i}"))),
                            ..Default::default()
                        })
                        .unwrap()
                })
            })
            .collect();

        let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap().id).collect();
        assert!(ids.iter().all(|id| *id == ids[0]));

        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        let count: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM store_settings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
