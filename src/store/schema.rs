pub const SCHEMA: &str = r#"
-- Catalog listings
CREATE TABLE IF NOT EXISTS antique_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    year INTEGER,                 -- NULL = unknown
    origin TEXT,
    price TEXT NOT NULL,          -- fixed-point, two fractional digits
    availability_status TEXT NOT NULL DEFAULT 'available'
        CHECK (availability_status IN ('available', 'sold', 'reserved')),
    category TEXT NOT NULL,
    condition TEXT NOT NULL
        CHECK (condition IN ('excellent', 'very_good', 'good', 'fair', 'needs_restoration')),
    dimensions TEXT,
    material TEXT,
    main_image_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Gallery images (write-once)
CREATE TABLE IF NOT EXISTS gallery_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    image_url TEXT NOT NULL,
    alt_text TEXT,
    display_order INTEGER NOT NULL DEFAULT 0 CHECK (display_order >= 0),
    is_featured INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

-- CMS pages addressed by slug
CREATE TABLE IF NOT EXISTS page_content (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    meta_description TEXT,
    is_published INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Inbound contact messages
CREATE TABLE IF NOT EXISTS contact_forms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    subject TEXT NOT NULL,
    message TEXT NOT NULL,
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

-- Store-wide settings; the sentinel column caps the table at one row
CREATE TABLE IF NOT EXISTS store_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    singleton INTEGER NOT NULL DEFAULT 1 UNIQUE CHECK (singleton = 1),
    store_name TEXT NOT NULL,
    store_description TEXT,
    contact_email TEXT NOT NULL,
    contact_phone TEXT,
    address TEXT,
    business_hours TEXT,
    google_maps_embed_url TEXT,
    social_facebook TEXT,
    social_instagram TEXT,
    social_twitter TEXT,
    updated_at TEXT NOT NULL
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_antique_items_created ON antique_items(created_at);
CREATE INDEX IF NOT EXISTS idx_gallery_images_order ON gallery_images(display_order, created_at);
CREATE INDEX IF NOT EXISTS idx_page_content_updated ON page_content(updated_at);
CREATE INDEX IF NOT EXISTS idx_contact_forms_created ON contact_forms(created_at);
"#;
