//! # Antiquarian
//!
//! Catalog and content backend for a small antique storefront, usable both as
//! a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! antiquarian = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use antiquarian::server::{AppState, create_router};
//! use antiquarian::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/antiquarian.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store)));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `antiquarian` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
