//! One route per named procedure. Reads are `GET` queries, writes are `POST`
//! mutations; every handler maps to exactly one store call.

mod antiques;
mod contact;
mod gallery;
mod health;
mod pages;
mod settings;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn rpc_router() -> Router<Arc<AppState>> {
    Router::new()
        // Antique item procedures
        .route("/createAntiqueItem", post(antiques::create_antique_item))
        .route("/getAntiqueItems", get(antiques::get_antique_items))
        .route("/getAntiqueItemById", get(antiques::get_antique_item_by_id))
        .route("/updateAntiqueItem", post(antiques::update_antique_item))
        .route("/deleteAntiqueItem", post(antiques::delete_antique_item))
        // Gallery procedures
        .route("/createGalleryImage", post(gallery::create_gallery_image))
        .route("/getGalleryImages", get(gallery::get_gallery_images))
        .route(
            "/getFeaturedGalleryImages",
            get(gallery::get_featured_gallery_images),
        )
        .route("/getGalleryImageById", get(gallery::get_gallery_image_by_id))
        .route("/deleteGalleryImage", post(gallery::delete_gallery_image))
        // Page content procedures
        .route("/createPageContent", post(pages::create_page_content))
        .route("/getPageContentBySlug", get(pages::get_page_content_by_slug))
        .route("/getAllPageContent", get(pages::get_all_page_content))
        .route("/getPageContentById", get(pages::get_page_content_by_id))
        .route("/updatePageContent", post(pages::update_page_content))
        .route("/deletePageContent", post(pages::delete_page_content))
        // Contact form procedures
        .route("/createContactForm", post(contact::create_contact_form))
        .route("/getContactForms", get(contact::get_contact_forms))
        .route("/getContactFormById", get(contact::get_contact_form_by_id))
        .route("/markContactFormRead", post(contact::mark_contact_form_read))
        // Store settings procedures
        .route("/getStoreSettings", get(settings::get_store_settings))
        .route("/updateStoreSettings", post(settings::update_store_settings))
        .route("/healthcheck", get(health::healthcheck))
}
