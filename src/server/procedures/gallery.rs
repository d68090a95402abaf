use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::rpc::{RpcMutation, RpcQuery};
use crate::types::{IdInput, NewGalleryImage};

pub async fn create_gallery_image(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<NewGalleryImage>,
) -> impl IntoResponse {
    let image = state
        .store
        .create_gallery_image(&input)
        .api_err("createGalleryImage")?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(image))))
}

pub async fn get_gallery_images(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let images = state
        .store
        .list_gallery_images()
        .api_err("getGalleryImages")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(images)))
}

pub async fn get_featured_gallery_images(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let images = state
        .store
        .list_featured_gallery_images()
        .api_err("getFeaturedGalleryImages")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(images)))
}

pub async fn get_gallery_image_by_id(
    State(state): State<Arc<AppState>>,
    RpcQuery(input): RpcQuery<IdInput>,
) -> impl IntoResponse {
    let image = state
        .store
        .get_gallery_image(input.id)
        .api_err("getGalleryImageById")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(image)))
}

pub async fn delete_gallery_image(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<IdInput>,
) -> impl IntoResponse {
    let deleted = state
        .store
        .delete_gallery_image(input.id)
        .api_err("deleteGalleryImage")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(deleted)))
}
