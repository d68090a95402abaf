use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::rpc::{RpcMutation, RpcQuery};
use crate::types::{IdInput, NewPageContent, PageContentUpdate, SlugInput};

pub async fn create_page_content(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<NewPageContent>,
) -> impl IntoResponse {
    let page = state
        .store
        .create_page_content(&input)
        .api_err("createPageContent")?;

    tracing::debug!(id = page.id, slug = %page.page_slug, "created page");

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(page))))
}

/// Public lookup; drafts read as not found.
pub async fn get_page_content_by_slug(
    State(state): State<Arc<AppState>>,
    RpcQuery(input): RpcQuery<SlugInput>,
) -> impl IntoResponse {
    let page = state
        .store
        .get_published_page_by_slug(&input.slug)
        .api_err("getPageContentBySlug")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(page)))
}

pub async fn get_all_page_content(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pages = state
        .store
        .list_page_content()
        .api_err("getAllPageContent")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(pages)))
}

pub async fn get_page_content_by_id(
    State(state): State<Arc<AppState>>,
    RpcQuery(input): RpcQuery<IdInput>,
) -> impl IntoResponse {
    let page = state
        .store
        .get_page_content(input.id)
        .api_err("getPageContentById")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(page)))
}

pub async fn update_page_content(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<PageContentUpdate>,
) -> impl IntoResponse {
    let page = state
        .store
        .update_page_content(&input)
        .api_err("updatePageContent")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(page)))
}

pub async fn delete_page_content(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<IdInput>,
) -> impl IntoResponse {
    let deleted = state
        .store
        .delete_page_content(input.id)
        .api_err("deletePageContent")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(deleted)))
}
