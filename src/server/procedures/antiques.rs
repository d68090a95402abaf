use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::rpc::{RpcMutation, RpcQuery};
use crate::types::{AntiqueItemUpdate, IdInput, NewAntiqueItem};

pub async fn create_antique_item(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<NewAntiqueItem>,
) -> impl IntoResponse {
    let item = state
        .store
        .create_antique_item(&input)
        .api_err("createAntiqueItem")?;

    tracing::debug!(id = item.id, "created antique item");

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

pub async fn get_antique_items(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let items = state.store.list_antique_items().api_err("getAntiqueItems")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(items)))
}

pub async fn get_antique_item_by_id(
    State(state): State<Arc<AppState>>,
    RpcQuery(input): RpcQuery<IdInput>,
) -> impl IntoResponse {
    let item = state
        .store
        .get_antique_item(input.id)
        .api_err("getAntiqueItemById")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(item)))
}

pub async fn update_antique_item(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<AntiqueItemUpdate>,
) -> impl IntoResponse {
    let item = state
        .store
        .update_antique_item(&input)
        .api_err("updateAntiqueItem")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(item)))
}

pub async fn delete_antique_item(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<IdInput>,
) -> impl IntoResponse {
    let deleted = state
        .store
        .delete_antique_item(input.id)
        .api_err("deleteAntiqueItem")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(deleted)))
}
