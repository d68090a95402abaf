use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::rpc::RpcMutation;
use crate::types::StoreSettingsUpdate;

pub async fn get_store_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let settings = state
        .store
        .get_store_settings()
        .api_err("getStoreSettings")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(settings)))
}

/// Creates the settings row on first use, merges into it afterwards.
pub async fn update_store_settings(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<StoreSettingsUpdate>,
) -> impl IntoResponse {
    let settings = state
        .store
        .upsert_store_settings(&input)
        .api_err("updateStoreSettings")?;

    tracing::info!("store settings updated");

    Ok::<_, ApiError>(Json(ApiResponse::success(settings)))
}
