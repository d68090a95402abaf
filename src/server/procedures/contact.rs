use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::server::rpc::{RpcMutation, RpcQuery};
use crate::types::{IdInput, NewContactForm};

pub async fn create_contact_form(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<NewContactForm>,
) -> impl IntoResponse {
    let form = state
        .store
        .create_contact_form(&input)
        .api_err("createContactForm")?;

    tracing::info!(id = form.id, "received contact form");

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(form))))
}

pub async fn get_contact_forms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let forms = state
        .store
        .list_contact_forms()
        .api_err("getContactForms")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(forms)))
}

pub async fn get_contact_form_by_id(
    State(state): State<Arc<AppState>>,
    RpcQuery(input): RpcQuery<IdInput>,
) -> impl IntoResponse {
    let form = state
        .store
        .get_contact_form(input.id)
        .api_err("getContactFormById")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(form)))
}

pub async fn mark_contact_form_read(
    State(state): State<Arc<AppState>>,
    RpcMutation(input): RpcMutation<IdInput>,
) -> impl IntoResponse {
    let form = state
        .store
        .mark_contact_form_read(input.id)
        .api_err("markContactFormRead")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(form)))
}
