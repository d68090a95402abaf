use axum::{Json, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub async fn healthcheck() -> impl IntoResponse {
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        timestamp: Utc::now(),
    }))
}
