//! Procedure input extractors.
//!
//! Queries carry their input as URL-encoded JSON in `?input=`, mutations as a
//! JSON body. Both reject with a 400 before the handler runs when the input
//! is not JSON, or when any field is missing, mistyped or breaks a rule.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::Deserialize;
use serde_json::Value;

use super::response::ApiError;
use crate::types::{FromFields, parse_input};

#[derive(Debug, Deserialize)]
struct InputParam {
    input: Option<String>,
}

/// Validated input of a query procedure.
pub struct RpcQuery<T>(pub T);

/// Validated input of a mutation procedure.
pub struct RpcMutation<T>(pub T);

impl<S, T> FromRequestParts<S> for RpcQuery<T>
where
    S: Send + Sync,
    T: FromFields + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(param) = Query::<InputParam>::try_from_uri(&parts.uri)
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;

        // A missing input reads as `null`, which only input-less shapes accept.
        let value = match param.input.as_deref() {
            Some(raw) => {
                serde_json::from_str(raw).map_err(|e| ApiError::invalid_input(e.to_string()))?
            }
            None => Value::Null,
        };

        Ok(Self(parse_input(value)?))
    }
}

impl<S, T> FromRequest<S> for RpcMutation<T>
where
    S: Send + Sync,
    T: FromFields + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;

        Ok(Self(parse_input(value)?))
    }
}
