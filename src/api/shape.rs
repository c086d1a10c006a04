// src/api/shape.rs
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Decode a response body into its data contract, or fail naming the endpoint.
pub fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| {
        loge!("Shape mismatch on {endpoint}: {e}");
        ApiError::Shape {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        }
    })
}
