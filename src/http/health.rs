//! Health endpoint, answered by the gateway without touching any upstream.

use axum::Json;

use crate::error::GatewayError;
use crate::http::response::HealthPayload;

/// `GET <health path>` → `200 {"status":"OK","timestamp":...}`.
pub async fn health_handler() -> Json<HealthPayload> {
    Json(HealthPayload::ok())
}

/// Any other method on the health path is not routed.
pub async fn health_method_fallback() -> GatewayError {
    GatewayError::RouteNotFound
}
