//! Response bodies produced by the gateway itself.
//!
//! # Responsibilities
//! - Health payload and error envelopes
//! - ISO-8601 timestamps shared by headers and bodies
//!
//! # Design Decisions
//! - Upstream responses are streamed through untouched apart from headers
//! - Error envelopes carry fixed messages; upstream detail stays in logs

use axum::http::HeaderValue;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Body of the 401 response on protected routes.
pub const CREDENTIAL_MISSING_MESSAGE: &str = "Authentication token required";

/// Body of the 500 response on upstream failure.
pub const PROCESSING_FAILURE_MESSAGE: &str = "Error processing the request";

/// Current UTC time, e.g. `2024-05-01T12:30:00.123Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC time as a header value.
pub fn timestamp_header_value() -> HeaderValue {
    // RFC 3339 output is plain visible ASCII.
    HeaderValue::from_str(&iso_timestamp()).unwrap_or(HeaderValue::from_static(""))
}

/// Error envelope: `{ "error": ..., "timestamp"?: ... }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Health payload: `{ "status": "OK", "timestamp": ... }`.
#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthPayload {
    pub fn ok() -> Self {
        Self {
            status: "OK",
            timestamp: iso_timestamp(),
        }
    }
}
