//! Gateway error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::response::{
    iso_timestamp, ErrorBody, CREDENTIAL_MISSING_MESSAGE, PROCESSING_FAILURE_MESSAGE,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced to callers of the gateway.
///
/// The `Display` output is for server-side logs only; clients receive the
/// fixed messages of the response envelope.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Protected route, credential header missing or blank.
    #[error("credential header missing for route '{route}'")]
    Unauthenticated { route: String },

    /// No route prefix matches the request path.
    #[error("no route matches the request path")]
    RouteNotFound,

    /// Connect, transport or timeout failure talking to the upstream.
    #[error("upstream for route '{route}' unavailable: {source}")]
    UpstreamUnavailable {
        route: String,
        #[source]
        source: BoxError,
    },
}

impl GatewayError {
    pub fn unauthenticated(route: &str) -> Self {
        Self::Unauthenticated {
            route: route.to_string(),
        }
    }

    pub fn upstream(route: &str, source: impl Into<BoxError>) -> Self {
        Self::UpstreamUnavailable {
            route: route.to_string(),
            source: source.into(),
        }
    }

    /// Status code sent to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::UpstreamUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            GatewayError::Unauthenticated { .. } => (
                status,
                Json(ErrorBody {
                    error: CREDENTIAL_MISSING_MESSAGE,
                    timestamp: None,
                }),
            )
                .into_response(),
            GatewayError::RouteNotFound => status.into_response(),
            GatewayError::UpstreamUnavailable { .. } => (
                status,
                Json(ErrorBody {
                    error: PROCESSING_FAILURE_MESSAGE,
                    timestamp: Some(iso_timestamp()),
                }),
            )
                .into_response(),
        }
    }
}
