//! Proxy handler: route, gate, rewrite, forward, relay.
//!
//! # Responsibilities
//! - Match the request path against the route table
//! - Enforce the credential policy before anything leaves the gateway
//! - Forward to the upstream with rewritten path and headers
//! - Relay the upstream response, or map the failure to the error envelope
//!
//! # Design Decisions
//! - No retries: one upstream failure is one 500
//! - Response head is only sent once upstream headers arrived; a failure
//!   while streaming the body terminates the client connection
//! - Dropping the handler future (client gone) drops the upstream call

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::Version,
    response::{IntoResponse, Response},
};

use crate::error::GatewayError;
use crate::http::request::request_id;
use crate::http::response::timestamp_header_value;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::Route;
use crate::security::headers::{prepare_upstream_headers, strip_hop_by_hop};

/// Fallback handler for every path other than the health endpoint.
pub async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers()).to_string();

    let Some(route) = state.routes.match_path(&path) else {
        tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
        metrics::record_request(method.as_str(), 404, "none", start_time);
        return GatewayError::RouteNotFound.into_response();
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route.name(),
        "Proxying request"
    );

    let response = match forward(&state, route, request).await {
        Ok(response) => response,
        Err(err) => {
            match &err {
                GatewayError::Unauthenticated { .. } => {
                    tracing::warn!(request_id = %request_id, route = route.name(), "Credential header missing");
                    metrics::record_auth_rejected(route.name());
                }
                GatewayError::UpstreamUnavailable { source, .. } => {
                    tracing::error!(
                        request_id = %request_id,
                        route = route.name(),
                        upstream = %route.upstream().base_url(),
                        error = %err,
                        cause = ?source,
                        "Upstream error"
                    );
                    metrics::record_upstream_failure(route.name());
                }
                GatewayError::RouteNotFound => {}
            }
            err.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), route.name(), start_time);
    response
}

async fn forward(state: &AppState, route: &Route, request: Request) -> Result<Response, GatewayError> {
    if route.auth_required() && !state.credentials.is_satisfied(request.headers()) {
        return Err(GatewayError::unauthenticated(route.name()));
    }

    let client_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let (mut parts, body) = request.into_parts();

    parts.uri = route
        .upstream_uri(&parts.uri)
        .map_err(|e| GatewayError::upstream(route.name(), e))?;
    parts.version = Version::HTTP_11;
    parts.extensions.clear();

    prepare_upstream_headers(&mut parts.headers, route.upstream().host_header(), client_addr);
    let dispatched_at = timestamp_header_value();
    parts
        .headers
        .insert(state.headers.timestamp_name().clone(), dispatched_at.clone());

    tracing::trace!(target_uri = %parts.uri, "Dispatching upstream request");

    let upstream_request = Request::from_parts(parts, body);
    let upstream_response = tokio::time::timeout(state.upstream_timeout, state.client.request(upstream_request))
        .await
        .map_err(|elapsed| GatewayError::upstream(route.name(), elapsed))?
        .map_err(|e| GatewayError::upstream(route.name(), e))?;

    let (mut parts, body) = upstream_response.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    parts
        .headers
        .insert(state.headers.timestamp_name().clone(), dispatched_at);

    Ok(Response::from_parts(parts, Body::new(body)))
}
