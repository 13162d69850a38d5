//! Header manipulation for proxied traffic.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers in both directions
//! - Point `Host` at the upstream and add X-Forwarded-For/Host/Proto
//! - Hold the gateway's own identifying and timestamp header names
//!
//! # Design Decisions
//! - Preserve original client IP chain in X-Forwarded-For
//! - X-Forwarded-Host and X-Forwarded-Proto are always set by the gateway,
//!   never taken from the client
//! - Headers named in `Connection` are hop-by-hop as well

use std::net::SocketAddr;

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::config::{HeaderConfig, ValidationError};

/// Headers meaningful only for a single transport hop.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
pub const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Compiled names and values of the headers the gateway stamps.
#[derive(Debug, Clone)]
pub struct GatewayHeaders {
    powered_by_name: HeaderName,
    powered_by_value: HeaderValue,
    timestamp_name: HeaderName,
}

impl GatewayHeaders {
    pub fn from_config(config: &HeaderConfig) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let powered_by_name = parse_name(&config.powered_by_name, &mut errors);
        let timestamp_name = parse_name(&config.timestamp_name, &mut errors);
        let powered_by_value = HeaderValue::from_str(&config.powered_by_value)
            .map_err(|_| {
                errors.push(ValidationError::InvalidHeaderValue(
                    config.powered_by_name.clone(),
                ))
            })
            .ok();

        match (powered_by_name, powered_by_value, timestamp_name) {
            (Some(powered_by_name), Some(powered_by_value), Some(timestamp_name)) => Ok(Self {
                powered_by_name,
                powered_by_value,
                timestamp_name,
            }),
            _ => Err(errors),
        }
    }

    /// The static identifying header carried by every response.
    pub fn powered_by(&self) -> (HeaderName, HeaderValue) {
        (self.powered_by_name.clone(), self.powered_by_value.clone())
    }

    /// Name of the dispatch timestamp header.
    pub fn timestamp_name(&self) -> &HeaderName {
        &self.timestamp_name
    }
}

impl Default for GatewayHeaders {
    fn default() -> Self {
        Self {
            powered_by_name: HeaderName::from_static("x-powered-by"),
            powered_by_value: HeaderValue::from_static("Reverse Proxy"),
            timestamp_name: HeaderName::from_static("x-proxy-timestamp"),
        }
    }
}

fn parse_name(raw: &str, errors: &mut Vec<ValidationError>) -> Option<HeaderName> {
    HeaderName::from_bytes(raw.as_bytes())
        .map_err(|_| errors.push(ValidationError::InvalidHeaderName(raw.to_string())))
        .ok()
}

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

/// Rewrite inbound request headers for forwarding to an upstream.
pub fn prepare_upstream_headers(
    headers: &mut HeaderMap,
    upstream_host: &HeaderValue,
    client: Option<SocketAddr>,
) {
    strip_hop_by_hop(headers);

    match headers.get(header::HOST).cloned() {
        Some(original_host) => {
            headers.insert(X_FORWARDED_HOST, original_host);
        }
        None => {
            headers.remove(X_FORWARDED_HOST);
        }
    }
    headers.insert(header::HOST, upstream_host.clone());

    if let Some(client) = client {
        let ip = client.ip().to_string();
        let forwarded_for = match headers.get(X_FORWARDED_FOR) {
            Some(existing) => {
                let mut chain = existing.as_bytes().to_vec();
                chain.extend_from_slice(b", ");
                chain.extend_from_slice(ip.as_bytes());
                HeaderValue::from_bytes(&chain).ok()
            }
            None => HeaderValue::from_str(&ip).ok(),
        };
        if let Some(value) = forwarded_for {
            headers.insert(X_FORWARDED_FOR, value);
        }
    }

    headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("http"));
}
