//! Upstream base URL.
//!
//! # Responsibilities
//! - Parse and validate the configured upstream URL once at startup
//! - Provide the authority used for the forwarded `Host` header
//! - Join the upstream base path with the (rewritten) request path

use axum::http::uri::InvalidUri;
use axum::http::{HeaderValue, Uri};
use url::Url;

/// A parsed upstream base URL (plain HTTP only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    /// Pre-parsed base URL, kept for logging.
    base_url: Url,
    /// `host[:port]`, port omitted when it is the scheme default.
    authority: String,
    /// `Host` header value for forwarded requests.
    host_header: HeaderValue,
    /// Base path without trailing slash (empty for the root).
    base_path: String,
}

impl Upstream {
    /// Parse an upstream base URL. The error is a human-readable reason.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let base_url = Url::parse(raw).map_err(|e| e.to_string())?;

        if base_url.scheme() != "http" {
            return Err(format!("unsupported scheme '{}', only http is supported", base_url.scheme()));
        }
        let host = base_url
            .host_str()
            .ok_or_else(|| "missing host".to_string())?;
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err("query and fragment are not allowed".to_string());
        }

        let authority = match base_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let host_header = HeaderValue::from_str(&authority).map_err(|e| e.to_string())?;
        let base_path = base_url.path().trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            authority,
            host_header,
            base_path,
        })
    }

    /// The authority the forwarded request is addressed to.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn host_header(&self) -> &HeaderValue {
        &self.host_header
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the absolute URI for a request path and optional query.
    pub fn target(&self, path: &str, query: Option<&str>) -> Result<Uri, InvalidUri> {
        let mut target = format!("http://{}{}{}", self.authority, self.base_path, path);
        if let Some(query) = query {
            target.push('?');
            target.push_str(query);
        }
        target.parse()
    }
}
