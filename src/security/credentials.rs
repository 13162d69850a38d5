//! Credential presence policy for protected routes.
//!
//! # Known limitation
//! This is a presence check, not authentication. Any non-blank header value
//! is accepted; the token is never parsed, verified or forwarded anywhere
//! other than the upstream itself. Upstreams must verify credentials.

use axum::http::{HeaderMap, HeaderName};

use crate::config::{AuthConfig, ValidationError};

/// Checks that a protected request carries a credential header.
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    header: HeaderName,
}

impl CredentialPolicy {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, ValidationError> {
        HeaderName::from_bytes(config.header.as_bytes())
            .map(Self::new)
            .map_err(|_| ValidationError::InvalidHeaderName(config.header.clone()))
    }

    /// The header inspected by this policy.
    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Returns true when the header is present with a non-blank value.
    pub fn is_satisfied(&self, headers: &HeaderMap) -> bool {
        headers
            .get_all(&self.header)
            .iter()
            .any(|value| value.as_bytes().iter().any(|b| !b.is_ascii_whitespace()))
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::new(axum::http::header::AUTHORIZATION)
    }
}
