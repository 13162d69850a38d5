//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every route exactly as the runtime will, surfacing bad
//!   prefixes, upstream URLs and rewrite patterns
//! - Detect conflicting route names and prefixes
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;
use crate::routing::Route;
use crate::security::{CredentialPolicy, GatewayHeaders};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("health path '{0}' must start with '/' and contain no wildcards or parameters")]
    InvalidHealthPath(String),

    #[error("invalid log level '{0}', expected trace, debug, info, warn or error")]
    InvalidLogLevel(String),

    #[error("route name must not be empty")]
    EmptyRouteName,

    #[error("route name '{0}' is used more than once")]
    DuplicateRouteName(String),

    #[error("route '{route}': path prefix '{prefix}' must start with '/'")]
    InvalidPrefix { route: String, prefix: String },

    #[error("path prefix '{0}' is used by more than one route")]
    DuplicatePrefix(String),

    #[error("route '{route}': invalid upstream '{upstream}': {reason}")]
    InvalidUpstream {
        route: String,
        upstream: String,
        reason: String,
    },

    #[error("route '{route}': invalid rewrite pattern '{pattern}': {reason}")]
    InvalidRewrite {
        route: String,
        pattern: String,
        reason: String,
    },

    #[error("invalid header name '{0}'")]
    InvalidHeaderName(String),

    #[error("invalid value for header '{0}'")]
    InvalidHeaderValue(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if !is_valid_health_path(&config.health.path) {
        errors.push(ValidationError::InvalidHealthPath(config.health.path.clone()));
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut names = HashSet::new();
    let mut prefixes = HashSet::new();
    for route_config in &config.routes {
        if route_config.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName);
        } else if !names.insert(route_config.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route_config.name.clone()));
        }

        match Route::compile(route_config) {
            Ok(route) => {
                if !prefixes.insert(route.prefix().to_string()) {
                    errors.push(ValidationError::DuplicatePrefix(route.prefix().to_string()));
                }
            }
            Err(mut route_errors) => errors.append(&mut route_errors),
        }
    }

    if let Err(e) = CredentialPolicy::from_config(&config.auth) {
        errors.push(e);
    }
    if let Err(mut header_errors) = GatewayHeaders::from_config(&config.headers) {
        errors.append(&mut header_errors);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.upstream_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Health paths are registered as literal axum routes; axum panics on
/// capture syntax (`{id}`, `*rest`, legacy `:id`).
fn is_valid_health_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['{', '}', '*', '?'])
        && !path.split('/').any(|segment| segment.starts_with(':'))
}
