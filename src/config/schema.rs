//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route definitions mapping path prefixes to upstreams.
    pub routes: Vec<RouteConfig>,

    /// Health endpoint settings.
    pub health: HealthConfig,

    /// Credential header used by protected routes.
    pub auth: AuthConfig,

    /// Diagnostic headers stamped by the gateway.
    pub headers: HeaderConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            health: HealthConfig::default(),
            auth: AuthConfig::default(),
            headers: HeaderConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// The three local services the gateway fronts out of the box.
fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            name: "auth".to_string(),
            path_prefix: "/auth".to_string(),
            upstream: "http://localhost:8000".to_string(),
            auth_required: true,
            path_rewrite: vec![RewriteRuleConfig {
                pattern: "^/auth".to_string(),
                replacement: String::new(),
            }],
        },
        RouteConfig {
            name: "users".to_string(),
            path_prefix: "/users".to_string(),
            upstream: "http://localhost:8001".to_string(),
            auth_required: true,
            path_rewrite: Vec::new(),
        },
        RouteConfig {
            name: "products".to_string(),
            path_prefix: "/products".to_string(),
            upstream: "http://localhost:8002".to_string(),
            auth_required: false,
            path_rewrite: Vec::new(),
        },
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address as a literal `ip:port` (e.g., "0.0.0.0:3000").
    ///
    /// Host names such as `localhost:3000` are not resolved and fail
    /// validation.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Route configuration mapping a path prefix to an upstream base URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Path prefix to match (segment aware).
    pub path_prefix: String,

    /// Upstream base URL (e.g., "http://localhost:8000").
    pub upstream: String,

    /// Reject requests lacking the credential header.
    #[serde(default)]
    pub auth_required: bool,

    /// Ordered rewrite rules; the first matching rule wins.
    #[serde(default)]
    pub path_rewrite: Vec<RewriteRuleConfig>,
}

/// A single regex-based path rewrite.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteRuleConfig {
    /// Regular expression matched against the request path.
    pub pattern: String,

    /// Replacement text; `$1`-style capture references are expanded.
    #[serde(default)]
    pub replacement: String,
}

/// Health endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Exact path answered by the gateway itself.
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
        }
    }
}

/// Credential header configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Header whose presence gates protected routes.
    pub header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: "authorization".to_string(),
        }
    }
}

/// Headers the gateway adds to traffic.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Name of the static identifying response header.
    pub powered_by_name: String,

    /// Constant value of the identifying header.
    pub powered_by_value: String,

    /// Name of the dispatch timestamp header.
    pub timestamp_name: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            powered_by_name: "x-powered-by".to_string(),
            powered_by_value: "Reverse Proxy".to_string(),
            timestamp_name: "x-proxy-timestamp".to_string(),
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed for the upstream to return response headers, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
