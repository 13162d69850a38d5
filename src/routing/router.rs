//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Longest prefix wins; ties keep declaration order
//! - Explicit NoMatch rather than silent default

use axum::http::uri::InvalidUri;
use axum::http::Uri;

use crate::config::{RouteConfig, ValidationError};
use crate::routing::matcher::PathPrefixMatcher;
use crate::routing::rewrite::PathRewrite;
use crate::routing::upstream::Upstream;

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    matcher: PathPrefixMatcher,
    upstream: Upstream,
    auth_required: bool,
    rewrite: Option<PathRewrite>,
}

impl Route {
    /// Compile a route from its configuration, reporting every problem found.
    pub fn compile(config: &RouteConfig) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !config.path_prefix.starts_with('/') {
            errors.push(ValidationError::InvalidPrefix {
                route: config.name.clone(),
                prefix: config.path_prefix.clone(),
            });
        }

        let upstream = Upstream::parse(&config.upstream)
            .map_err(|reason| {
                errors.push(ValidationError::InvalidUpstream {
                    route: config.name.clone(),
                    upstream: config.upstream.clone(),
                    reason,
                })
            })
            .ok();

        let rewrite = PathRewrite::compile(&config.path_rewrite)
            .map_err(|(pattern, e)| {
                errors.push(ValidationError::InvalidRewrite {
                    route: config.name.clone(),
                    pattern,
                    reason: e.to_string(),
                })
            })
            .ok();

        match (upstream, rewrite) {
            (Some(upstream), Some(rewrite)) if errors.is_empty() => Ok(Self {
                name: config.name.clone(),
                matcher: PathPrefixMatcher::new(config.path_prefix.as_str()),
                upstream,
                auth_required: config.auth_required,
                rewrite,
            }),
            _ => Err(errors),
        }
    }

    /// Route identifier for logging/metrics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized path prefix.
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn upstream(&self) -> &Upstream {
        &self.upstream
    }

    pub fn auth_required(&self) -> bool {
        self.auth_required
    }

    /// Returns true if this route serves `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    /// Compute the upstream URI for an inbound request URI, applying the
    /// rewrite rules to the path and keeping the query string.
    pub fn upstream_uri(&self, inbound: &Uri) -> Result<Uri, InvalidUri> {
        let path = inbound.path();
        let path = match &self.rewrite {
            Some(rewrite) => rewrite.apply(path),
            None => path.into(),
        };
        self.upstream.target(&path, inbound.query())
    }
}

/// Immutable prefix route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// Sorted by prefix length, longest first.
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile every configured route.
    pub fn from_config(configs: &[RouteConfig]) -> Result<Self, Vec<ValidationError>> {
        let mut routes = Vec::with_capacity(configs.len());
        let mut errors = Vec::new();

        for config in configs {
            match Route::compile(config) {
                Ok(route) => routes.push(route),
                Err(mut e) => errors.append(&mut e),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Stable sort keeps declaration order among equal lengths.
        routes.sort_by(|a, b| b.prefix().len().cmp(&a.prefix().len()));

        Ok(Self { routes })
    }

    /// Find the route for a request path.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GatewayConfig, RewriteRuleConfig};

    fn route(name: &str, prefix: &str, upstream: &str) -> RouteConfig {
        RouteConfig {
            name: name.to_string(),
            path_prefix: prefix.to_string(),
            upstream: upstream.to_string(),
            auth_required: false,
            path_rewrite: Vec::new(),
        }
    }

    #[test]
    fn default_routes_dispatch() {
        let table = RouteTable::from_config(&GatewayConfig::default().routes).unwrap();
        assert_eq!(table.len(), 3);

        let auth = table.match_path("/auth/login").unwrap();
        assert_eq!(auth.name(), "auth");
        assert!(auth.auth_required());

        let users = table.match_path("/users").unwrap();
        assert_eq!(users.name(), "users");
        assert!(users.auth_required());

        let products = table.match_path("/products/42").unwrap();
        assert_eq!(products.name(), "products");
        assert!(!products.auth_required());

        assert!(table.match_path("/does-not-exist").is_none());
        assert!(table.match_path("/authority").is_none());
    }

    #[test]
    fn longest_prefix_wins() {
        let table = RouteTable::from_config(&[
            route("catch-all", "/", "http://127.0.0.1:1"),
            route("api", "/api", "http://127.0.0.1:2"),
            route("api-admin", "/api/admin", "http://127.0.0.1:3"),
        ])
        .unwrap();

        assert_eq!(table.match_path("/api/admin/users").unwrap().name(), "api-admin");
        assert_eq!(table.match_path("/api/items").unwrap().name(), "api");
        assert_eq!(table.match_path("/other").unwrap().name(), "catch-all");
    }

    #[test]
    fn auth_route_strips_prefix() {
        let table = RouteTable::from_config(&GatewayConfig::default().routes).unwrap();
        let auth = table.match_path("/auth").unwrap();

        let uri: Uri = "/auth?next=%2Fhome".parse().unwrap();
        assert_eq!(
            auth.upstream_uri(&uri).unwrap(),
            "http://localhost:8000/?next=%2Fhome"
        );
    }

    #[test]
    fn route_without_rewrite_keeps_path() {
        let table = RouteTable::from_config(&GatewayConfig::default().routes).unwrap();
        let users = table.match_path("/users/7").unwrap();

        let uri: Uri = "/users/7".parse().unwrap();
        assert_eq!(users.upstream_uri(&uri).unwrap(), "http://localhost:8001/users/7");
    }

    #[test]
    fn compile_collects_all_route_errors() {
        let mut bad = route("bad", "bad", "https://127.0.0.1:1");
        bad.path_rewrite.push(RewriteRuleConfig {
            pattern: "[".to_string(),
            replacement: String::new(),
        });

        let errors = Route::compile(&bad).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
