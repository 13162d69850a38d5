//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile the configuration into an immutable `GatewayRouter`
//! - Create the Axum Router: health endpoint plus proxy fallback
//! - Wire up middleware (request ID, tracing, identifying header)
//! - Bind server to listener and shut down gracefully

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, routing::get, Router};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::{validate_config, ConfigError, GatewayConfig};
use crate::http::health::{health_handler, health_method_fallback};
use crate::http::proxy::proxy_handler;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::routing::RouteTable;
use crate::security::{CredentialPolicy, GatewayHeaders};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub client: Client<HttpConnector, Body>,
    pub credentials: CredentialPolicy,
    pub headers: GatewayHeaders,
    pub upstream_timeout: Duration,
}

/// The reverse-proxy process: one per gateway, built once at startup.
pub struct GatewayRouter {
    router: Router,
    config: GatewayConfig,
    routes: Arc<RouteTable>,
}

impl GatewayRouter {
    /// Validate and compile the configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let routes = Arc::new(RouteTable::from_config(&config.routes).map_err(ConfigError::Validation)?);
        let credentials =
            CredentialPolicy::from_config(&config.auth).map_err(|e| ConfigError::Validation(vec![e]))?;
        let headers = GatewayHeaders::from_config(&config.headers).map_err(ConfigError::Validation)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            routes: routes.clone(),
            client,
            credentials,
            headers,
            upstream_timeout: Duration::from_secs(config.timeouts.upstream_secs),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            routes,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let (powered_by_name, powered_by_value) = state.headers.powered_by();

        Router::new()
            .route(
                config.health.path.as_str(),
                get(health_handler).fallback(health_method_fallback),
            )
            .fallback(proxy_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(SetResponseHeaderLayer::overriding(powered_by_name, powered_by_value)),
            )
    }

    /// The Axum router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.len(),
            health_path = %self.config.health.path,
            "Gateway listening"
        );
        for route in self.routes.routes() {
            tracing::info!(
                route = route.name(),
                prefix = route.prefix(),
                upstream = %route.upstream().base_url(),
                auth_required = route.auth_required(),
                "Route available"
            );
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
