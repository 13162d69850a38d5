//! Shared utilities for gateway integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use gateway_router::config::GatewayConfig;
use gateway_router::{GatewayRouter, Shutdown};

/// What a stub upstream observed for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct StubState {
    service: &'static str,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    cancelled: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// Counts handler futures dropped before they finished.
struct CancelGuard {
    armed: bool,
    cancelled: Arc<AtomicUsize>,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if self.armed {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// An upstream answering every path with `{"service": <name>}`.
///
/// Paths ending in `/teapot` answer 418 with an `x-upstream` header instead.
pub struct StubUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    cancelled: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StubUpstream {
    pub async fn start(service: &'static str) -> Self {
        Self::start_with_delay(service, Duration::ZERO).await
    }

    pub async fn start_with_delay(service: &'static str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = StubState {
            service,
            delay,
            hits: Arc::new(AtomicUsize::new(0)),
            cancelled: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let hits = state.hits.clone();
        let cancelled = state.cancelled.clone();
        let seen = state.seen.clone();

        let app = Router::new().fallback(stub_handler).with_state(state);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await;
        });

        Self {
            addr,
            hits,
            cancelled,
            seen,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Requests whose handler was dropped mid-flight (connection closed).
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.seen.lock().unwrap().last().cloned()
    }

    /// Close the listener and every open connection.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

async fn stub_handler(State(state): State<StubState>, request: Request) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    state.seen.lock().unwrap().push(SeenRequest {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        headers: parts.headers,
        body: body.to_vec(),
    });

    if !state.delay.is_zero() {
        let mut guard = CancelGuard {
            armed: true,
            cancelled: state.cancelled.clone(),
        };
        tokio::time::sleep(state.delay).await;
        guard.armed = false;
    }

    if parts.uri.path().ends_with("/teapot") {
        return (
            StatusCode::IM_A_TEAPOT,
            [("x-upstream", state.service)],
            Json(json!({ "service": state.service, "teapot": true })),
        )
            .into_response();
    }

    Json(json!({ "service": state.service })).into_response()
}

/// Default routes pointed at the given auth/users/products upstreams.
pub fn gateway_config(auth: &str, users: &str, products: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    for route in &mut config.routes {
        route.upstream = match route.name.as_str() {
            "auth" => auth.to_string(),
            "users" => users.to_string(),
            _ => products.to_string(),
        };
    }
    config
}

/// A gateway served on an ephemeral port; stops when dropped.
pub struct RunningGateway {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

impl RunningGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start_gateway(config: GatewayConfig) -> RunningGateway {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let gateway = GatewayRouter::new(config).expect("valid gateway config");
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = gateway.run(listener, server_shutdown).await;
    });

    RunningGateway {
        addr,
        _shutdown: shutdown,
    }
}

/// The three stub upstreams behind a running gateway.
pub struct Fixture {
    pub auth: StubUpstream,
    pub users: StubUpstream,
    pub products: StubUpstream,
    pub gateway: RunningGateway,
}

pub async fn fixture() -> Fixture {
    let auth = StubUpstream::start("auth").await;
    let users = StubUpstream::start("users").await;
    let products = StubUpstream::start("products").await;
    let gateway = start_gateway(gateway_config(&auth.url(), &users.url(), &products.url())).await;

    Fixture {
        auth,
        users,
        products,
        gateway,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Returns true when `value` parses as an RFC 3339 / ISO-8601 date.
pub fn is_iso_timestamp(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
}
