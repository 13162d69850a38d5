//! Gateway Router: a prefix-routing HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ health? ──yes──▶ 200 {"status":"OK"}
//!                          │
//!                          ▼ no
//!                     routing (prefix) ──no match──▶ 404
//!                          │
//!                          ▼
//!                     security (credential present?) ──no──▶ 401
//!                          │
//!                          ▼
//!                     rewrite path, stamp headers, forward ──error──▶ 500
//!                          │
//!     Client Response      ▼
//!     ◀────────────── relay upstream status, headers, body
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayRouter;
pub use lifecycle::Shutdown;
