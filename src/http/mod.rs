//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → health.rs (exact health path, never routed)
//!     → proxy.rs (route, credential check, forward, relay)
//!     → response.rs (envelopes, timestamps)
//!     → Send to client
//! ```

pub mod health;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, GatewayRouter};
