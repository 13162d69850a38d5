//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request on a protected route:
//!     → credentials.rs (credential header present and non-blank?)
//!     → headers.rs (strip hop-by-hop, set Host, add X-Forwarded-*)
//!     → Forward to upstream
//! ```
//!
//! # Design Decisions
//! - Fail closed: a protected route never forwards without the header
//! - Presence only: credential values are not verified here

pub mod credentials;
pub mod headers;

pub use credentials::CredentialPolicy;
pub use headers::GatewayHeaders;
