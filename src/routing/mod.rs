//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (segment-aware prefix match)
//!     → Return: matched Route or NoMatch
//!
//! Forwarding a matched request:
//!     → rewrite.rs (first matching regex rule)
//!     → upstream.rs (join base URL + path + query)
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Validate prefix, upstream URL, rewrite patterns
//!     → Sort by prefix length
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Regex only in rewrite rules, never in matching
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod rewrite;
pub mod router;
pub mod upstream;

pub use router::{Route, RouteTable};
pub use upstream::Upstream;
