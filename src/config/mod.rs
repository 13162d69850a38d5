//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → compiled once into the GatewayRouter at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no runtime route registration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AuthConfig, GatewayConfig, HeaderConfig, HealthConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, RewriteRuleConfig, RouteConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
