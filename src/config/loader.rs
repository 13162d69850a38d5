//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.health.path, "/health");
    }

    #[test]
    fn routes_replace_defaults() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [[routes]]
            name = "billing"
            path_prefix = "/billing"
            upstream = "http://127.0.0.1:9100/v2"
            auth_required = true

            [[routes.path_rewrite]]
            pattern = "^/billing"
            replacement = ""
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.routes.len(), 1);
        let route = &config.routes[0];
        assert!(route.auth_required);
        assert_eq!(route.path_rewrite.len(), 1);
        assert_eq!(route.path_rewrite[0].pattern, "^/billing");
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn semantic_error_is_validation_error() {
        let err = parse_config(
            r#"
            [[routes]]
            name = "broken"
            path_prefix = "no-slash"
            upstream = "http://127.0.0.1:9100"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn bundled_sample_matches_defaults() {
        let config = parse_config(include_str!("../../gateway.toml")).unwrap();
        let defaults = GatewayConfig::default();
        assert_eq!(config.routes.len(), defaults.routes.len());
        for (sample, default) in config.routes.iter().zip(&defaults.routes) {
            assert_eq!(sample.name, default.name);
            assert_eq!(sample.upstream, default.upstream);
            assert_eq!(sample.auth_required, default.auth_required);
            assert_eq!(sample.path_rewrite.len(), default.path_rewrite.len());
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
