//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! the health route, the environment variables it inspects, report defaults,
//! logging, and default paths. `AppConfig` is the root configuration struct.

use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Health responses describe the process at one instant and must never be
/// served from an upstream cache.
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Health Report Defaults
// =============================================================================

/// Default route for the health endpoint
pub const DEFAULT_HEALTH_PATH: &str = "/api/health";

/// Environment variable overriding the reported version
pub const VERSION_ENV_VAR: &str = "NEXT_PUBLIC_APP_VERSION";

/// Environment variable naming the deployment environment
pub const APP_ENV_VAR: &str = "NODE_ENV";

/// Version reported when `NEXT_PUBLIC_APP_VERSION` is unset
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Environment reported when `NODE_ENV` is unset
pub const DEFAULT_APP_ENV: &str = "development";

/// Default name of the portal base URL variable (presence-only check)
pub const DEFAULT_BASE_URL_VAR: &str = "PORTAL_BASE_URL";

/// Default name of the portal tenant identifier variable (presence-only check)
pub const DEFAULT_TENANT_UUID_VAR: &str = "PORTAL_TENANT_UUID";

/// Error message used when a failure renders to an empty string
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

// =============================================================================
// Server Defaults
// =============================================================================

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Seconds to wait for in-flight connections after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "portal_health=info,tower_http=info";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Health route and inspected variables
    #[serde(default)]
    pub health: HealthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

/// Health endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    /// Route serving both the detailed report (GET) and the probe (HEAD)
    #[serde(default = "HealthConfig::default_path")]
    pub path: String,
    /// Variable whose presence marks the portal base URL as configured
    #[serde(default = "HealthConfig::default_base_url_var")]
    pub base_url_var: String,
    /// Variable whose presence marks the portal tenant as configured
    #[serde(default = "HealthConfig::default_tenant_uuid_var")]
    pub tenant_uuid_var: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            base_url_var: Self::default_base_url_var(),
            tenant_uuid_var: Self::default_tenant_uuid_var(),
        }
    }
}

impl HealthConfig {
    fn default_path() -> String {
        DEFAULT_HEALTH_PATH.to_string()
    }

    fn default_base_url_var() -> String {
        DEFAULT_BASE_URL_VAR.to_string()
    }

    fn default_tenant_uuid_var() -> String {
        DEFAULT_TENANT_UUID_VAR.to_string()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.health.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "health.path must start with '/', got {:?}",
                self.health.path
            )));
        }

        // Route parameters and wildcards would make axum panic at router construction
        if let Some(c) = self
            .health
            .path
            .chars()
            .find(|c| matches!(c, ':' | '*' | '{' | '}'))
        {
            return Err(ConfigError::Validation(format!(
                "health.path must be a literal path, found {:?} in {:?}",
                c, self.health.path
            )));
        }

        if self.health.base_url_var.trim().is_empty() {
            return Err(ConfigError::Validation(
                "health.base_url_var must not be empty".to_string(),
            ));
        }

        if self.health.tenant_uuid_var.trim().is_empty() {
            return Err(ConfigError::Validation(
                "health.tenant_uuid_var must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.health.path, DEFAULT_HEALTH_PATH);
        assert_eq!(config.health.base_url_var, DEFAULT_BASE_URL_VAR);
        assert_eq!(config.health.tenant_uuid_var, DEFAULT_TENANT_UUID_VAR);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = AppConfig::parse(
            r#"
            [http]
            port = 8080

            [health]
            base_url_var = "API_BASE_URL"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.health.path, DEFAULT_HEALTH_PATH);
        assert_eq!(config.health.base_url_var, "API_BASE_URL");
        assert_eq!(config.health.tenant_uuid_var, DEFAULT_TENANT_UUID_VAR);
    }

    #[test]
    fn test_json_log_format() {
        let config = AppConfig::parse("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_is_parse_error() {
        let err = AppConfig::parse("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_relative_health_path_rejected() {
        let err = AppConfig::parse("[health]\npath = \"api/health\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_route_syntax_in_health_path_rejected() {
        for path in ["/api/:id", "/api/*rest", "/api/{id}", "/api/health}"] {
            let err = AppConfig::parse(&format!("[health]\npath = \"{}\"\n", path)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation(_)),
                "{} should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_blank_variable_name_rejected() {
        let err = AppConfig::parse("[health]\ntenant_uuid_var = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[http]\nhost = \"127.0.0.1\"\nport = 4000\n\n[health]\npath = \"/healthz\""
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 4000);
        assert_eq!(config.health.path, "/healthz");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_shipped_default_config_parses() {
        let contents = include_str!("../config/default.toml");
        let config = AppConfig::parse(contents).unwrap();
        assert_eq!(config.health.path, DEFAULT_HEALTH_PATH);
    }
}
