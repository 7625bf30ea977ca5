//! Configuration management for the GitHub MCP server
//!
//! The configuration is read once at startup from the process environment and
//! is read-only afterwards. The bearer credential is mandatory: its absence is
//! a fatal startup condition reported as [`ConfigError::MissingToken`].

use crate::common::env_loader::EnvLoader;
use crate::rate_limit::{DEFAULT_LOW_QUOTA_RATIO, DEFAULT_MAX_RETRIES};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable holding the personal access token
pub const TOKEN_ENV_VAR: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";
/// Environment variable selecting a GitHub Enterprise host
pub const HOST_ENV_VAR: &str = "GH_HOST";
/// Prefix for the server's own tuning variables
pub const ENV_PREFIX: &str = "GITHUB_MCP";

const DEFAULT_REST_BASE_URL: &str = "https://api.github.com/";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const MAX_ALLOWED_RETRIES: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bearer credential is not set
    #[error("{variable} not set")]
    MissingToken {
        /// Name of the environment variable that should hold the token
        variable: &'static str,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the configuration field that has an invalid value
        field: String,
        /// The invalid value that was provided
        value: String,
        /// Helpful hint about how to fix the issue
        hint: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    Validation {
        /// Descriptive message about the validation failure
        message: String,
    },
}

/// Runtime configuration for the server
#[derive(Clone)]
pub struct Config {
    /// Bearer credential sent with every API call
    pub token: String,
    /// Enterprise host, when not talking to github.com
    pub host: Option<String>,
    /// Base URL for REST calls, always ending in `/`
    pub rest_base_url: String,
    /// Endpoint for GraphQL calls
    pub graphql_url: String,
    /// Exclude mutating tools from the registry
    pub read_only: bool,
    /// Rate-limit retries per outbound call (default: 3)
    pub max_retries: u32,
    /// Remaining/limit ratio under which a low-quota warning is logged (default: 0.10)
    pub low_quota_ratio: f64,
    /// Timeout for a single HTTP request (default: 30s)
    pub request_timeout: Duration,
    /// User agent sent to the API
    pub user_agent: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("host", &self.host)
            .field("rest_base_url", &self.rest_base_url)
            .field("graphql_url", &self.graphql_url)
            .field("read_only", &self.read_only)
            .field("max_retries", &self.max_retries)
            .field("low_quota_ratio", &self.low_quota_ratio)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    /// Create a configuration for github.com with default tuning
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            host: None,
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            read_only: false,
            max_retries: DEFAULT_MAX_RETRIES,
            low_quota_ratio: DEFAULT_LOW_QUOTA_RATIO,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: format!("github-mcp-server/{}", crate::VERSION),
        }
    }

    /// Load configuration from the process environment
    ///
    /// Reads `GITHUB_PERSONAL_ACCESS_TOKEN` (required), `GH_HOST`, and the
    /// `GITHUB_MCP_*` tuning variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken {
                variable: TOKEN_ENV_VAR,
            })?;

        let loader = EnvLoader::new(ENV_PREFIX);
        let mut config = Self::new(token.trim());
        config.read_only = loader.load_bool("READ_ONLY", false);
        config.max_retries = loader.load_validated("MAX_RETRIES", DEFAULT_MAX_RETRIES, |v| {
            *v <= MAX_ALLOWED_RETRIES
        });
        config.low_quota_ratio =
            loader.load_validated("LOW_QUOTA_RATIO", DEFAULT_LOW_QUOTA_RATIO, |v| {
                *v > 0.0 && *v < 1.0
            });
        config.request_timeout = Duration::from_secs(
            loader.load_validated("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS, |v| {
                *v > 0
            }),
        );

        if let Ok(host) = std::env::var(HOST_ENV_VAR) {
            if !host.trim().is_empty() {
                config = config.with_host(host.trim())?;
            }
        }

        config.validate()?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Point the configuration at a GitHub Enterprise host
    ///
    /// `github.com` (with or without scheme) keeps the public API endpoints.
    pub fn with_host(mut self, host: &str) -> Result<Self, ConfigError> {
        let (rest, graphql) = api_urls_for_host(host)?;
        self.host = if rest == DEFAULT_REST_BASE_URL {
            None
        } else {
            Some(host.to_string())
        };
        self.rest_base_url = rest;
        self.graphql_url = graphql;
        Ok(self)
    }

    /// Enable or disable read-only mode
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken {
                variable: TOKEN_ENV_VAR,
            });
        }

        if self.max_retries > MAX_ALLOWED_RETRIES {
            return Err(ConfigError::InvalidValue {
                field: "max_retries".to_string(),
                value: self.max_retries.to_string(),
                hint: format!("Use a value between 0 and {MAX_ALLOWED_RETRIES}"),
            });
        }

        if !(self.low_quota_ratio > 0.0 && self.low_quota_ratio < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "low_quota_ratio".to_string(),
                value: self.low_quota_ratio.to_string(),
                hint: "Use a ratio strictly between 0 and 1, e.g. 0.10".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Validation {
                message: "request timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Derive the REST base URL and GraphQL endpoint for a host
fn api_urls_for_host(host: &str) -> Result<(String, String), ConfigError> {
    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| ConfigError::InvalidValue {
        field: "host".to_string(),
        value: host.to_string(),
        hint: format!("Expected a hostname such as github.example.com ({e})"),
    })?;

    let hostname = url.host_str().ok_or_else(|| ConfigError::InvalidValue {
        field: "host".to_string(),
        value: host.to_string(),
        hint: "The host has no hostname component".to_string(),
    })?;

    if hostname.eq_ignore_ascii_case("github.com") || hostname.eq_ignore_ascii_case("api.github.com")
    {
        return Ok((
            DEFAULT_REST_BASE_URL.to_string(),
            DEFAULT_GRAPHQL_URL.to_string(),
        ));
    }

    let origin = url.origin().ascii_serialization();
    Ok((format!("{origin}/api/v3/"), format!("{origin}/api/graphql")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        env::remove_var(TOKEN_ENV_VAR);
        env::remove_var(HOST_ENV_VAR);
        env::remove_var("GITHUB_MCP_READ_ONLY");
        env::remove_var("GITHUB_MCP_MAX_RETRIES");
    }

    #[test]
    #[serial]
    fn test_missing_token_is_fatal() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken { .. }));
        assert!(err.to_string().contains(TOKEN_ENV_VAR));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_tuning_variables() {
        clear_env();
        env::set_var(TOKEN_ENV_VAR, "ghp_test");
        env::set_var("GITHUB_MCP_READ_ONLY", "true");
        env::set_var("GITHUB_MCP_MAX_RETRIES", "5");

        let config = Config::from_env().unwrap();
        assert_eq!(config.token, "ghp_test");
        assert!(config.read_only);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.rest_base_url, DEFAULT_REST_BASE_URL);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_enterprise_host_from_env() {
        clear_env();
        env::set_var(TOKEN_ENV_VAR, "ghp_test");
        env::set_var(HOST_ENV_VAR, "github.example.com");

        let config = Config::from_env().unwrap();
        assert_eq!(config.rest_base_url, "https://github.example.com/api/v3/");
        assert_eq!(config.graphql_url, "https://github.example.com/api/graphql");
        assert_eq!(config.host.as_deref(), Some("github.example.com"));

        clear_env();
    }

    #[test]
    fn test_defaults_match_guard_defaults() {
        let config = Config::new("t");
        let guard = crate::rate_limit::RateLimitGuardConfig::default();
        assert_eq!(config.max_retries, guard.max_retries);
        assert_eq!(config.low_quota_ratio, guard.low_quota_ratio);
    }

    #[test]
    fn test_github_dot_com_host_keeps_public_api() {
        let config = Config::new("t").with_host("https://github.com").unwrap();
        assert_eq!(config.rest_base_url, DEFAULT_REST_BASE_URL);
        assert!(config.host.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new("ghp_secret_value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_secret_value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new("t");
        config.max_retries = 99;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = Config::new("t");
        config.low_quota_ratio = 1.5;
        assert!(config.validate().is_err());

        assert!(Config::new("t").validate().is_ok());
    }
}
