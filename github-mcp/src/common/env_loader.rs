//! Environment variable loading utilities
//!
//! Typed reads of prefixed environment variables with fallback defaults.
//! Unparseable values fall back to the default and are logged, never fatal.

use std::env;
use std::str::FromStr;

/// Read a variable, treating an empty value as unset
fn read_var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// Interpret common truthy/falsy spellings
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for loading multiple environment variables with a consistent prefix
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Full variable name for a suffix, e.g. `GITHUB_MCP_READ_ONLY`
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Load a string value with default
    pub fn load_string(&self, suffix: &str, default: &str) -> String {
        read_var(&self.key(suffix)).unwrap_or_else(|| default.to_string())
    }

    /// Load a parsed value with default
    pub fn load_parsed<T>(&self, suffix: &str, default: T) -> T
    where
        T: FromStr,
    {
        let key = self.key(suffix);
        match read_var(&key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unparseable value '{}' for {}", raw, key);
                default
            }),
            None => default,
        }
    }

    /// Load an optional value
    pub fn load_optional<T>(&self, suffix: &str) -> Option<T>
    where
        T: FromStr,
    {
        read_var(&self.key(suffix)).and_then(|raw| raw.parse().ok())
    }

    /// Load a boolean flag accepting `1/0`, `true/false`, `yes/no`, `on/off`
    pub fn load_bool(&self, suffix: &str, default: bool) -> bool {
        let key = self.key(suffix);
        match read_var(&key) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring non-boolean value '{}' for {}", raw, key);
                default
            }),
            None => default,
        }
    }

    /// Load a validated value, falling back to the default when the validator rejects it
    pub fn load_validated<T, F>(&self, suffix: &str, default: T, validator: F) -> T
    where
        T: FromStr + Clone,
        F: Fn(&T) -> bool,
    {
        let value = self.load_parsed(suffix, default.clone());
        if validator(&value) {
            value
        } else {
            tracing::warn!("Value for {} failed validation, using default", self.key(suffix));
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_loader_string_and_parsed() {
        let loader = EnvLoader::new("GITHUB_MCP_ENV_TEST");

        env::remove_var("GITHUB_MCP_ENV_TEST_STRING");
        assert_eq!(loader.load_string("STRING", "default"), "default");
        env::set_var("GITHUB_MCP_ENV_TEST_STRING", "value");
        assert_eq!(loader.load_string("STRING", "default"), "value");

        env::set_var("GITHUB_MCP_ENV_TEST_NUMBER", "123");
        assert_eq!(loader.load_parsed::<u32>("NUMBER", 42), 123);
        env::set_var("GITHUB_MCP_ENV_TEST_NUMBER", "invalid");
        assert_eq!(loader.load_parsed::<u32>("NUMBER", 42), 42);

        env::remove_var("GITHUB_MCP_ENV_TEST_STRING");
        env::remove_var("GITHUB_MCP_ENV_TEST_NUMBER");
    }

    #[test]
    #[serial]
    fn test_empty_value_counts_as_unset() {
        let loader = EnvLoader::new("GITHUB_MCP_ENV_TEST");
        env::set_var("GITHUB_MCP_ENV_TEST_EMPTY", "   ");
        assert_eq!(loader.load_optional::<String>("EMPTY"), None);
        assert_eq!(loader.load_string("EMPTY", "fallback"), "fallback");
        env::remove_var("GITHUB_MCP_ENV_TEST_EMPTY");
    }

    #[test]
    #[serial]
    fn test_load_bool_spellings() {
        let loader = EnvLoader::new("GITHUB_MCP_ENV_TEST");
        for (raw, expected) in [("1", true), ("TRUE", true), ("yes", true), ("off", false)] {
            env::set_var("GITHUB_MCP_ENV_TEST_FLAG", raw);
            assert_eq!(loader.load_bool("FLAG", !expected), expected, "raw = {raw}");
        }
        env::set_var("GITHUB_MCP_ENV_TEST_FLAG", "maybe");
        assert!(loader.load_bool("FLAG", true));
        env::remove_var("GITHUB_MCP_ENV_TEST_FLAG");
    }

    #[test]
    #[serial]
    fn test_load_validated() {
        let loader = EnvLoader::new("GITHUB_MCP_ENV_TEST");
        env::set_var("GITHUB_MCP_ENV_TEST_RETRIES", "50");
        assert_eq!(loader.load_validated("RETRIES", 3u32, |v| *v <= 10), 3);
        env::set_var("GITHUB_MCP_ENV_TEST_RETRIES", "5");
        assert_eq!(loader.load_validated("RETRIES", 3u32, |v| *v <= 10), 5);
        env::remove_var("GITHUB_MCP_ENV_TEST_RETRIES");
    }
}
