//! Environment-backed configuration.
//!
//! Credentials are read from the process environment only and are never
//! logged. The `BUZZTICK_*` names are preferred; the bare lowercase names
//! are accepted as a fallback for existing `.env` files.

use std::env;

use crate::error::ConfigError;

/// Identity used against the forum API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

/// Runtime configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub reddit: RedditCredentials,
    /// Optional bearer token for the hosted inference endpoint.
    pub hf_api_token: Option<String>,
}

impl Config {
    /// Load from the process environment. A missing or empty required
    /// variable is a startup failure.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            reddit: RedditCredentials {
                client_id: require("BUZZTICK_CLIENT_ID", "client_id")?,
                client_secret: require("BUZZTICK_CLIENT_SECRET", "client_secret")?,
                user_agent: require("BUZZTICK_USER_AGENT", "user_agent")?,
            },
            hf_api_token: optional("HF_API_TOKEN"),
        })
    }
}

fn require(name: &'static str, fallback: &str) -> Result<String, ConfigError> {
    if let Some(value) = optional(name) {
        return Ok(value);
    }
    if let Some(value) = optional(fallback) {
        return Ok(value);
    }
    match env::var(name) {
        Ok(_) => Err(ConfigError::EmptyVar { name }),
        Err(_) => Err(ConfigError::MissingVar { name }),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_is_a_startup_failure() {
        let err = require("BUZZTICK_TEST_NEVER_SET", "buzztick_test_never_set_either")
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::MissingVar { .. }));
    }

    #[test]
    fn fallback_name_is_accepted() {
        env::set_var("buzztick_test_fallback_only", "value-from-fallback");
        let value =
            require("BUZZTICK_TEST_PREFERRED_UNSET", "buzztick_test_fallback_only").expect("must load");
        assert_eq!(value, "value-from-fallback");
    }

    #[test]
    fn empty_variable_is_rejected() {
        env::set_var("BUZZTICK_TEST_EMPTY", "   ");
        let err = require("BUZZTICK_TEST_EMPTY", "buzztick_test_empty_fallback").expect_err("must fail");
        assert!(matches!(err, ConfigError::EmptyVar { .. }));
    }
}
