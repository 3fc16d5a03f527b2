//! Client configuration loaded from defaults and the environment.
//!
//! Configuration is loaded in priority order (lowest to highest):
//! 1. Struct defaults (the public parliament.uk endpoints)
//! 2. Environment variables with UKPARL_ prefix (always wins)
//!
//! Nested fields use `__` as the separator, e.g.
//! `UKPARL_LINKED_DATA__BASE_URL` or `UKPARL_HTTP__TIMEOUT_SECS`.

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub linked_data: LinkedDataConfig,
    #[serde(default)]
    pub members_query: MembersQueryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Endpoint for the JSON linked-data API (listings and division detail).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkedDataConfig {
    #[serde(default = "default_linked_data_base_url")]
    pub base_url: String,
}

/// Endpoint for the XML members-query API (rosters and member detail).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MembersQueryConfig {
    #[serde(default = "default_members_query_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. The crate imposes no timeout policy of
    /// its own; this is handed straight to the transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_linked_data_base_url() -> String {
    "http://lda.data.parliament.uk".to_string()
}

fn default_members_query_base_url() -> String {
    "http://data.parliament.uk/membersdataplatform/services/mnis/members/query".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("ukparliament/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for LinkedDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_linked_data_base_url(),
        }
    }
}

impl Default for MembersQueryConfig {
    fn default() -> Self {
        Self {
            base_url: default_members_query_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linked_data: LinkedDataConfig::default(),
            members_query: MembersQueryConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from defaults and UKPARL_-prefixed environment
    /// variables.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("UKPARL_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("linked_data.base_url", &self.linked_data.base_url),
            ("members_query.base_url", &self.members_query.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "{field} must start with http:// or https://, got '{url}'"
                )));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs cannot be 0".into(),
            ));
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http.user_agent cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.linked_data.base_url, "http://lda.data.parliament.uk");
        assert!(config.members_query.base_url.contains("membersdataplatform"));
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("ukparliament/"));
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn base_url_boundaries() {
        let cases = [
            ("http://lda.data.parliament.uk", true, "http scheme"),
            ("https://example.test", true, "https scheme"),
            ("ftp://example.test", false, "ftp scheme"),
            ("lda.data.parliament.uk", false, "no scheme"),
            ("", false, "empty"),
        ];

        for (url, should_pass, desc) in cases {
            let mut config = Config::default();
            config.linked_data.base_url = url.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn timeout_boundaries() {
        let cases = [
            (0u64, false, "zero timeout"),
            (1, true, "minimum valid"),
            (30, true, "default value"),
            (600, true, "high value"),
        ];

        for (timeout, should_pass, desc) in cases {
            let mut config = Config::default();
            config.http.timeout_secs = timeout;
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn test_validation_rejects_blank_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "   ".into();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("user_agent"));
    }
}
