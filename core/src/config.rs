//! Client configuration.
//!
//! # Design
//! Everything the default transport needs lives in one explicitly constructed
//! value instead of process-wide state. It can come from `Default`, from the
//! environment via `from_env`, or from any serde source the host already has.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env::get_env_key;
use crate::http::Headers;

pub const TIMEOUT_ENV: &str = "UTIL_HTTP_TIMEOUT_SECS";
pub const USER_AGENT_ENV: &str = "UTIL_HTTP_USER_AGENT";

const ACCEPT: &str = "Accept";
const USER_AGENT: &str = "User-Agent";

pub const DEFAULT_USER_AGENT: &str = concat!("util-core/", env!("CARGO_PKG_VERSION"));

/// Settings shared by every request a client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Whole-request timeout in seconds. `None` keeps the HTTP library default.
    pub timeout_secs: Option<u64>,
    /// Headers attached when the caller supplies none, `User-Agent`
    /// included. Caller-supplied headers replace this set entirely.
    pub default_headers: Headers,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            default_headers: default_headers(DEFAULT_USER_AGENT),
        }
    }
}

fn default_headers(user_agent: &str) -> Headers {
    let mut headers = Headers::new();
    headers.insert(ACCEPT.to_string(), vec!["application/json".to_string()]);
    headers.insert(USER_AGENT.to_string(), vec![user_agent.to_string()]);
    headers
}

impl ClientConfig {
    /// Read `UTIL_HTTP_TIMEOUT_SECS` and `UTIL_HTTP_USER_AGENT`, falling back
    /// to the defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_values(
            &get_env_key(TIMEOUT_ENV, ""),
            &get_env_key(USER_AGENT_ENV, DEFAULT_USER_AGENT),
        )
    }

    fn from_values(timeout: &str, user_agent: &str) -> Self {
        let timeout_secs = match timeout.trim() {
            "" => None,
            raw => match raw.parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    tracing::warn!(value = raw, error = %e, "ignoring invalid {TIMEOUT_ENV}");
                    None
                }
            },
        };
        Self {
            timeout_secs,
            default_headers: default_headers(user_agent),
        }
    }

    /// Configured default `User-Agent`, if the default headers carry one.
    pub fn user_agent(&self) -> Option<&str> {
        self.default_headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(USER_AGENT))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_json_without_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), None);
        assert_eq!(
            config.default_headers.get("Accept"),
            Some(&vec!["application/json".to_string()])
        );
        assert!(config.user_agent().unwrap().starts_with("util-core/"));
    }

    #[test]
    fn values_parse_timeout() {
        let config = ClientConfig::from_values("15", "agent/1.0");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.user_agent(), Some("agent/1.0"));
        assert_eq!(
            config.default_headers.get("User-Agent"),
            Some(&vec!["agent/1.0".to_string()])
        );
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let config = ClientConfig::from_values("soon", DEFAULT_USER_AGENT);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn user_agent_absent_when_defaults_drop_it() {
        let mut config = ClientConfig::default();
        config.default_headers.remove("User-Agent");
        assert_eq!(config.user_agent(), None);
    }

    #[test]
    fn deserializes_partial_json() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs":3}"#).unwrap();
        assert_eq!(config.timeout_secs, Some(3));
        assert_eq!(config.user_agent(), Some(DEFAULT_USER_AGENT));
        assert!(config.default_headers.contains_key("Accept"));
    }

    #[test]
    fn from_env_without_overrides_matches_default() {
        if std::env::var_os(TIMEOUT_ENV).is_none() && std::env::var_os(USER_AGENT_ENV).is_none() {
            assert_eq!(ClientConfig::from_env(), ClientConfig::default());
        }
    }
}
