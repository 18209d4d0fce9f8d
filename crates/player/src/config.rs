//! Client configuration, read from the environment.
//!
//! Supported variables:
//! - `SKIRMISH_WS_URL` (or `SOCKET_URL`): server socket, default `ws://localhost:4001`
//! - `SKIRMISH_RETRY_DELAY_MS`: delay after a failed channel creation (1000)
//! - `SKIRMISH_RECONNECT_DELAY_MS`: delay after an unexpected close (0)
//! - `SKIRMISH_SEARCH_TIMEOUT_MS`: menu type-ahead window (1000)
//! - `SKIRMISH_DEBUG`: write unmatched hotkey signatures to the log (false)
//! - `SKIRMISH_USERNAME` / `SKIRMISH_PASSWORD`: log in automatically once connected

use std::fmt;
use std::time::Duration;

use crate::application::menu::DEFAULT_SEARCH_TIMEOUT;
use crate::application::session::{SessionConfig, DEFAULT_RECONNECT_DELAY, DEFAULT_RETRY_DELAY};

pub const DEFAULT_WS_URL: &str = "ws://localhost:4001";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidMillis { var: &'static str, value: String },
    #[error("{var} must be true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },
    #[error("SKIRMISH_USERNAME and SKIRMISH_PASSWORD must be set together")]
    PartialCredentials,
}

/// Login details for automatic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub ws_url: String,
    pub retry_delay: Duration,
    pub reconnect_delay: Duration,
    pub search_timeout: Duration,
    pub debug: bool,
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            retry_delay: DEFAULT_RETRY_DELAY,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            debug: false,
            credentials: None,
        }
    }
}

impl ClientConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names. Unset means default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ws_url = lookup("SKIRMISH_WS_URL")
            .or_else(|| lookup("SOCKET_URL"))
            .unwrap_or(defaults.ws_url);

        let millis = |var: &'static str, default: Duration| match lookup(var) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidMillis { var, value }),
        };

        let debug = match lookup("SKIRMISH_DEBUG") {
            None => defaults.debug,
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidBool {
                var: "SKIRMISH_DEBUG",
                value,
            })?,
        };

        let credentials = match (lookup("SKIRMISH_USERNAME"), lookup("SKIRMISH_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };

        Ok(Self {
            ws_url,
            retry_delay: millis("SKIRMISH_RETRY_DELAY_MS", defaults.retry_delay)?,
            reconnect_delay: millis("SKIRMISH_RECONNECT_DELAY_MS", defaults.reconnect_delay)?,
            search_timeout: millis("SKIRMISH_SEARCH_TIMEOUT_MS", defaults.search_timeout)?,
            debug,
            credentials,
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            retry_delay: self.retry_delay,
            reconnect_delay: self.reconnect_delay,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(load(&[]).expect("defaults"), ClientConfig::default());
    }

    #[test]
    fn socket_url_is_a_fallback() {
        let config = load(&[("SOCKET_URL", "ws://game:9000")]).expect("valid");
        assert_eq!(config.ws_url, "ws://game:9000");

        let config = load(&[
            ("SOCKET_URL", "ws://game:9000"),
            ("SKIRMISH_WS_URL", "wss://play.example"),
        ])
        .expect("valid");
        assert_eq!(config.ws_url, "wss://play.example");
    }

    #[test]
    fn delays_and_debug_are_parsed() {
        let config = load(&[
            ("SKIRMISH_RETRY_DELAY_MS", "250"),
            ("SKIRMISH_RECONNECT_DELAY_MS", "5"),
            ("SKIRMISH_SEARCH_TIMEOUT_MS", "1500"),
            ("SKIRMISH_DEBUG", "yes"),
        ])
        .expect("valid");
        assert_eq!(
            config.session_config(),
            SessionConfig {
                retry_delay: Duration::from_millis(250),
                reconnect_delay: Duration::from_millis(5),
            }
        );
        assert_eq!(config.search_timeout, Duration::from_millis(1500));
        assert!(config.debug);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert_eq!(
            load(&[("SKIRMISH_RETRY_DELAY_MS", "soon")]),
            Err(ConfigError::InvalidMillis {
                var: "SKIRMISH_RETRY_DELAY_MS",
                value: "soon".into(),
            })
        );
        assert!(matches!(
            load(&[("SKIRMISH_DEBUG", "maybe")]),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert_eq!(
            load(&[("SKIRMISH_USERNAME", "alice")]),
            Err(ConfigError::PartialCredentials)
        );
    }

    #[test]
    fn password_is_not_logged() {
        let credentials = Credentials {
            username: "alice".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
