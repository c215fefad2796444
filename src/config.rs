//! Client configuration.

use chrono::Utc;

use crate::error::ConfigError;
use crate::util::to_base36;

/// Username sent in `USER` when none is configured.
pub const DEFAULT_USERNAME: &str = "websocket";

/// Where and as whom to connect.
///
/// ```
/// use slirc_client::ClientConfig;
///
/// let config = ClientConfig {
///     nick: Some("testman".to_string()),
///     ..ClientConfig::new("bridge.example.net", 7667)
/// };
/// assert_eq!(config.url(), "ws://bridge.example.net:7667");
/// assert_eq!(config.username(), "websocket");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientConfig {
    /// Bridge host name or address.
    pub server: String,
    /// Bridge port.
    pub port: u16,
    /// Desired nickname. A time-derived `nick_...` is used when unset.
    pub nick: Option<String>,
    /// Username (ident). Defaults to [`DEFAULT_USERNAME`].
    pub username: Option<String>,
    /// Connect with `wss://` instead of `ws://`.
    pub secure: bool,
}

impl ClientConfig {
    pub fn new(server: impl Into<String>, port: u16) -> Self {
        Self {
            server: server.into(),
            port,
            ..Self::default()
        }
    }

    /// Fail fast when no target address is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::MissingServer);
        }
        if self.port == 0 {
            return Err(ConfigError::MissingPort);
        }
        Ok(())
    }

    /// The bridge URL, `ws://server:port` or `wss://server:port`.
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}:{}", scheme, self.server, self.port)
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    /// The configured nickname, or a fresh generated one.
    pub fn nickname(&self) -> String {
        self.nick.clone().unwrap_or_else(generated_nick)
    }
}

/// `nick_` + base-36 Unix milliseconds + base-36 millisecond component.
fn generated_nick() -> String {
    let now = Utc::now();
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!(
        "nick_{}{}",
        to_base36(millis),
        to_base36(u64::from(now.timestamp_subsec_millis()))
    )
}
