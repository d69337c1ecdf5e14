//! Layered configuration.
//!
//! Built-in defaults, then an optional TOML file, then `INSTAGRAB_*`
//! environment variables (`__` separates nested keys, e.g.
//! `INSTAGRAB_RELAY__KIND=direct`).

use crate::core::error::AppResult;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "instagrab.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "INSTAGRAB_";

/// Extraction API defaults
pub mod upstream {
    /// Extraction endpoint receiving `{"url": ...}`
    pub const ENDPOINT: &str = "https://api.instantdp.com/igdl";

    /// Referer the endpoint expects
    pub const REFERER: &str = "https://www.instantdp.com/instagram";

    /// Mobile Chrome user agent
    pub const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Mobile Safari/537.36";
}

/// Relay defaults
pub mod relay {
    /// allorigins `get` endpoint; wraps the upstream body in `{"contents": ...}`
    pub const ALLORIGINS_BASE: &str = "https://api.allorigins.win/get";
}

/// UI defaults
pub mod ui {
    use super::Duration;

    /// How long an error stays on screen before the session returns to idle
    pub const ERROR_DISPLAY_SECS: u64 = 5;

    pub fn error_display() -> Duration {
        Duration::from_secs(ERROR_DISPLAY_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub upstream: UpstreamSettings,
    pub relay: RelaySettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamSettings {
    pub endpoint: String,
    pub referer: Option<String>,
    pub user_agent: String,
    /// No timeout unless set
    pub timeout_secs: Option<u64>,
}

/// How requests reach the extraction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RelayKind {
    /// `<base>?url=<endpoint>`, response wrapped in `{"contents": "..."}`
    AllOrigins,
    /// `<base><endpoint>`, response passed through
    Prefix,
    /// Straight to the endpoint
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySettings {
    pub kind: RelayKind,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    pub error_display_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upstream: UpstreamSettings {
                endpoint: upstream::ENDPOINT.to_string(),
                referer: Some(upstream::REFERER.to_string()),
                user_agent: upstream::USER_AGENT.to_string(),
                timeout_secs: None,
            },
            relay: RelaySettings {
                kind: RelayKind::AllOrigins,
                base: relay::ALLORIGINS_BASE.to_string(),
            },
            ui: UiSettings {
                error_display_secs: ui::ERROR_DISPLAY_SECS,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from defaults, a TOML file and the environment.
    ///
    /// An explicit `path` must exist; without one, [`DEFAULT_CONFIG_FILE`] is
    /// merged only when present.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(figment::Error::from(format!("config file not found: {}", path.display())).into());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).is_file() {
                    figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
                }
            }
        }

        let settings = figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()?;
        Ok(settings)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_secs(self.ui.error_display_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.upstream.timeout_secs.map(Duration::from_secs)
    }
}
