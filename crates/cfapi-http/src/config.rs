//! Adapter configuration.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default API root.
pub const DEFAULT_BASE_URI: &str = "https://api.cloudflare.com/client/v4/";

/// Environment variable names read by [`AdapterConfig::from_env`].
pub mod vars {
    pub const BASE_URI: &str = "CFAPI_BASE_URI";
    pub const HEADER_MERGE: &str = "CFAPI_HEADER_MERGE";
    pub const CONNECT_TIMEOUT_SECS: &str = "CFAPI_CONNECT_TIMEOUT_SECS";
    pub const REQUEST_TIMEOUT_SECS: &str = "CFAPI_REQUEST_TIMEOUT_SECS";
}

/// How per-call extra headers combine with the adapter's stored headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMergeMode {
    /// Extra headers are folded into the stored set and sent on every
    /// later request too.
    #[default]
    Persistent,
    /// Extra headers apply to the one request only.
    PerRequest,
}

impl FromStr for HeaderMergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "persistent" => Ok(Self::Persistent),
            "per_request" => Ok(Self::PerRequest),
            other => Err(format!("unknown header merge mode {other:?}")),
        }
    }
}

impl fmt::Display for HeaderMergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Persistent => "persistent",
            Self::PerRequest => "per_request",
        })
    }
}

/// Adapter and transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// API root every request path is appended to.
    pub base_uri: String,
    /// Extra header handling.
    pub header_merge: HeaderMergeMode,
    /// Connection timeout.
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Maximum redirects followed per request.
    pub max_redirects: usize,
    /// Ignore `HTTP_PROXY`-style environment settings.
    pub no_proxy: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            header_merge: HeaderMergeMode::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("cfapi/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            no_proxy: false,
        }
    }
}

impl AdapterConfig {
    /// Defaults with any `CFAPI_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_uri) = get(vars::BASE_URI) {
            config.base_uri = base_uri;
        }
        if let Some(mode) = get(vars::HEADER_MERGE) {
            config.header_merge = mode.parse().map_err(|message| ConfigError::InvalidValue {
                var: vars::HEADER_MERGE.to_string(),
                message,
            })?;
        }
        if let Some(secs) = get_secs(vars::CONNECT_TIMEOUT_SECS)? {
            config.connect_timeout = secs;
        }
        if let Some(secs) = get_secs(vars::REQUEST_TIMEOUT_SECS)? {
            config.request_timeout = secs;
        }

        tracing::debug!(
            base_uri = %config.base_uri,
            header_merge = %config.header_merge,
            "loaded adapter config"
        );
        Ok(config)
    }

    /// Set the base URI.
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Set the header merge mode.
    pub fn header_merge(mut self, mode: HeaderMergeMode) -> Self {
        self.header_merge = mode;
        self
    }
}

fn get(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

fn get_secs(var: &str) -> Result<Option<Duration>, ConfigError> {
    match get(var) {
        Some(v) => v
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: "expected whole seconds".to_string(),
            }),
        None => Ok(None),
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
