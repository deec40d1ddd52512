//! Client configuration and environment defaults.
//!
//! # Design
//! `SdkConfig` is what the caller hands in. `EnvDefaults` is a snapshot of
//! the two environment inputs the client honours, taken once so the
//! transport never re-reads the process environment mid-flight and tests
//! can inject their own values.

use std::time::Duration;

use tracing::warn;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://s.ee/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const BASE_URL_ENV: &str = "API_BASE_URL";
pub const PROXY_ENV: &str = "HTTP_PROXY";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("See-SDK/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Empty means "resolve from the environment" at transport construction.
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl SdkConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: String::new(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// A zero timeout falls back to the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() { DEFAULT_TIMEOUT } else { timeout };
        self
    }

    /// Fill in the base URL from `env` (or the built-in host) when the
    /// caller left it empty, and normalize the timeout.
    pub(crate) fn resolve(mut self, env: &EnvDefaults) -> Self {
        if self.base_url.trim().is_empty() {
            self.base_url = env
                .base_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string();
        }
        self.base_url = normalize_base_url(&self.base_url);
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        self
    }

    /// Merge the fields present in `update`. Empty strings and a zero
    /// timeout count as absent.
    pub(crate) fn merge(&mut self, update: ConfigUpdate) {
        if let Some(base_url) = update.base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = normalize_base_url(&base_url);
        }
        if let Some(api_key) = update.api_key.filter(|key| !key.is_empty()) {
            self.api_key = api_key;
        }
        if let Some(timeout) = update.timeout.filter(|t| !t.is_zero()) {
            self.timeout = timeout;
        }
    }
}

/// Partial override applied by `SeeClient::update_config`. Omitted fields
/// stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl ConfigUpdate {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Environment inputs, read once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    pub base_url: Option<String>,
    pub proxy: Option<String>,
}

impl EnvDefaults {
    pub fn from_process() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV).ok(),
            proxy: std::env::var(PROXY_ENV).ok(),
        }
    }

    /// Parsed proxy, if one is set and well formed. A malformed value is
    /// logged and ignored.
    pub fn proxy_settings(&self) -> Option<ProxySettings> {
        let raw = self.proxy.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match ProxySettings::parse(raw) {
            Ok(settings) => Some(settings),
            Err(reason) => {
                warn!(proxy = %raw, %reason, "Invalid proxy URL format, continuing without proxy");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl ProxySettings {
    /// Parse `protocol://host:port`. The port defaults to the scheme's
    /// well-known port.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let url = Url::parse(raw).map_err(|e| e.to_string())?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| "proxy URL has no host".to_string())?
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or_else(|| format!("no port given and none known for scheme {}", url.scheme()))?;
        Ok(Self {
            protocol: url.scheme().to_string(),
            host,
            port,
        })
    }

    pub fn to_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
