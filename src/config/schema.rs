//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::Deserialize;

/// Root configuration for the route admin tool.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Connection parameters for the Caddy admin API.
    pub admin: AdminClientConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Connection parameters for the remote admin API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdminClientConfig {
    /// Admin API host (e.g., "localhost").
    pub host: String,

    /// Admin API port (Caddy listens on 2019 by default).
    pub port: u16,

    /// Name of the HTTP server whose route list is managed.
    pub server_name: String,

    /// Total time allowed for one request/response in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for AdminClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 2019,
            server_name: "srv0".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl AdminClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Base URL of the admin API, without trailing slash.
    ///
    /// Bare IPv6 addresses (e.g. "::1") are bracketed.
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
