//! Gateway configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PORTAL_*` environment variables and an
//! optional configuration file, in ortho_config's usual precedence. The
//! timeout carries an ortho_config default so that an empty environment still
//! merges into a struct; the other fields are optional and their accessors
//! supply defaults and validate.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The marketplace base URL did not parse or is not HTTP(S).
    #[error("invalid api_base_url {value:?}: {reason}")]
    ApiBaseUrl {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The bind address did not parse as `host:port`.
    #[error("invalid bind_addr {value:?}: {reason}")]
    BindAddr {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The upstream timeout was zero.
    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// Configuration values for the gateway.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Marketplace API base URL, e.g. `https://tutors.example.com/api`.
    pub api_base_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Upstream request timeout in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            bind_addr: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl PortalSettings {
    /// Marketplace API base URL, falling back to the local default.
    ///
    /// # Errors
    /// Returns [`SettingsError::ApiBaseUrl`] when the value does not parse or
    /// does not use `http`/`https`.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL);
        let invalid = |reason: String| SettingsError::ApiBaseUrl {
            value: raw.to_owned(),
            reason,
        };
        let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other:?}"))),
        }
    }

    /// Listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Per-request upstream timeout.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}
