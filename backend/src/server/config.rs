//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use portal::settings::{PortalSettings, SettingsError};
use url::Url;

/// Validated configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) api_base_url: Url,
    pub(crate) request_timeout: Duration,
}

impl ServerConfig {
    /// Validate loaded settings into a server configuration.
    ///
    /// # Errors
    /// Returns the first invalid setting.
    pub fn from_settings(settings: &PortalSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            api_base_url: settings.api_base_url()?,
            request_timeout: settings.request_timeout()?,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the marketplace API base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }
}
