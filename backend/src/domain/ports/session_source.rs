//! Driven port for looking up the caller's session upstream.
//!
//! Adapters report *why* a lookup failed; the session resolver decides that
//! every failure means "not authenticated".

use async_trait::async_trait;

use crate::domain::{Identity, SessionCredentials};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session source adapters.
    pub enum SessionSourceError {
        /// The session endpoint could not be reached or timed out.
        Transport { message: String } =>
            "session endpoint unreachable: {message}",
        /// The session endpoint answered with a non-success status.
        Status { status: u16 } =>
            "session endpoint returned status {status}",
        /// The session payload could not be decoded.
        Decode { message: String } =>
            "session payload invalid: {message}",
    }
}

/// Port for fetching the identity bound to forwarded session credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Return the identity for the credentials, or `None` when the upstream
    /// reports no session.
    async fn fetch_session(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<Option<Identity>, SessionSourceError>;
}

/// Fixture source that always returns the configured identity.
///
/// Useful for wiring handlers in tests without an upstream API.
#[derive(Debug, Default, Clone)]
pub struct FixtureSessionSource {
    identity: Option<Identity>,
}

impl FixtureSessionSource {
    /// A source that reports the given identity for every request.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// A source that reports no session for every request.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl SessionSource for FixtureSessionSource {
    async fn fetch_session(
        &self,
        _credentials: &SessionCredentials,
    ) -> Result<Option<Identity>, SessionSourceError> {
        Ok(self.identity.clone())
    }
}
