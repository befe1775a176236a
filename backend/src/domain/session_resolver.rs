//! Session resolution with fail-closed semantics.
//!
//! "Not logged in" is an expected outcome, not an error. Any failure while
//! talking to the session endpoint is logged and collapses to
//! [`SessionResolution::Anonymous`]. There is no retry: every request resolves
//! its own session.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::SessionSource;
use super::{SessionCredentials, SessionResolution};

/// Resolves forwarded credentials into a [`SessionResolution`].
#[derive(Clone)]
pub struct SessionResolver {
    source: Arc<dyn SessionSource>,
}

impl SessionResolver {
    /// Build a resolver over the given session source.
    pub fn new(source: Arc<dyn SessionSource>) -> Self {
        Self { source }
    }

    /// Resolve the caller's session. Never fails.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use portal::domain::ports::FixtureSessionSource;
    /// use portal::domain::{SessionCredentials, SessionResolution, SessionResolver};
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let resolver = SessionResolver::new(Arc::new(FixtureSessionSource::anonymous()));
    /// let creds = SessionCredentials::from_cookie_header("session=abc");
    /// assert_eq!(resolver.resolve(&creds).await, SessionResolution::Anonymous);
    /// # });
    /// ```
    pub async fn resolve(&self, credentials: &SessionCredentials) -> SessionResolution {
        if credentials.is_empty() {
            debug!("no session cookie forwarded; caller is anonymous");
            return SessionResolution::Anonymous;
        }

        match self.source.fetch_session(credentials).await {
            Ok(Some(identity)) => {
                debug!(user_id = %identity.id(), role = %identity.role(), "session resolved");
                SessionResolution::Authenticated(identity)
            }
            Ok(None) => SessionResolution::Anonymous,
            Err(error) => {
                warn!(%error, "session lookup failed; treating caller as anonymous");
                SessionResolution::Anonymous
            }
        }
    }
}
