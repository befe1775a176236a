//! Session credentials forwarded from the browser and the resolved outcome.
//!
//! The gateway never issues sessions. It carries the caller's cookies to the
//! marketplace API and interprets the answer as a [`SessionResolution`].

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::{Identity, Role};

/// Cookie header value forwarded verbatim to the session endpoint.
///
/// The value is wiped from memory when dropped and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    cookie: Option<Zeroizing<String>>,
}

impl SessionCredentials {
    /// Credentials carrying the given `Cookie` header value.
    ///
    /// Blank headers are treated as absent.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::SessionCredentials;
    ///
    /// let creds = SessionCredentials::from_cookie_header("session=abc");
    /// assert_eq!(creds.cookie_header(), Some("session=abc"));
    /// assert!(SessionCredentials::from_cookie_header("  ").is_empty());
    /// ```
    pub fn from_cookie_header(header: impl Into<String>) -> Self {
        let raw = header.into();
        if raw.trim().is_empty() {
            return Self::none();
        }
        Self {
            cookie: Some(Zeroizing::new(raw)),
        }
    }

    /// Credentials for a request that carried no cookies.
    pub fn none() -> Self {
        Self { cookie: None }
    }

    /// The raw `Cookie` header value, if any.
    pub fn cookie_header(&self) -> Option<&str> {
        self.cookie.as_ref().map(|cookie| cookie.as_str())
    }

    /// Whether there is nothing to forward.
    pub fn is_empty(&self) -> bool {
        self.cookie.is_none()
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Outcome of resolving the caller's session.
///
/// Serialises as `{"authenticated": false}` or
/// `{"authenticated": true, "identity": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResolution {
    /// No session, or the session could not be verified.
    Anonymous,
    /// A live session bound to an identity.
    Authenticated(Identity),
}

impl SessionResolution {
    /// The authenticated identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    /// The recognised role of the authenticated identity, if any.
    pub fn role(&self) -> Option<Role> {
        self.identity().and_then(|identity| identity.role().role())
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResolutionDto<'a> {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity: Option<&'a Identity>,
}

impl Serialize for SessionResolution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        SessionResolutionDto {
            authenticated: self.is_authenticated(),
            identity: self.identity(),
        }
        .serialize(serializer)
    }
}
