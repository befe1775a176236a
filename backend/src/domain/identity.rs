//! Authenticated identities and marketplace roles.
//!
//! Identities are issued and mutated by the marketplace API; the gateway only
//! reads them. Role claims arrive as free-form strings, so anything outside the
//! three marketplace roles is preserved as [`RoleClaim::Unrecognised`] and
//! receives no permissions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing identity values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// The user id was blank.
    EmptyId,
    /// The user id had surrounding whitespace.
    PaddedId,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::PaddedId => write!(f, "user id must not contain surrounding whitespace"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Stable user identifier assigned by the marketplace API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use portal::domain::UserId;
    ///
    /// let id = UserId::new("usr_42").expect("valid id");
    /// assert_eq!(id.as_ref(), "usr_42");
    /// assert!(UserId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let raw = id.into();
        if raw.trim().is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(IdentityValidationError::PaddedId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The three marketplace roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Books sessions and leaves reviews.
    Student,
    /// Publishes a profile and availability.
    Tutor,
    /// Moderates users, bookings and categories.
    Admin,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Self; 3] = [Self::Student, Self::Tutor, Self::Admin];

    /// Wire representation used by the marketplace API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Tutor => "TUTOR",
            Self::Admin => "ADMIN",
        }
    }

    /// Dashboard root the role lands on after login or a forbidden request.
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Student => "/dashboard",
            Self::Tutor => "/tutor-dashboard",
            Self::Admin => "/admin-dashboard",
        }
    }

    /// Parse the wire representation, returning `None` for anything else.
    ///
    /// Matching is exact: the marketplace API emits upper-case role names.
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == raw)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role value carried by an identity.
///
/// # Examples
/// ```
/// use portal::domain::{Role, RoleClaim};
///
/// assert_eq!(RoleClaim::from("TUTOR").role(), Some(Role::Tutor));
/// assert_eq!(RoleClaim::from("MODERATOR").role(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleClaim {
    /// One of the marketplace roles.
    Known(Role),
    /// A role string the gateway does not recognise.
    Unrecognised(String),
}

impl RoleClaim {
    /// The recognised role, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(*role),
            Self::Unrecognised(_) => None,
        }
    }
}

impl From<Role> for RoleClaim {
    fn from(value: Role) -> Self {
        Self::Known(value)
    }
}

impl From<&str> for RoleClaim {
    fn from(value: &str) -> Self {
        match Role::from_wire(value) {
            Some(role) => Self::Known(role),
            None => Self::Unrecognised(value.to_owned()),
        }
    }
}

impl From<String> for RoleClaim {
    fn from(value: String) -> Self {
        match Role::from_wire(&value) {
            Some(role) => Self::Known(role),
            None => Self::Unrecognised(value),
        }
    }
}

impl From<RoleClaim> for String {
    fn from(value: RoleClaim) -> Self {
        match value {
            RoleClaim::Known(role) => role.as_str().to_owned(),
            RoleClaim::Unrecognised(raw) => raw,
        }
    }
}

impl fmt::Display for RoleClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(role) => f.write_str(role.as_str()),
            Self::Unrecognised(raw) => f.write_str(raw),
        }
    }
}

/// Moderation state attached to an identity by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BanStatus {
    /// Reason recorded by the moderator.
    pub reason: Option<String>,
    /// When the ban lapses; `None` means indefinite.
    pub expires: Option<DateTime<Utc>>,
}

/// An authenticated marketplace user.
///
/// ## Invariants
/// - `id` is non-empty and trimmed.
/// - `ban_reason`/`ban_expires` are only populated when `banned` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: UserId,
    name: String,
    email: String,
    role: RoleClaim,
    email_verified: bool,
    banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ban_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ban_expires: Option<DateTime<Utc>>,
}

impl Identity {
    /// Build an identity that is unverified and not banned.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{Identity, Role, UserId};
    ///
    /// let id = UserId::new("usr_1").expect("id");
    /// let identity = Identity::new(id, "Ada", "ada@example.com", Role::Student)
    ///     .with_email_verified(true);
    /// assert_eq!(identity.role().role(), Some(Role::Student));
    /// assert!(identity.email_verified());
    /// ```
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<RoleClaim>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: role.into(),
            email_verified: false,
            banned: false,
            ban_reason: None,
            ban_expires: None,
        }
    }

    /// Record whether the email address has been verified.
    #[must_use]
    pub fn with_email_verified(mut self, verified: bool) -> Self {
        self.email_verified = verified;
        self
    }

    /// Mark the identity as banned.
    #[must_use]
    pub fn with_ban(mut self, ban: BanStatus) -> Self {
        self.banned = true;
        self.ban_reason = ban.reason;
        self.ban_expires = ban.expires;
        self
    }

    /// Marketplace user id.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Role claim as issued by the marketplace API.
    pub fn role(&self) -> &RoleClaim {
        &self.role
    }

    /// Whether the email address has been verified.
    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    /// Current moderation state, if banned.
    pub fn ban(&self) -> Option<BanStatus> {
        self.banned.then(|| BanStatus {
            reason: self.ban_reason.clone(),
            expires: self.ban_expires,
        })
    }
}
