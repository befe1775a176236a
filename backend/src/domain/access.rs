//! Role-based access decisions for dashboard paths.
//!
//! [`route`] is a pure function of the resolved session and the requested
//! path. Callers resolve the session first and pass it in explicitly; no
//! ambient session state is consulted.
//!
//! Policy, evaluated in order for guarded paths:
//! 1. no identity: redirect to `/login`;
//! 2. unrecognised role: redirect to `/login` (empty permission set);
//! 3. path outside the role's dashboard and `/profile`: redirect to the
//!    role's own dashboard;
//! 4. otherwise allow.
//!
//! Paths outside the guarded set are public and always allowed.

use serde::Serialize;

use super::{Role, SessionResolution};

/// Where unauthenticated callers are sent.
pub const LOGIN_PATH: &str = "/login";

/// Profile page shared by every authenticated role.
pub const PROFILE_PATH: &str = "/profile";

const GUARDED_PREFIXES: [&str; 4] = [
    "/dashboard",
    "/tutor-dashboard",
    "/admin-dashboard",
    PROFILE_PATH,
];

/// Why a request was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// No valid session.
    Unauthenticated,
    /// The session's role claim is not a marketplace role.
    UnrecognisedRole,
    /// Authenticated, but the path belongs to another role.
    Forbidden,
}

/// Outcome of evaluating a path against the caller's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Serve the requested path.
    Allow,
    /// Send the caller elsewhere.
    Redirect {
        /// Redirect target.
        location: &'static str,
        /// Why the caller was redirected.
        reason: RedirectReason,
    },
}

impl AccessDecision {
    /// Redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Redirect { location, .. } => Some(location),
        }
    }
}

/// Decide whether the caller may view `path`.
///
/// # Examples
/// ```
/// use portal::domain::{access, AccessDecision, Identity, Role, SessionResolution, UserId};
///
/// let student = SessionResolution::Authenticated(Identity::new(
///     UserId::new("usr_1").expect("id"),
///     "Sam",
///     "sam@example.com",
///     Role::Student,
/// ));
/// assert_eq!(
///     access::route(&student, "/admin-dashboard/users").location(),
///     Some("/dashboard"),
/// );
/// assert_eq!(access::route(&student, "/profile"), AccessDecision::Allow);
/// ```
pub fn route(resolution: &SessionResolution, path: &str) -> AccessDecision {
    let requested = path_only(path);
    if !is_guarded(requested) {
        return AccessDecision::Allow;
    }

    let Some(identity) = resolution.identity() else {
        return AccessDecision::Redirect {
            location: LOGIN_PATH,
            reason: RedirectReason::Unauthenticated,
        };
    };

    let Some(role) = identity.role().role() else {
        return AccessDecision::Redirect {
            location: LOGIN_PATH,
            reason: RedirectReason::UnrecognisedRole,
        };
    };

    if permitted_prefixes(role)
        .iter()
        .any(|prefix| matches_prefix(requested, prefix))
    {
        AccessDecision::Allow
    } else {
        AccessDecision::Redirect {
            location: role.home_path(),
            reason: RedirectReason::Forbidden,
        }
    }
}

/// Whether the path is subject to role checks.
pub fn is_guarded(path: &str) -> bool {
    let requested = path_only(path);
    GUARDED_PREFIXES
        .iter()
        .any(|prefix| matches_prefix(requested, prefix))
}

fn permitted_prefixes(role: Role) -> [&'static str; 2] {
    [role.home_path(), PROFILE_PATH]
}

/// Segment-aware prefix match: `/dashboard` matches `/dashboard` and
/// `/dashboard/x` but not `/dashboards`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn path_only(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Identity, UserId};
    use rstest::rstest;

    fn signed_in(role: &str) -> SessionResolution {
        SessionResolution::Authenticated(Identity::new(
            UserId::new("usr_access").expect("id"),
            "Access",
            "access@example.com",
            role,
        ))
    }

    fn redirect(location: &'static str, reason: RedirectReason) -> AccessDecision {
        AccessDecision::Redirect { location, reason }
    }

    #[rstest]
    #[case("STUDENT", "/admin-dashboard/users", redirect("/dashboard", RedirectReason::Forbidden))]
    #[case("STUDENT", "/tutor-dashboard", redirect("/dashboard", RedirectReason::Forbidden))]
    #[case("STUDENT", "/dashboard/bookings", AccessDecision::Allow)]
    #[case("TUTOR", "/profile", AccessDecision::Allow)]
    #[case("TUTOR", "/dashboard", redirect("/tutor-dashboard", RedirectReason::Forbidden))]
    #[case("TUTOR", "/tutor-dashboard/availability", AccessDecision::Allow)]
    #[case("ADMIN", "/tutor-dashboard/profile", redirect("/admin-dashboard", RedirectReason::Forbidden))]
    #[case("ADMIN", "/admin-dashboard/categories", AccessDecision::Allow)]
    #[case("ADMIN", "/profile", AccessDecision::Allow)]
    #[case("MODERATOR", "/dashboard", redirect("/login", RedirectReason::UnrecognisedRole))]
    #[case("MODERATOR", "/profile", redirect("/login", RedirectReason::UnrecognisedRole))]
    fn routes_authenticated_callers(
        #[case] role: &str,
        #[case] path: &str,
        #[case] expected: AccessDecision,
    ) {
        assert_eq!(route(&signed_in(role), path), expected);
    }

    #[rstest]
    #[case("/dashboard")]
    #[case("/tutor-dashboard/profile")]
    #[case("/admin-dashboard")]
    #[case("/profile")]
    fn anonymous_callers_go_to_login(#[case] path: &str) {
        assert_eq!(
            route(&SessionResolution::Anonymous, path),
            redirect(LOGIN_PATH, RedirectReason::Unauthenticated)
        );
    }

    #[rstest]
    #[case("/")]
    #[case("/tutors/abc")]
    #[case("/dashboards")]
    #[case("/login")]
    fn public_paths_are_always_allowed(#[case] path: &str) {
        assert_eq!(route(&SessionResolution::Anonymous, path), AccessDecision::Allow);
        assert_eq!(route(&signed_in("STUDENT"), path), AccessDecision::Allow);
    }

    #[test]
    fn query_and_fragment_do_not_affect_the_decision() {
        let student = signed_in("STUDENT");
        assert_eq!(
            route(&student, "/admin-dashboard?tab=users#top"),
            redirect("/dashboard", RedirectReason::Forbidden)
        );
        assert_eq!(route(&student, "/dashboard/?page=2"), AccessDecision::Allow);
    }

    #[test]
    fn decisions_are_deterministic() {
        let paths = [
            "/",
            "/dashboard",
            "/dashboard/tutors",
            "/tutor-dashboard",
            "/admin-dashboard/users",
            "/profile",
            "/profile/edit",
        ];
        let resolutions = [
            SessionResolution::Anonymous,
            signed_in("STUDENT"),
            signed_in("TUTOR"),
            signed_in("ADMIN"),
            signed_in("GUEST"),
        ];
        for resolution in &resolutions {
            for path in paths {
                let first = route(resolution, path);
                let second = route(resolution, path);
                assert_eq!(first, second, "{path} should route the same way twice");
            }
        }
    }

    #[test]
    fn serialises_redirect_with_tag() {
        let value = serde_json::to_value(redirect("/dashboard", RedirectReason::Forbidden))
            .expect("serialise decision");
        assert_eq!(
            value,
            serde_json::json!({
                "decision": "redirect",
                "location": "/dashboard",
                "reason": "forbidden"
            })
        );
    }
}
