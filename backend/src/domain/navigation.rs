//! Static sidebar navigation, one canonical table per role.
//!
//! Tables are configuration, not state: they never change at runtime and an
//! unrecognised role gets no sections at all.

use serde::Serialize;

use super::Role;

/// A single link in the dashboard sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Link label.
    pub title: &'static str,
    /// Target path.
    pub url: &'static str,
}

/// A labelled group of sidebar links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// Group label.
    pub title: &'static str,
    /// Links in display order.
    pub items: &'static [NavItem],
}

const HOME: NavItem = NavItem {
    title: "Home",
    url: "/",
};

static STUDENT_SECTIONS: [NavSection; 1] = [NavSection {
    title: "Student Dashboard",
    items: &[
        NavItem {
            title: "Dashboard",
            url: "/dashboard",
        },
        NavItem {
            title: "Browse Tutor",
            url: "/dashboard/tutors",
        },
        NavItem {
            title: "My Bookings",
            url: "/dashboard/bookings",
        },
        NavItem {
            title: "My Reviews",
            url: "/dashboard/reviews",
        },
        NavItem {
            title: "Profile",
            url: "/dashboard/profile",
        },
        HOME,
    ],
}];

static TUTOR_SECTIONS: [NavSection; 1] = [NavSection {
    title: "Tutor Dashboard",
    items: &[
        NavItem {
            title: "Dashboard",
            url: "/tutor-dashboard",
        },
        NavItem {
            title: "Create Profile",
            url: "/tutor-dashboard/profile",
        },
        NavItem {
            title: "Set Availability",
            url: "/tutor-dashboard/availability",
        },
        HOME,
    ],
}];

static ADMIN_SECTIONS: [NavSection; 1] = [NavSection {
    title: "Admin Management",
    items: &[
        NavItem {
            title: "Admin Dashboard",
            url: "/admin-dashboard",
        },
        NavItem {
            title: "Users Management",
            url: "/admin-dashboard/users",
        },
        NavItem {
            title: "All Bookings",
            url: "/admin-dashboard/bookings",
        },
        NavItem {
            title: "Categories",
            url: "/admin-dashboard/categories",
        },
        HOME,
    ],
}];

/// Sidebar sections for the role; empty when there is no recognised role.
///
/// # Examples
/// ```
/// use portal::domain::{navigation, Role};
///
/// let sections = navigation::sections_for(Some(Role::Tutor));
/// assert_eq!(sections[0].items[0].url, "/tutor-dashboard");
/// assert!(navigation::sections_for(None).is_empty());
/// ```
pub fn sections_for(role: Option<Role>) -> &'static [NavSection] {
    match role {
        Some(Role::Student) => &STUDENT_SECTIONS,
        Some(Role::Tutor) => &TUTOR_SECTIONS,
        Some(Role::Admin) => &ADMIN_SECTIONS,
        None => &[],
    }
}
