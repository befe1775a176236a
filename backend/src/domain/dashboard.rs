//! Role-selected dashboard composition.
//!
//! A dashboard page is exactly one of three variants. [`compose`] receives a
//! constructor per variant and only ever calls the one matching the role, so
//! the loaders behind the other two never run.

use serde::Serialize;

use super::{Booking, BookingStatus, Money, Role};

/// How many upcoming sessions the student overview lists.
pub const UPCOMING_LIMIT: usize = 5;

/// One dashboard variant per marketplace role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "data", rename_all = "camelCase")]
pub enum Dashboard<S, T, A> {
    /// Student view.
    Student(S),
    /// Tutor view.
    Tutor(T),
    /// Administrator view.
    Admin(A),
}

impl<S, T, A> Dashboard<S, T, A> {
    /// The role this variant belongs to.
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Tutor(_) => Role::Tutor,
            Self::Admin(_) => Role::Admin,
        }
    }
}

/// Lazy constructors for each variant.
#[derive(Debug, Clone, Copy)]
pub struct DashboardVariants<FS, FT, FA> {
    /// Builds the student variant.
    pub student: FS,
    /// Builds the tutor variant.
    pub tutor: FT,
    /// Builds the administrator variant.
    pub admin: FA,
}

/// Construct the variant for `role`, or nothing when the role is missing.
///
/// # Examples
/// ```
/// use portal::domain::dashboard::{compose, Dashboard, DashboardVariants};
/// use portal::domain::Role;
///
/// let page: Option<Dashboard<&str, &str, &str>> = compose(
///     Some(Role::Tutor),
///     DashboardVariants {
///         student: || unreachable!("student view is not selected"),
///         tutor: || "tutor",
///         admin: || unreachable!("admin view is not selected"),
///     },
/// );
/// assert_eq!(page, Some(Dashboard::Tutor("tutor")));
/// ```
pub fn compose<S, T, A, FS, FT, FA>(
    role: Option<Role>,
    variants: DashboardVariants<FS, FT, FA>,
) -> Option<Dashboard<S, T, A>>
where
    FS: FnOnce() -> S,
    FT: FnOnce() -> T,
    FA: FnOnce() -> A,
{
    let page = match role? {
        Role::Student => Dashboard::Student((variants.student)()),
        Role::Tutor => Dashboard::Tutor((variants.tutor)()),
        Role::Admin => Dashboard::Admin((variants.admin)()),
    };
    Some(page)
}

/// Booking totals and upcoming sessions for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOverview {
    /// Every booking the student holds.
    pub total_bookings: usize,
    /// Confirmed bookings not yet held.
    pub upcoming_bookings: usize,
    /// Bookings already held.
    pub completed_bookings: usize,
    /// Sum of prices of completed bookings.
    pub total_spent: Money,
    /// Earliest confirmed bookings, at most [`UPCOMING_LIMIT`].
    pub upcoming: Vec<Booking>,
}

impl StudentOverview {
    /// Summarise the student's bookings.
    pub fn from_bookings(bookings: Vec<Booking>) -> Self {
        let total_bookings = bookings.len();
        let completed: Vec<&Booking> = bookings
            .iter()
            .filter(|booking| booking.status == BookingStatus::Completed)
            .collect();
        let completed_bookings = completed.len();
        let total_spent = completed
            .iter()
            .fold(Money::ZERO, |sum, booking| sum.saturating_add(booking.price));

        let mut upcoming: Vec<Booking> = bookings
            .into_iter()
            .filter(|booking| booking.status == BookingStatus::Confirmed)
            .collect();
        let upcoming_bookings = upcoming.len();
        upcoming.sort_by(|left, right| left.date.cmp(&right.date));
        upcoming.truncate(UPCOMING_LIMIT);

        Self {
            total_bookings,
            upcoming_bookings,
            completed_bookings,
            total_spent,
            upcoming,
        }
    }
}

/// Teaching statistics reported for a tutor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorStats {
    /// All bookings.
    pub total_bookings: u64,
    /// Bookings not yet held.
    pub confirmed_bookings: u64,
    /// Bookings held.
    pub completed_bookings: u64,
    /// Bookings called off.
    pub cancelled_bookings: u64,
    /// Earnings from completed sessions.
    pub total_earnings: Money,
    /// Average review rating.
    pub rating: f64,
    /// Number of reviews.
    pub total_reviews: u64,
    /// Number of sessions taught.
    pub total_sessions: u64,
}

/// Tutor dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorOverview {
    /// Statistics, zeroed when they could not be loaded.
    pub stats: TutorStats,
    /// False when `stats` is the zeroed fallback.
    pub stats_available: bool,
}

/// Platform-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTotals {
    /// Registered users.
    pub total_users: u64,
    /// Registered students.
    pub total_students: u64,
    /// Registered tutors.
    pub total_tutors: u64,
    /// Registered administrators.
    pub total_admins: u64,
    /// All bookings.
    pub total_bookings: u64,
    /// Revenue across all bookings.
    pub total_revenue: Money,
    /// Subject categories.
    pub total_categories: u64,
    /// Reviews left.
    pub total_reviews: u64,
    /// Users who joined recently.
    pub recent_users: u64,
}

/// Booking counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookingCounts {
    /// All bookings.
    pub total: u64,
    /// Not yet held.
    pub confirmed: u64,
    /// Held.
    pub completed: u64,
    /// Called off.
    pub cancelled: u64,
}

/// Revenue over recent periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// All-time revenue.
    pub total: Money,
    /// Revenue this calendar month.
    pub this_month: Money,
    /// Revenue last calendar month.
    pub last_month: Money,
}

/// Administrator dashboard payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformOverview {
    /// Headline totals.
    pub overview: PlatformTotals,
    /// Booking counts.
    pub bookings: BookingCounts,
    /// Revenue figures.
    pub revenue: RevenueSummary,
}

/// A fully loaded dashboard page.
pub type DashboardPage = Dashboard<StudentOverview, TutorOverview, PlatformOverview>;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::cell::Cell;

    use super::*;
    use rstest::rstest;

    fn booking(id: &str, date: &str, status: BookingStatus, cents: i64) -> Booking {
        Booking {
            id: id.into(),
            tutor_id: "tut_1".into(),
            subject: "Physics".into(),
            date: date.into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            duration: Some(60),
            price: Money::from_cents(cents),
            status,
        }
    }

    #[rstest]
    #[case(Some(Role::Student), Some(Role::Student))]
    #[case(Some(Role::Tutor), Some(Role::Tutor))]
    #[case(Some(Role::Admin), Some(Role::Admin))]
    #[case(None, None)]
    fn constructs_only_the_selected_variant(
        #[case] role: Option<Role>,
        #[case] expected: Option<Role>,
    ) {
        let calls = Cell::new(0_u8);
        let page = compose(
            role,
            DashboardVariants {
                student: || calls.set(calls.get() + 1),
                tutor: || calls.set(calls.get() + 1),
                admin: || calls.set(calls.get() + 1),
            },
        );
        assert_eq!(page.as_ref().map(Dashboard::role), expected);
        assert_eq!(calls.get(), u8::from(expected.is_some()));
    }

    #[test]
    fn student_overview_counts_and_orders() {
        let bookings = vec![
            booking("b1", "2026-05-03", BookingStatus::Confirmed, 4_000),
            booking("b2", "2026-04-01", BookingStatus::Completed, 2_500),
            booking("b3", "2026-05-01", BookingStatus::Confirmed, 4_000),
            booking("b4", "2026-04-02", BookingStatus::Completed, 1_250),
            booking("b5", "2026-04-03", BookingStatus::Cancelled, 9_999),
        ];
        let overview = StudentOverview::from_bookings(bookings);
        assert_eq!(overview.total_bookings, 5);
        assert_eq!(overview.upcoming_bookings, 2);
        assert_eq!(overview.completed_bookings, 2);
        assert_eq!(overview.total_spent, Money::from_cents(3_750));
        let ids: Vec<&str> = overview.upcoming.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b3", "b1"]);
    }

    #[test]
    fn student_overview_caps_upcoming_list() {
        let bookings = (1..=8)
            .map(|day| {
                booking(
                    &format!("b{day}"),
                    &format!("2026-06-{day:02}"),
                    BookingStatus::Confirmed,
                    1_000,
                )
            })
            .collect();
        let overview = StudentOverview::from_bookings(bookings);
        assert_eq!(overview.upcoming_bookings, 8);
        assert_eq!(overview.upcoming.len(), UPCOMING_LIMIT);
    }

    #[test]
    fn serialises_with_variant_tag() {
        let page: Dashboard<(), TutorOverview, ()> = Dashboard::Tutor(TutorOverview {
            stats: TutorStats::default(),
            stats_available: false,
        });
        let value = serde_json::to_value(&page).expect("serialise");
        assert_eq!(value["variant"], "tutor");
        assert_eq!(value["data"]["statsAvailable"], false);
        assert_eq!(value["data"]["stats"]["totalEarnings"], serde_json::json!(0.0));
    }
}
