//! Loads the dashboard variant for the caller's role.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use super::dashboard::{self, DashboardPage, DashboardVariants};
use super::ports::{DashboardSource, DashboardSourceError};
use super::{
    Dashboard, Error, Role, SessionCredentials, StudentOverview, TutorOverview, TutorStats,
};

/// Composes dashboard pages from the dashboard data port.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DashboardSource>,
}

impl DashboardService {
    /// Create a service over the given data source.
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        Self { source }
    }

    /// Load the page for `role`. `None` when there is no role to show.
    ///
    /// Only the selected variant's data is requested. Tutor statistics fall
    /// back to zeroes when they cannot be loaded; student and administrator
    /// data failures surface as `service_unavailable`.
    pub async fn load(
        &self,
        role: Option<Role>,
        credentials: &SessionCredentials,
    ) -> Result<Option<DashboardPage>, Error> {
        let pending = dashboard::compose(
            role,
            DashboardVariants {
                student: || self.source.student_bookings(credentials),
                tutor: || self.source.tutor_stats(credentials),
                admin: || self.source.platform_overview(credentials),
            },
        );

        let page = match pending {
            None => return Ok(None),
            Some(Dashboard::Student(loading)) => {
                let bookings = loading.await.map_err(|err| unavailable("bookings", err))?;
                Dashboard::Student(StudentOverview::from_bookings(bookings))
            }
            Some(Dashboard::Tutor(loading)) => Dashboard::Tutor(match loading.await {
                Ok(stats) => TutorOverview {
                    stats,
                    stats_available: true,
                },
                Err(error) => {
                    warn!(%error, "tutor stats unavailable; showing zeroed stats");
                    TutorOverview {
                        stats: TutorStats::default(),
                        stats_available: false,
                    }
                }
            }),
            Some(Dashboard::Admin(loading)) => {
                let overview = loading
                    .await
                    .map_err(|err| unavailable("platform statistics", err))?;
                Dashboard::Admin(overview)
            }
        };
        Ok(Some(page))
    }
}

fn unavailable(what: &str, error: DashboardSourceError) -> Error {
    warn!(%error, "{what} unavailable");
    Error::service_unavailable(format!("{what} are temporarily unavailable"))
        .with_details(json!({ "retryable": true }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockDashboardSource;
    use crate::domain::{ErrorCode, Money, PlatformOverview};
    use rstest::{fixture, rstest};

    #[fixture]
    fn credentials() -> SessionCredentials {
        SessionCredentials::from_cookie_header("session=abc")
    }

    #[rstest]
    #[tokio::test]
    async fn student_loads_only_bookings(credentials: SessionCredentials) {
        let mut source = MockDashboardSource::new();
        source
            .expect_student_bookings()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        source.expect_tutor_stats().times(0);
        source.expect_platform_overview().times(0);

        let page = DashboardService::new(Arc::new(source))
            .load(Some(Role::Student), &credentials)
            .await
            .expect("page loads");
        assert!(matches!(page, Some(Dashboard::Student(ref o)) if o.total_bookings == 0));
    }

    #[rstest]
    #[tokio::test]
    async fn tutor_stats_fall_back_to_zero(credentials: SessionCredentials) {
        let mut source = MockDashboardSource::new();
        source.expect_student_bookings().times(0);
        source
            .expect_tutor_stats()
            .times(1)
            .returning(|_| Err(DashboardSourceError::transport("404 Profile not found")));
        source.expect_platform_overview().times(0);

        let page = DashboardService::new(Arc::new(source))
            .load(Some(Role::Tutor), &credentials)
            .await
            .expect("page loads");
        assert_eq!(
            page,
            Some(Dashboard::Tutor(TutorOverview {
                stats: TutorStats::default(),
                stats_available: false,
            }))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn admin_overview_is_passed_through(credentials: SessionCredentials) {
        let mut overview = PlatformOverview::default();
        overview.overview.total_users = 42;
        overview.revenue.total = Money::from_cents(123_400);
        let expected = overview;

        let mut source = MockDashboardSource::new();
        source.expect_student_bookings().times(0);
        source.expect_tutor_stats().times(0);
        source
            .expect_platform_overview()
            .times(1)
            .returning(move |_| Ok(overview));

        let page = DashboardService::new(Arc::new(source))
            .load(Some(Role::Admin), &credentials)
            .await
            .expect("page loads");
        assert_eq!(page, Some(Dashboard::Admin(expected)));
    }

    #[rstest]
    #[tokio::test]
    async fn student_failures_are_retryable(credentials: SessionCredentials) {
        let mut source = MockDashboardSource::new();
        source
            .expect_student_bookings()
            .times(1)
            .returning(|_| Err(DashboardSourceError::decode("bad json")));

        let error = DashboardService::new(Arc::new(source))
            .load(Some(Role::Student), &credentials)
            .await
            .expect_err("bookings unavailable");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_role_loads_nothing(credentials: SessionCredentials) {
        let mut source = MockDashboardSource::new();
        source.expect_student_bookings().times(0);
        source.expect_tutor_stats().times(0);
        source.expect_platform_overview().times(0);

        let page = DashboardService::new(Arc::new(source))
            .load(None, &credentials)
            .await
            .expect("empty state");
        assert!(page.is_none());
    }
}
