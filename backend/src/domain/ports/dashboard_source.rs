//! Driven port for the data each dashboard variant loads on mount.
//!
//! One method per variant keeps the composer honest: only the selected
//! variant's loader is ever awaited.

use async_trait::async_trait;

use crate::domain::{Booking, PlatformOverview, SessionCredentials, TutorStats};

use super::define_port_error;

define_port_error! {
    /// Errors raised by dashboard data adapters.
    pub enum DashboardSourceError {
        /// The marketplace API could not be reached or failed.
        Transport { message: String } =>
            "dashboard data unavailable: {message}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "dashboard data invalid: {message}",
    }
}

/// Port for loading role-specific dashboard data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Bookings belonging to the calling student.
    async fn student_bookings(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<Vec<Booking>, DashboardSourceError>;

    /// Teaching statistics for the calling tutor.
    async fn tutor_stats(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<TutorStats, DashboardSourceError>;

    /// Platform-wide counters for administrators.
    async fn platform_overview(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<PlatformOverview, DashboardSourceError>;
}

/// Fixture source returning empty data for every variant.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDashboardSource;

#[async_trait]
impl DashboardSource for FixtureDashboardSource {
    async fn student_bookings(
        &self,
        _credentials: &SessionCredentials,
    ) -> Result<Vec<Booking>, DashboardSourceError> {
        Ok(Vec::new())
    }

    async fn tutor_stats(
        &self,
        _credentials: &SessionCredentials,
    ) -> Result<TutorStats, DashboardSourceError> {
        Ok(TutorStats::default())
    }

    async fn platform_overview(
        &self,
        _credentials: &SessionCredentials,
    ) -> Result<PlatformOverview, DashboardSourceError> {
        Ok(PlatformOverview::default())
    }
}
