//! Reqwest-backed dashboard data loaders.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::client::{self, MarketplaceClient, UpstreamFailure};
use super::dto::{BookingDto, EnvelopeDto, PlatformStatsDto, TutorStatsDto};
use crate::domain::ports::{DashboardSource, DashboardSourceError};
use crate::domain::{Booking, PlatformOverview, SessionCredentials, TutorStats};

const STUDENT_BOOKINGS_PATH: &str = "bookings";
const TUTOR_STATS_PATH: &str = "tutors/stats";
const PLATFORM_STATS_PATH: &str = "admin/stats";

/// Dashboard source adapter calling the marketplace read endpoints.
#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: MarketplaceClient,
}

impl HttpDashboardSource {
    /// Wrap a shared marketplace client.
    pub fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }

    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        credentials: &SessionCredentials,
    ) -> Result<T, DashboardSourceError> {
        let request = self
            .client
            .request(Method::GET, path, credentials)
            .map_err(map_failure)?;
        let body = client::send(request).await.map_err(map_failure)?;
        decode_envelope(&body)
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn student_bookings(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<Vec<Booking>, DashboardSourceError> {
        let bookings: Vec<BookingDto> = self.fetch(STUDENT_BOOKINGS_PATH, credentials).await?;
        bookings
            .into_iter()
            .map(BookingDto::into_domain)
            .collect::<Result<_, _>>()
            .map_err(DashboardSourceError::decode)
    }

    async fn tutor_stats(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<TutorStats, DashboardSourceError> {
        let stats: TutorStatsDto = self.fetch(TUTOR_STATS_PATH, credentials).await?;
        stats.into_domain().map_err(DashboardSourceError::decode)
    }

    async fn platform_overview(
        &self,
        credentials: &SessionCredentials,
    ) -> Result<PlatformOverview, DashboardSourceError> {
        let stats: PlatformStatsDto = self.fetch(PLATFORM_STATS_PATH, credentials).await?;
        stats.into_domain().map_err(DashboardSourceError::decode)
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, DashboardSourceError> {
    let envelope: EnvelopeDto<T> = serde_json::from_slice(body).map_err(|error| {
        DashboardSourceError::decode(format!("invalid dashboard JSON payload: {error}"))
    })?;
    envelope.into_data().map_err(DashboardSourceError::transport)
}

fn map_failure(failure: UpstreamFailure) -> DashboardSourceError {
    match failure {
        UpstreamFailure::Transport(message) => DashboardSourceError::transport(message),
        UpstreamFailure::Status { status, message } => {
            DashboardSourceError::transport(format!("status {}: {message}", status.as_u16()))
        }
    }
}
