//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    BookingGateway, DashboardSource, FixtureBookingGateway, FixtureDashboardSource,
    FixtureSessionSource, SessionSource,
};
use crate::domain::{BookingService, DashboardService, SessionResolver};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Upstream session lookup.
    pub sessions: Arc<dyn SessionSource>,
    /// Upstream booking creation.
    pub bookings: Arc<dyn BookingGateway>,
    /// Upstream dashboard data.
    pub dashboards: Arc<dyn DashboardSource>,
}

impl HttpStatePorts {
    /// Fixture ports: anonymous sessions, accepting gateway, empty dashboards.
    pub fn fixture() -> Self {
        Self {
            sessions: Arc::new(FixtureSessionSource::anonymous()),
            bookings: Arc::new(FixtureBookingGateway),
            dashboards: Arc::new(FixtureDashboardSource),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Fail-closed session resolution.
    pub sessions: SessionResolver,
    /// Draft validation and submission.
    pub bookings: BookingService,
    /// Role-selected dashboard loading.
    pub dashboards: DashboardService,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, Arc::new(DefaultClock))
    }
}

impl HttpState {
    /// Construct state from a ports bundle and a clock.
    ///
    /// The clock supplies "today" for booking date checks.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use portal::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::fixture(), Arc::new(DefaultClock));
    /// let _resolver = state.sessions.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, clock: Arc<dyn Clock>) -> Self {
        let sessions = SessionResolver::new(ports.sessions);
        Self {
            bookings: BookingService::new(ports.bookings, sessions.clone(), clock),
            dashboards: DashboardService::new(ports.dashboards),
            sessions,
        }
    }
}
