//! Domain ports for the hexagonal boundary.
//!
//! Each driven port exposes a strongly typed error enum so adapters map
//! transport failures into predictable variants. Domain services decide what
//! those variants mean for the caller.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_gateway;
mod dashboard_source;
mod session_source;

#[cfg(test)]
pub use booking_gateway::MockBookingGateway;
pub use booking_gateway::{BookingGateway, BookingGatewayError, FixtureBookingGateway};
#[cfg(test)]
pub use dashboard_source::MockDashboardSource;
pub use dashboard_source::{DashboardSource, DashboardSourceError, FixtureDashboardSource};
#[cfg(test)]
pub use session_source::MockSessionSource;
pub use session_source::{FixtureSessionSource, SessionSource, SessionSourceError};
