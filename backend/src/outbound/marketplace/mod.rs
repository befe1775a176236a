//! Marketplace API outbound adapters.
//!
//! Thin reqwest implementations of the session, booking, and dashboard ports.
//! All three share one [`MarketplaceClient`] so they reuse its connection
//! pool and timeout.

mod booking_gateway;
mod client;
mod dashboard_source;
mod dto;
mod session_source;

pub use booking_gateway::HttpBookingGateway;
pub use client::MarketplaceClient;
pub use dashboard_source::HttpDashboardSource;
pub use session_source::HttpSessionSource;
