//! Role-aware gateway for the tutor marketplace.
//!
//! Resolves the caller's marketplace session, guards dashboard pages by
//! role, prices and submits bookings, and composes the dashboard for the
//! caller's role.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
