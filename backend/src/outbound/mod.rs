//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **marketplace**: reqwest-backed clients for the marketplace API that
//!   owns sessions, bookings and statistics.
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

pub mod marketplace;
