//! HTTP inbound adapter exposing the gateway's REST endpoints and pages.

pub mod bookings;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod pages;
pub mod quotes;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
