//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and role-based page access.

pub mod guard;
pub mod trace;

pub use guard::RoleGuard;
pub use trace::Trace;
