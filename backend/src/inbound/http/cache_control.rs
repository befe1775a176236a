//! Cache-control policies shared by handlers, pages and probes.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Session-dependent responses must be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Probe responses must never be cached.
pub const NO_STORE: &str = "no-store";

/// Header tuple for responses that depend on the caller's session.
pub const fn private_no_cache_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Header tuple for health probe responses.
pub const fn no_store_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, NO_STORE)
}
