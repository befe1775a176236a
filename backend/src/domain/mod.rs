//! Domain primitives and services.
//!
//! Purpose: model who the caller is, where they may go, what a booking costs
//! and which dashboard they see. Nothing here knows about HTTP; adapters
//! translate at the edges through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Identity, Role, SessionResolution: who is calling.
//! - access::route: pure role-based access decisions.
//! - quote::quote and BookingDraft: pricing and draft validation.
//! - dashboard::compose and PageGate: role-selected views.

pub mod access;
pub mod booking;
pub mod booking_service;
pub mod dashboard;
pub mod dashboard_service;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod page_gate;
pub mod ports;
pub mod quote;
pub mod session;
pub mod session_resolver;
pub mod trace_id;

pub use self::access::{AccessDecision, RedirectReason};
pub use self::booking::{
    Booking, BookingDraft, BookingDraftError, BookingRequest, BookingStatus, DraftField,
    TutorRate,
};
pub use self::booking_service::{BOOKINGS_PAGE, BookingConfirmation, BookingService};
pub use self::dashboard::{
    BookingCounts, Dashboard, DashboardPage, PlatformOverview, PlatformTotals, RevenueSummary,
    StudentOverview, TutorOverview, TutorStats,
};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::identity::{BanStatus, Identity, IdentityValidationError, Role, RoleClaim, UserId};
pub use self::page_gate::{PageGate, ViewState};
pub use self::quote::{HourlyRate, Money, Quote, QuoteError, TimeOfDay};
pub use self::session::{SessionCredentials, SessionResolution};
pub use self::session_resolver::SessionResolver;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
