//! OpenAPI schema definitions for domain types.
//!
//! Domain types other than [`crate::domain::Error`] do not derive
//! `ToSchema`. The wrappers here mirror their serialised shape so the
//! generated document stays accurate while the domain stays free of utoipa.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    /// Books sessions.
    #[schema(rename = "STUDENT")]
    Student,
    /// Teaches sessions.
    #[schema(rename = "TUTOR")]
    Tutor,
    /// Operates the platform.
    #[schema(rename = "ADMIN")]
    Admin,
}

/// OpenAPI schema for [`crate::domain::Identity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Identity)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdentitySchema {
    #[schema(example = "usr_01HZY8B2W6")]
    id: String,
    #[schema(example = "Sam Student")]
    name: String,
    #[schema(example = "sam@example.com")]
    email: String,
    /// Role claim as issued upstream; unknown values pass through verbatim.
    #[schema(example = "STUDENT")]
    role: String,
    email_verified: bool,
    banned: bool,
    ban_reason: Option<String>,
    ban_expires: Option<String>,
}

/// OpenAPI schema for [`crate::domain::SessionResolution`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SessionResolution)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SessionResolutionSchema {
    /// Whether a live session was found.
    authenticated: bool,
    /// Present only when authenticated.
    identity: Option<IdentitySchema>,
}

/// OpenAPI schema for [`crate::domain::RedirectReason`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RedirectReason)]
pub enum RedirectReasonSchema {
    /// No valid session.
    #[schema(rename = "unauthenticated")]
    Unauthenticated,
    /// The role claim is not a marketplace role.
    #[schema(rename = "unrecognised_role")]
    UnrecognisedRole,
    /// The path belongs to another role.
    #[schema(rename = "forbidden")]
    Forbidden,
}

/// OpenAPI schema for [`crate::domain::AccessDecision`].
///
/// `decision` is `allow` or `redirect`; redirects carry `location` and
/// `reason`.
#[derive(ToSchema)]
#[schema(as = crate::domain::AccessDecision)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AccessDecisionSchema {
    #[schema(example = "redirect")]
    decision: String,
    #[schema(example = "/login")]
    location: Option<String>,
    reason: Option<RedirectReasonSchema>,
}

/// OpenAPI schema for [`crate::domain::navigation::NavItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::navigation::NavItem)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NavItemSchema {
    #[schema(example = "My Bookings")]
    title: String,
    #[schema(example = "/dashboard/bookings")]
    url: String,
}

/// OpenAPI schema for [`crate::domain::navigation::NavSection`].
#[derive(ToSchema)]
#[schema(as = crate::domain::navigation::NavSection)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NavSectionSchema {
    #[schema(example = "Learning")]
    title: String,
    items: Vec<NavItemSchema>,
}

/// OpenAPI schema for [`crate::domain::BookingStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BookingStatus)]
pub enum BookingStatusSchema {
    /// Scheduled and not yet held.
    #[schema(rename = "CONFIRMED")]
    Confirmed,
    /// Held.
    #[schema(rename = "COMPLETED")]
    Completed,
    /// Called off.
    #[schema(rename = "CANCELLED")]
    Cancelled,
}

/// OpenAPI schema for [`crate::domain::Booking`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Booking)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookingSchema {
    id: String,
    tutor_id: String,
    subject: String,
    #[schema(example = "2026-03-04")]
    date: String,
    #[schema(example = "09:00")]
    start_time: String,
    #[schema(example = "10:30")]
    end_time: String,
    #[schema(example = 90)]
    duration: Option<i64>,
    #[schema(example = 60.0)]
    price: f64,
    status: BookingStatusSchema,
}

/// OpenAPI schema for [`crate::domain::BookingConfirmation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BookingConfirmation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookingConfirmationSchema {
    booking: BookingSchema,
    /// Where the client should go next.
    #[schema(example = "/dashboard/bookings")]
    next: String,
}
