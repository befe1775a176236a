//! Booking submission.
//!
//! ```text
//! POST /api/v1/bookings {"tutorId":"tut_1","hourlyRate":40,"subject":"Maths",
//!                        "date":"2026-03-04","startTime":"09:00","endTime":"10:30"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{BookingDraft, Error, HourlyRate, SessionCredentials, TutorRate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::BookingConfirmationSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/bookings`.
///
/// Draft fields default to empty so missing values surface as field-level
/// validation errors rather than JSON errors.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Tutor profile identifier.
    #[schema(example = "tut_1")]
    #[serde(default)]
    pub tutor_id: String,
    /// Tutor's advertised hourly rate.
    #[schema(example = 40.0)]
    pub hourly_rate: f64,
    /// Subject of the session.
    #[schema(example = "Maths")]
    #[serde(default)]
    pub subject: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[schema(example = "2026-03-04")]
    #[serde(default)]
    pub date: String,
    /// Start time, `HH:MM`.
    #[schema(example = "09:00")]
    #[serde(default)]
    pub start_time: String,
    /// End time, `HH:MM`.
    #[schema(example = "10:30")]
    #[serde(default)]
    pub end_time: String,
    /// Optional notes for the tutor; blank notes are dropped.
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateBookingRequest {
    fn into_parts(self) -> Result<(TutorRate, BookingDraft), Error> {
        let hourly_rate = HourlyRate::new(self.hourly_rate).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "hourlyRate", "code": "invalid_rate" }))
        })?;
        let tutor = TutorRate {
            tutor_id: self.tutor_id,
            hourly_rate,
        };
        let draft = BookingDraft {
            subject: self.subject,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            notes: self.notes,
        };
        Ok((tutor, draft))
    }
}

/// Validate a booking draft and create it on the caller's behalf.
///
/// Validation happens before any upstream call, so an invalid draft never
/// reaches the marketplace.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingConfirmationSchema),
        (status = 400, description = "Invalid draft or rejected by the marketplace", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Caller is not a student", body = Error),
        (status = 503, description = "Marketplace unavailable; retryable", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    credentials: SessionCredentials,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let (tutor, draft) = payload.into_inner().into_parts()?;
    let confirmation = state.bookings.submit(&credentials, &tutor, &draft).await?;
    Ok(HttpResponse::Created().json(confirmation))
}
