//! Live booking quotes.
//!
//! ```text
//! POST /api/v1/quote {"startTime":"09:00","endTime":"10:30","hourlyRate":40}
//! ```
//!
//! Quoting needs no session and makes no upstream call. Inverted windows are
//! still priced and flagged as not bookable so the form can show why.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, HourlyRate, Money, QuoteError, TimeOfDay, quote};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/quote`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Start time, `HH:MM`.
    #[schema(example = "09:00")]
    pub start_time: String,
    /// End time, `HH:MM`.
    #[schema(example = "10:30")]
    pub end_time: String,
    /// Tutor's hourly rate.
    #[schema(example = 40.0)]
    pub hourly_rate: f64,
}

/// Response body for `POST /api/v1/quote`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Minutes from start to end; zero or negative for inverted windows.
    #[schema(example = 90)]
    pub duration_minutes: i64,
    /// Price rounded to the cent.
    #[schema(value_type = f64, example = 60.0)]
    pub price: Money,
    /// Whether the window may be submitted as a booking.
    pub bookable: bool,
}

fn parse_time(raw: &str, field: &'static str) -> Result<TimeOfDay, Error> {
    TimeOfDay::parse(raw).map_err(|err| map_quote_error(&err, field))
}

fn map_quote_error(err: &QuoteError, field: &'static str) -> Error {
    let code = match err {
        QuoteError::InvalidTime { .. } => "invalid_time",
        QuoteError::InvalidRate => "invalid_rate",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Price a booking window.
#[utoipa::path(
    post,
    path = "/api/v1/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Quote for the window", body = QuoteResponse),
        (status = 400, description = "Invalid time or rate", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "quoteBooking",
    security([])
)]
#[post("/quote")]
pub async fn quote_booking(payload: web::Json<QuoteRequest>) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let start = parse_time(&request.start_time, "startTime")?;
    let end = parse_time(&request.end_time, "endTime")?;
    let rate =
        HourlyRate::new(request.hourly_rate).map_err(|err| map_quote_error(&err, "hourlyRate"))?;

    let priced = quote::quote(start, end, rate);
    Ok(HttpResponse::Ok().json(QuoteResponse {
        duration_minutes: priced.duration_minutes,
        price: priced.price,
        bookable: priced.is_bookable(),
    }))
}
