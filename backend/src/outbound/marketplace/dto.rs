//! DTOs for the marketplace API wire format.
//!
//! Adapters decode into these transport DTOs first, then map into domain
//! records in one pass. Field names follow the marketplace's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BanStatus, Booking, BookingCounts, BookingRequest, BookingStatus, Identity, Money,
    PlatformOverview, PlatformTotals, RevenueSummary, TutorStats, UserId,
};
use crate::domain::booking::DATE_FORMAT;

/// `{success, message?, data?, error?}` wrapper used by every endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto<T> {
    #[serde(default)]
    pub(super) success: bool,
    pub(super) message: Option<String>,
    pub(super) data: Option<T>,
    pub(super) error: Option<String>,
}

impl<T> EnvelopeDto<T> {
    /// The payload of a successful envelope, or the upstream's explanation.
    pub(super) fn into_data(self) -> Result<T, String> {
        if !self.success {
            return Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| "request was not successful".to_owned()));
        }
        self.data
            .ok_or_else(|| "successful envelope carried no data".to_owned())
    }
}

/// Body of `GET /auth/get-session`; the whole body may also be `null`.
#[derive(Debug, Deserialize)]
pub(super) struct SessionDto {
    pub(super) user: Option<SessionUserDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) email: String,
    #[serde(default)]
    pub(super) role: String,
    #[serde(default)]
    pub(super) email_verified: bool,
    #[serde(default)]
    pub(super) banned: Option<bool>,
    pub(super) ban_reason: Option<String>,
    pub(super) ban_expires: Option<DateTime<Utc>>,
}

impl SessionUserDto {
    pub(super) fn into_identity(self) -> Result<Identity, String> {
        let id = UserId::new(self.id).map_err(|error| format!("session user id: {error}"))?;
        let identity = Identity::new(id, self.name, self.email, self.role)
            .with_email_verified(self.email_verified);
        if self.banned.unwrap_or(false) {
            Ok(identity.with_ban(BanStatus {
                reason: self.ban_reason,
                expires: self.ban_expires,
            }))
        } else {
            Ok(identity)
        }
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateBookingDto<'a> {
    tutor_id: &'a str,
    subject: &'a str,
    date: String,
    start_time: String,
    end_time: String,
    duration: i64,
    price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> From<&'a BookingRequest> for CreateBookingDto<'a> {
    fn from(request: &'a BookingRequest) -> Self {
        Self {
            tutor_id: request.tutor_id(),
            subject: request.subject(),
            date: request.date().format(DATE_FORMAT).to_string(),
            start_time: request.start_time().to_string(),
            end_time: request.end_time().to_string(),
            duration: request.duration_minutes(),
            price: request.price().as_decimal(),
            notes: request.notes(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BookingDto {
    id: String,
    tutor_id: String,
    subject: String,
    date: String,
    start_time: String,
    end_time: String,
    duration: Option<i64>,
    price: f64,
    status: BookingStatus,
}

impl BookingDto {
    pub(super) fn into_domain(self) -> Result<Booking, String> {
        Ok(Booking {
            price: money(self.price, "booking price")?,
            id: self.id,
            tutor_id: self.tutor_id,
            subject: self.subject,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            duration: self.duration,
            status: self.status,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct TutorStatsDto {
    total_bookings: u64,
    confirmed_bookings: u64,
    completed_bookings: u64,
    cancelled_bookings: u64,
    total_earnings: f64,
    rating: f64,
    total_reviews: u64,
    total_sessions: u64,
}

impl TutorStatsDto {
    pub(super) fn into_domain(self) -> Result<TutorStats, String> {
        if !self.rating.is_finite() {
            return Err("tutor rating must be finite".to_owned());
        }
        Ok(TutorStats {
            total_bookings: self.total_bookings,
            confirmed_bookings: self.confirmed_bookings,
            completed_bookings: self.completed_bookings,
            cancelled_bookings: self.cancelled_bookings,
            total_earnings: money(self.total_earnings, "total earnings")?,
            rating: self.rating,
            total_reviews: self.total_reviews,
            total_sessions: self.total_sessions,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PlatformStatsDto {
    overview: PlatformTotalsDto,
    bookings: BookingCountsDto,
    revenue: RevenueDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PlatformTotalsDto {
    total_users: u64,
    total_students: u64,
    total_tutors: u64,
    total_admins: u64,
    total_bookings: u64,
    total_revenue: f64,
    total_categories: u64,
    total_reviews: u64,
    recent_users: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BookingCountsDto {
    total: u64,
    confirmed: u64,
    completed: u64,
    cancelled: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RevenueDto {
    total: f64,
    this_month: f64,
    last_month: f64,
}

impl PlatformStatsDto {
    pub(super) fn into_domain(self) -> Result<PlatformOverview, String> {
        let totals = self.overview;
        Ok(PlatformOverview {
            overview: PlatformTotals {
                total_users: totals.total_users,
                total_students: totals.total_students,
                total_tutors: totals.total_tutors,
                total_admins: totals.total_admins,
                total_bookings: totals.total_bookings,
                total_revenue: money(totals.total_revenue, "total revenue")?,
                total_categories: totals.total_categories,
                total_reviews: totals.total_reviews,
                recent_users: totals.recent_users,
            },
            bookings: BookingCounts {
                total: self.bookings.total,
                confirmed: self.bookings.confirmed,
                completed: self.bookings.completed,
                cancelled: self.bookings.cancelled,
            },
            revenue: RevenueSummary {
                total: money(self.revenue.total, "revenue total")?,
                this_month: money(self.revenue.this_month, "revenue this month")?,
                last_month: money(self.revenue.last_month, "revenue last month")?,
            },
        })
    }
}

fn money(amount: f64, what: &str) -> Result<Money, String> {
    Money::from_decimal(amount).ok_or_else(|| format!("{what} is not a valid amount"))
}
