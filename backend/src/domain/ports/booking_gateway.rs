//! Driven port for creating bookings in the marketplace API.

use async_trait::async_trait;

use crate::domain::{Booking, BookingRequest, BookingStatus, SessionCredentials};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking gateway adapters.
    pub enum BookingGatewayError {
        /// The marketplace API could not be reached, timed out, or failed
        /// with a server error. The caller may resubmit.
        Transport { message: String } =>
            "booking endpoint unavailable: {message}",
        /// The marketplace API refused the session.
        Unauthorized { message: String } =>
            "booking endpoint rejected the session: {message}",
        /// The marketplace API rejected the booking payload.
        Rejected { message: String } =>
            "booking rejected: {message}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "booking response invalid: {message}",
    }
}

/// Port for submitting validated booking requests upstream.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Create a booking on behalf of the session owner.
    async fn create_booking(
        &self,
        credentials: &SessionCredentials,
        request: &BookingRequest,
    ) -> Result<Booking, BookingGatewayError>;
}

/// Fixture gateway that accepts every request as a confirmed booking.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingGateway;

#[async_trait]
impl BookingGateway for FixtureBookingGateway {
    async fn create_booking(
        &self,
        _credentials: &SessionCredentials,
        request: &BookingRequest,
    ) -> Result<Booking, BookingGatewayError> {
        Ok(Booking {
            id: "bk_fixture".to_owned(),
            tutor_id: request.tutor_id().to_owned(),
            subject: request.subject().to_owned(),
            date: request.date().format(crate::domain::booking::DATE_FORMAT).to_string(),
            start_time: request.start_time().to_string(),
            end_time: request.end_time().to_string(),
            duration: Some(request.duration_minutes()),
            price: request.price(),
            status: BookingStatus::Confirmed,
        })
    }
}
