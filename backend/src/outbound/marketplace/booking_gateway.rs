//! Reqwest-backed booking creation against `POST /bookings`.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::client::{self, MarketplaceClient, UpstreamFailure};
use super::dto::{BookingDto, CreateBookingDto, EnvelopeDto};
use crate::domain::ports::{BookingGateway, BookingGatewayError};
use crate::domain::{Booking, BookingRequest, SessionCredentials};

const BOOKINGS_PATH: &str = "bookings";

/// Booking gateway adapter calling the marketplace bookings endpoint.
#[derive(Debug, Clone)]
pub struct HttpBookingGateway {
    client: MarketplaceClient,
}

impl HttpBookingGateway {
    /// Wrap a shared marketplace client.
    pub fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn create_booking(
        &self,
        credentials: &SessionCredentials,
        request: &BookingRequest,
    ) -> Result<Booking, BookingGatewayError> {
        let http_request = self
            .client
            .request(Method::POST, BOOKINGS_PATH, credentials)
            .map_err(map_failure)?
            .json(&CreateBookingDto::from(request));
        let body = client::send(http_request).await.map_err(map_failure)?;
        parse_booking(&body)
    }
}

fn parse_booking(body: &[u8]) -> Result<Booking, BookingGatewayError> {
    let envelope: EnvelopeDto<BookingDto> = serde_json::from_slice(body).map_err(|error| {
        BookingGatewayError::decode(format!("invalid booking JSON payload: {error}"))
    })?;
    envelope
        .into_data()
        .map_err(BookingGatewayError::rejected)?
        .into_domain()
        .map_err(BookingGatewayError::decode)
}

fn map_failure(failure: UpstreamFailure) -> BookingGatewayError {
    match failure {
        UpstreamFailure::Transport(message) => BookingGatewayError::transport(message),
        UpstreamFailure::Status { status, message } => match status {
            StatusCode::UNAUTHORIZED => BookingGatewayError::unauthorized(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
                BookingGatewayError::transport(message)
            }
            _ if status.is_client_error() => BookingGatewayError::rejected(message),
            _ => BookingGatewayError::transport(message),
        },
    }
}
