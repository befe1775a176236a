//! Booking submission.
//!
//! The draft is validated before anything touches the network. Only a valid
//! draft triggers session resolution, and only a student session reaches the
//! booking gateway.

use std::sync::Arc;

use mockable::Clock;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::ports::{BookingGateway, BookingGatewayError};
use super::{
    Booking, BookingDraft, BookingDraftError, Error, Role, SessionCredentials, SessionResolver,
    TutorRate,
};

/// Where a student lands after booking.
pub const BOOKINGS_PAGE: &str = "/dashboard/bookings";

/// A created booking and the page to show next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    /// The booking echoed by the marketplace API.
    pub booking: Booking,
    /// Follow-up location.
    pub next: &'static str,
}

/// Validates drafts and forwards them to the booking gateway.
#[derive(Clone)]
pub struct BookingService {
    gateway: Arc<dyn BookingGateway>,
    resolver: SessionResolver,
    clock: Arc<dyn Clock>,
}

impl BookingService {
    /// Create a service over the gateway, resolver and clock.
    pub fn new(
        gateway: Arc<dyn BookingGateway>,
        resolver: SessionResolver,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            resolver,
            clock,
        }
    }

    /// Validate `draft` for `tutor` and submit it on the caller's behalf.
    ///
    /// # Errors
    /// - `invalid_request` when the draft is incomplete or inconsistent, or
    ///   when the marketplace rejects the payload;
    /// - `unauthorized` when the caller has no session;
    /// - `forbidden` when the caller is not a student;
    /// - `service_unavailable` when the marketplace cannot be reached.
    pub async fn submit(
        &self,
        credentials: &SessionCredentials,
        tutor: &TutorRate,
        draft: &BookingDraft,
    ) -> Result<BookingConfirmation, Error> {
        let today = self.clock.utc().date_naive();
        let request = draft.validate(tutor, today).map_err(map_draft_error)?;

        let resolution = self.resolver.resolve(credentials).await;
        let Some(identity) = resolution.identity() else {
            return Err(Error::unauthorized("sign in to book a session"));
        };
        if identity.role().role() != Some(Role::Student) {
            return Err(Error::forbidden("only students can book sessions"));
        }

        let booking = self
            .gateway
            .create_booking(credentials, &request)
            .await
            .map_err(map_gateway_error)?;
        info!(
            booking_id = %booking.id,
            user_id = %identity.id(),
            tutor_id = request.tutor_id(),
            price = %request.price(),
            "booking created"
        );
        Ok(BookingConfirmation {
            booking,
            next: BOOKINGS_PAGE,
        })
    }
}

fn map_draft_error(error: BookingDraftError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field().as_str(),
        "code": error.code(),
    }))
}

fn map_gateway_error(error: BookingGatewayError) -> Error {
    match error {
        BookingGatewayError::Transport { message } => {
            warn!(%message, "booking endpoint unavailable");
            Error::service_unavailable("booking service is temporarily unavailable")
                .with_details(json!({ "retryable": true }))
        }
        BookingGatewayError::Unauthorized { message } => Error::unauthorized(message),
        BookingGatewayError::Rejected { message } => Error::invalid_request(message),
        BookingGatewayError::Decode { message } => {
            Error::internal(format!("booking response invalid: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{DateTime, Local, TimeZone, Utc};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{FixtureSessionSource, MockBookingGateway, SessionSource};
    use crate::domain::{BookingStatus, ErrorCode, HourlyRate, Identity, Money, UserId};
    use rstest::{fixture, rstest};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> Arc<dyn Clock> {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 2, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(FixedClock(now))
    }

    fn resolver_for(role: Option<&str>) -> SessionResolver {
        let source: Arc<dyn SessionSource> = match role {
            Some(role) => Arc::new(FixtureSessionSource::authenticated(Identity::new(
                UserId::new("usr_booker").expect("id"),
                "Booker",
                "booker@example.com",
                role,
            ))),
            None => Arc::new(FixtureSessionSource::anonymous()),
        };
        SessionResolver::new(source)
    }

    fn service(gateway: MockBookingGateway, role: Option<&str>) -> BookingService {
        BookingService::new(Arc::new(gateway), resolver_for(role), clock())
    }

    #[fixture]
    fn credentials() -> SessionCredentials {
        SessionCredentials::from_cookie_header("session=abc")
    }

    #[fixture]
    fn tutor() -> TutorRate {
        TutorRate {
            tutor_id: "tut_9".into(),
            hourly_rate: HourlyRate::new(40.0).expect("rate"),
        }
    }

    #[fixture]
    fn draft() -> BookingDraft {
        BookingDraft {
            subject: "Chemistry".into(),
            date: "2026-03-04".into(),
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            notes: None,
        }
    }

    fn created() -> Booking {
        Booking {
            id: "bk_1".into(),
            tutor_id: "tut_9".into(),
            subject: "Chemistry".into(),
            date: "2026-03-04".into(),
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            duration: Some(90),
            price: Money::from_cents(6_000),
            status: BookingStatus::Confirmed,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn submits_valid_draft(
        credentials: SessionCredentials,
        tutor: TutorRate,
        draft: BookingDraft,
    ) {
        let mut gateway = MockBookingGateway::new();
        gateway
            .expect_create_booking()
            .withf(|_, request| {
                request.duration_minutes() == 90
                    && request.price() == Money::from_cents(6_000)
                    && request.tutor_id() == "tut_9"
            })
            .times(1)
            .returning(|_, _| Ok(created()));

        let confirmation = service(gateway, Some("STUDENT"))
            .submit(&credentials, &tutor, &draft)
            .await
            .expect("booking succeeds");
        assert_eq!(confirmation.next, BOOKINGS_PAGE);
        assert_eq!(confirmation.booking, created());
    }

    #[rstest]
    #[tokio::test]
    async fn inverted_window_never_reaches_gateway(
        credentials: SessionCredentials,
        tutor: TutorRate,
        mut draft: BookingDraft,
    ) {
        draft.start_time = "10:00".into();
        draft.end_time = "09:00".into();
        let mut gateway = MockBookingGateway::new();
        gateway.expect_create_booking().times(0);

        let error = service(gateway, Some("STUDENT"))
            .submit(&credentials, &tutor, &draft)
            .await
            .expect_err("invalid draft");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["field"], Value::from("endTime"));
        assert_eq!(details["code"], Value::from("non_positive_duration"));
    }

    #[rstest]
    #[tokio::test]
    async fn past_date_is_rejected_against_clock(
        credentials: SessionCredentials,
        tutor: TutorRate,
        mut draft: BookingDraft,
    ) {
        draft.date = "2026-03-01".into();
        let mut gateway = MockBookingGateway::new();
        gateway.expect_create_booking().times(0);

        let error = service(gateway, Some("STUDENT"))
            .submit(&credentials, &tutor, &draft)
            .await
            .expect_err("past date");
        assert_eq!(
            error.details().map(|d| d["code"].clone()),
            Some(Value::from("date_in_past"))
        );
    }

    #[rstest]
    #[case::anonymous(None, ErrorCode::Unauthorized)]
    #[case::tutor(Some("TUTOR"), ErrorCode::Forbidden)]
    #[case::unknown(Some("GUEST"), ErrorCode::Forbidden)]
    #[tokio::test]
    async fn requires_a_student_session(
        credentials: SessionCredentials,
        tutor: TutorRate,
        draft: BookingDraft,
        #[case] role: Option<&'static str>,
        #[case] expected: ErrorCode,
    ) {
        let mut gateway = MockBookingGateway::new();
        gateway.expect_create_booking().times(0);

        let error = service(gateway, role)
            .submit(&credentials, &tutor, &draft)
            .await
            .expect_err("not allowed");
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[case::transport(
        BookingGatewayError::transport("timed out"),
        ErrorCode::ServiceUnavailable
    )]
    #[case::rejected(
        BookingGatewayError::rejected("Tutor is not available"),
        ErrorCode::InvalidRequest
    )]
    #[case::unauthorized(
        BookingGatewayError::unauthorized("session expired"),
        ErrorCode::Unauthorized
    )]
    #[case::decode(BookingGatewayError::decode("missing data"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn maps_gateway_failures(
        credentials: SessionCredentials,
        tutor: TutorRate,
        draft: BookingDraft,
        #[case] failure: BookingGatewayError,
        #[case] expected: ErrorCode,
    ) {
        let mut gateway = MockBookingGateway::new();
        gateway
            .expect_create_booking()
            .times(1)
            .returning(move |_, _| Err(failure.clone()));

        let error = service(gateway, Some("STUDENT"))
            .submit(&credentials, &tutor, &draft)
            .await
            .expect_err("gateway failure");
        assert_eq!(error.code(), expected);
        if expected == ErrorCode::ServiceUnavailable {
            assert_eq!(
                error.details().map(|d| d["retryable"].clone()),
                Some(Value::Bool(true))
            );
        }
    }
}
