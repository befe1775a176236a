//! Booking drafts, their validation, and the records echoed by the
//! marketplace API.
//!
//! A [`BookingDraft`] is transient form state. It becomes a
//! [`BookingRequest`] only through [`BookingDraft::validate`], which checks
//! required fields, times, the calendar date and the duration before anything
//! leaves the process.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quote::{self, HourlyRate, Money, Quote, TimeOfDay};

/// Calendar date format exchanged with the marketplace API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields a booking form must fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    /// Tutor being booked.
    TutorId,
    /// Subject of the session.
    Subject,
    /// Calendar date.
    Date,
    /// Session start.
    StartTime,
    /// Session end.
    EndTime,
}

impl DraftField {
    /// Wire name used in error details.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TutorId => "tutorId",
            Self::Subject => "subject",
            Self::Date => "date",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a draft cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingDraftError {
    /// A required field was blank.
    MissingField(DraftField),
    /// A time field was not `HH:MM`.
    InvalidTime(DraftField),
    /// The date was not `YYYY-MM-DD`.
    InvalidDate,
    /// The date is before today.
    DateInPast,
    /// The end time is not after the start time.
    NonPositiveDuration,
}

impl BookingDraftError {
    /// Stable machine-readable code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidTime(_) => "invalid_time",
            Self::InvalidDate => "invalid_date",
            Self::DateInPast => "date_in_past",
            Self::NonPositiveDuration => "non_positive_duration",
        }
    }

    /// The offending field.
    pub fn field(&self) -> DraftField {
        match self {
            Self::MissingField(field) | Self::InvalidTime(field) => *field,
            Self::InvalidDate | Self::DateInPast => DraftField::Date,
            Self::NonPositiveDuration => DraftField::EndTime,
        }
    }
}

impl fmt::Display for BookingDraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "Please fill in all required fields"),
            Self::InvalidTime(field) => write!(f, "{field} must be formatted as HH:MM"),
            Self::InvalidDate => write!(f, "date must be formatted as YYYY-MM-DD"),
            Self::DateInPast => write!(f, "Bookings cannot be made for past dates"),
            Self::NonPositiveDuration => write!(f, "End time must be after start time"),
        }
    }
}

impl std::error::Error for BookingDraftError {}

/// The tutor facts a booking needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorRate {
    /// Tutor profile identifier.
    pub tutor_id: String,
    /// Price per hour.
    pub hourly_rate: HourlyRate,
}

/// Unvalidated booking form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    /// Subject of the session.
    pub subject: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub start_time: String,
    /// End time, `HH:MM`.
    pub end_time: String,
    /// Free-form notes for the tutor.
    pub notes: Option<String>,
}

impl BookingDraft {
    /// Quote to show while the form is being edited.
    ///
    /// Only produced once both times parse and the window is positive; a
    /// partial or inverted window shows nothing rather than an error.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{BookingDraft, HourlyRate};
    ///
    /// let mut draft = BookingDraft {
    ///     start_time: "09:00".into(),
    ///     ..BookingDraft::default()
    /// };
    /// let rate = HourlyRate::new(40.0).expect("rate");
    /// assert!(draft.live_quote(rate).is_none());
    ///
    /// draft.end_time = "10:30".into();
    /// assert_eq!(draft.live_quote(rate).map(|q| q.price.cents()), Some(6_000));
    /// ```
    pub fn live_quote(&self, rate: HourlyRate) -> Option<Quote> {
        let start = TimeOfDay::parse(&self.start_time).ok()?;
        let end = TimeOfDay::parse(&self.end_time).ok()?;
        Some(quote::quote(start, end, rate)).filter(Quote::is_bookable)
    }

    /// Validate the draft against `today` and price it for `tutor`.
    ///
    /// Checks run in order: required fields, time formats, duration, date
    /// format, date not in the past. The first failure is returned.
    pub fn validate(
        &self,
        tutor: &TutorRate,
        today: NaiveDate,
    ) -> Result<BookingRequest, BookingDraftError> {
        let tutor_id = required(&tutor.tutor_id, DraftField::TutorId)?;
        let subject = required(&self.subject, DraftField::Subject)?;
        let date = required(&self.date, DraftField::Date)?;
        let start = required(&self.start_time, DraftField::StartTime)?;
        let end = required(&self.end_time, DraftField::EndTime)?;

        let start_time = parse_time(start, DraftField::StartTime)?;
        let end_time = parse_time(end, DraftField::EndTime)?;
        let quote = quote::quote(start_time, end_time, tutor.hourly_rate);
        if !quote.is_bookable() {
            return Err(BookingDraftError::NonPositiveDuration);
        }

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| BookingDraftError::InvalidDate)?;
        if date < today {
            return Err(BookingDraftError::DateInPast);
        }

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_owned);

        Ok(BookingRequest {
            tutor_id: tutor_id.to_owned(),
            subject: subject.to_owned(),
            date,
            start_time,
            end_time,
            quote,
            notes,
        })
    }
}

fn required(value: &str, field: DraftField) -> Result<&str, BookingDraftError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(BookingDraftError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_time(value: &str, field: DraftField) -> Result<TimeOfDay, BookingDraftError> {
    TimeOfDay::parse(value).map_err(|_| BookingDraftError::InvalidTime(field))
}

/// A validated, priced booking ready to send upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    tutor_id: String,
    subject: String,
    date: NaiveDate,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    quote: Quote,
    notes: Option<String>,
}

impl BookingRequest {
    /// Tutor profile identifier.
    pub fn tutor_id(&self) -> &str {
        &self.tutor_id
    }

    /// Trimmed subject.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Session date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Session start.
    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    /// Session end.
    pub fn end_time(&self) -> TimeOfDay {
        self.end_time
    }

    /// Positive session length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.quote.duration_minutes
    }

    /// Price computed from the tutor's rate.
    pub fn price(&self) -> Money {
        self.quote.price
    }

    /// Notes, absent when the form left them blank.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Scheduled and not yet held.
    Confirmed,
    /// Held.
    Completed,
    /// Called off.
    Cancelled,
}

/// A booking as recorded by the marketplace API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking identifier.
    pub id: String,
    /// Tutor profile identifier.
    pub tutor_id: String,
    /// Subject of the session.
    pub subject: String,
    /// Date as recorded upstream.
    pub date: String,
    /// Start time as recorded upstream.
    pub start_time: String,
    /// End time as recorded upstream.
    pub end_time: String,
    /// Length in minutes, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Agreed price.
    pub price: Money,
    /// Lifecycle state.
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tutor() -> TutorRate {
        TutorRate {
            tutor_id: "tut_1".into(),
            hourly_rate: HourlyRate::new(40.0).expect("rate"),
        }
    }

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
    }

    #[fixture]
    fn draft() -> BookingDraft {
        BookingDraft {
            subject: " Algebra ".into(),
            date: "2026-03-02".into(),
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            notes: Some("  ".into()),
        }
    }

    #[rstest]
    fn validates_complete_draft(draft: BookingDraft, tutor: TutorRate, today: NaiveDate) {
        let request = draft.validate(&tutor, today).expect("valid draft");
        assert_eq!(request.subject(), "Algebra");
        assert_eq!(request.duration_minutes(), 90);
        assert_eq!(request.price().to_string(), "60.00");
        assert_eq!(request.notes(), None);
        assert_eq!(request.start_time().to_string(), "09:00");
    }

    #[rstest]
    #[case::subject(|d: &mut BookingDraft| d.subject.clear(), DraftField::Subject)]
    #[case::date(|d: &mut BookingDraft| d.date = " ".into(), DraftField::Date)]
    #[case::start(|d: &mut BookingDraft| d.start_time.clear(), DraftField::StartTime)]
    #[case::end(|d: &mut BookingDraft| d.end_time.clear(), DraftField::EndTime)]
    fn reports_missing_fields(
        mut draft: BookingDraft,
        tutor: TutorRate,
        today: NaiveDate,
        #[case] blank: fn(&mut BookingDraft),
        #[case] field: DraftField,
    ) {
        blank(&mut draft);
        let error = draft.validate(&tutor, today).expect_err("missing field");
        assert_eq!(error, BookingDraftError::MissingField(field));
        assert_eq!(error.to_string(), "Please fill in all required fields");
    }

    #[rstest]
    #[case("10:00", "09:00")]
    #[case("09:00", "09:00")]
    fn rejects_non_positive_windows(
        mut draft: BookingDraft,
        tutor: TutorRate,
        today: NaiveDate,
        #[case] start: &str,
        #[case] end: &str,
    ) {
        draft.start_time = start.into();
        draft.end_time = end.into();
        let error = draft.validate(&tutor, today).expect_err("inverted window");
        assert_eq!(error, BookingDraftError::NonPositiveDuration);
        assert_eq!(error.to_string(), "End time must be after start time");
        assert_eq!(error.field(), DraftField::EndTime);
    }

    #[rstest]
    fn rejects_past_dates(mut draft: BookingDraft, tutor: TutorRate, today: NaiveDate) {
        draft.date = "2026-03-01".into();
        assert_eq!(
            draft.validate(&tutor, today),
            Err(BookingDraftError::DateInPast)
        );
    }

    #[rstest]
    #[case("03/02/2026", BookingDraftError::InvalidDate)]
    #[case("2026-02-30", BookingDraftError::InvalidDate)]
    fn rejects_malformed_dates(
        mut draft: BookingDraft,
        tutor: TutorRate,
        today: NaiveDate,
        #[case] date: &str,
        #[case] expected: BookingDraftError,
    ) {
        draft.date = date.into();
        assert_eq!(draft.validate(&tutor, today), Err(expected));
    }

    #[rstest]
    fn rejects_malformed_times(mut draft: BookingDraft, tutor: TutorRate, today: NaiveDate) {
        draft.start_time = "nine".into();
        assert_eq!(
            draft.validate(&tutor, today),
            Err(BookingDraftError::InvalidTime(DraftField::StartTime))
        );
    }

    #[rstest]
    fn blank_tutor_is_missing(draft: BookingDraft, today: NaiveDate) {
        let tutor = TutorRate {
            tutor_id: String::new(),
            hourly_rate: HourlyRate::new(10.0).expect("rate"),
        };
        assert_eq!(
            draft.validate(&tutor, today),
            Err(BookingDraftError::MissingField(DraftField::TutorId))
        );
    }

    #[rstest]
    fn keeps_non_blank_notes(mut draft: BookingDraft, tutor: TutorRate, today: NaiveDate) {
        draft.notes = Some(" bring past papers ".into());
        let request = draft.validate(&tutor, today).expect("valid draft");
        assert_eq!(request.notes(), Some("bring past papers"));
    }

    #[rstest]
    #[case("10:00", "09:00")]
    #[case("09:00", "")]
    #[case("bad", "10:00")]
    fn live_quote_hidden_until_window_is_positive(
        mut draft: BookingDraft,
        tutor: TutorRate,
        #[case] start: &str,
        #[case] end: &str,
    ) {
        draft.start_time = start.into();
        draft.end_time = end.into();
        assert!(draft.live_quote(tutor.hourly_rate).is_none());
    }

    #[test]
    fn booking_serialises_with_wire_names() {
        let booking = Booking {
            id: "bk_1".into(),
            tutor_id: "tut_1".into(),
            subject: "Algebra".into(),
            date: "2026-03-02".into(),
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            duration: Some(90),
            price: Money::from_cents(6_000),
            status: BookingStatus::Confirmed,
        };
        let value = serde_json::to_value(&booking).expect("serialise");
        assert_eq!(value["tutorId"], "tut_1");
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["status"], "CONFIRMED");
        assert_eq!(value["price"], serde_json::json!(60.0));
    }
}
