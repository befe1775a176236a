//! Booking price calculation.
//!
//! Prices are held in integer cents. A quote is derived from two wall-clock
//! times and an hourly rate and is recomputed on every call; nothing here is
//! cached or stateful.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;

/// Largest hourly rate accepted, in whole currency units.
pub const MAX_HOURLY_RATE: f64 = 100_000.0;

const MINUTES_PER_HOUR: i64 = 60;

/// Float noise tolerated when checking that a rate is a whole number of cents.
const CENT_TOLERANCE: f64 = 1e-6;

/// Validation errors raised while building quote inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// A time was not `HH:MM` or `HH:MM:SS`.
    InvalidTime {
        /// The rejected input.
        value: String,
    },
    /// The hourly rate was negative, not finite, implausibly large, or finer
    /// than a cent.
    InvalidRate,
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime { value } => {
                write!(f, "time must be formatted as HH:MM, got {value:?}")
            }
            Self::InvalidRate => write!(
                f,
                "hourly rate must be a finite amount between 0 and {MAX_HOURLY_RATE} with at most two decimal places"
            ),
        }
    }
}

impl std::error::Error for QuoteError {}

/// A wall-clock time with no date component.
///
/// # Examples
/// ```
/// use portal::domain::TimeOfDay;
///
/// let start: TimeOfDay = "09:00".parse().expect("valid time");
/// let end: TimeOfDay = "10:30:00".parse().expect("valid time");
/// assert_eq!(end.minutes_after(start), 90);
/// assert_eq!(end.to_string(), "10:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parse `HH:MM`, falling back to `HH:MM:SS`.
    pub fn parse(raw: &str) -> Result<Self, QuoteError> {
        let trimmed = raw.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self)
            .map_err(|_| QuoteError::InvalidTime {
                value: raw.to_owned(),
            })
    }

    /// Signed whole minutes from `earlier` to `self`.
    pub fn minutes_after(self, earlier: Self) -> i64 {
        self.0.signed_duration_since(earlier.0).num_minutes()
    }

    /// The underlying chrono time.
    pub fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Zero.
    pub const ZERO: Self = Self { cents: 0 };

    /// Build from a cent count.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Convert a decimal amount, rounding half away from zero to the cent.
    ///
    /// Returns `None` for NaN, infinities, and amounts outside the `i64`
    /// cent range.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        let scaled = (amount * 100.0).round();
        #[expect(
            clippy::cast_precision_loss,
            reason = "bounds check only; exact at the magnitudes that matter"
        )]
        let in_range = scaled.is_finite() && scaled.abs() < i64::MAX as f64;
        if !in_range {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is finite, integral, and inside the i64 range"
        )]
        let cents = scaled as i64;
        Some(Self { cents })
    }

    /// Cent count.
    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Decimal amount, for JSON payloads that carry prices as numbers.
    #[expect(
        clippy::cast_precision_loss,
        reason = "prices stay far below 2^52 cents"
    )]
    pub fn as_decimal(self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Sum of two amounts, saturating at the `i64` bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            cents: self.cents.saturating_add(other.cents),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let magnitude = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl serde::Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.as_decimal())
    }
}

/// A tutor's hourly rate, validated and held in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRate(Money);

impl HourlyRate {
    /// Validate a decimal hourly rate.
    ///
    /// Rates must be whole cents so that pricing rounds exactly once.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::HourlyRate;
    ///
    /// assert_eq!(HourlyRate::new(40.0).expect("rate").per_hour().cents(), 4000);
    /// assert!(HourlyRate::new(-1.0).is_err());
    /// assert!(HourlyRate::new(f64::NAN).is_err());
    /// assert!(HourlyRate::new(10.004).is_err());
    /// ```
    pub fn new(per_hour: f64) -> Result<Self, QuoteError> {
        if !per_hour.is_finite() || per_hour < 0.0 || per_hour > MAX_HOURLY_RATE {
            return Err(QuoteError::InvalidRate);
        }
        let scaled = per_hour * 100.0;
        if (scaled - scaled.round()).abs() > CENT_TOLERANCE {
            return Err(QuoteError::InvalidRate);
        }
        Money::from_decimal(per_hour)
            .map(Self)
            .ok_or(QuoteError::InvalidRate)
    }

    /// Rate for one hour.
    pub fn per_hour(self) -> Money {
        self.0
    }
}

/// Duration and price for a booking window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Minutes from start to end. Zero or negative when end is not after
    /// start.
    pub duration_minutes: i64,
    /// `duration / 60 × rate`, rounded to the cent.
    pub price: Money,
}

impl Quote {
    /// Whether the window is long enough to book.
    pub fn is_bookable(&self) -> bool {
        self.duration_minutes > 0
    }
}

/// Quote the window from `start` to `end` at `rate`.
///
/// Pure and idempotent. Windows where `end` is not after `start` still
/// produce a quote; callers decide whether that is acceptable.
///
/// # Examples
/// ```
/// use portal::domain::{quote, HourlyRate};
///
/// let q = quote::quote(
///     "09:00".parse().expect("start"),
///     "10:30".parse().expect("end"),
///     HourlyRate::new(40.0).expect("rate"),
/// );
/// assert_eq!(q.duration_minutes, 90);
/// assert_eq!(q.price.to_string(), "60.00");
/// ```
pub fn quote(start: TimeOfDay, end: TimeOfDay, rate: HourlyRate) -> Quote {
    let duration_minutes = end.minutes_after(start);
    let numerator = duration_minutes.saturating_mul(rate.per_hour().cents());
    Quote {
        duration_minutes,
        price: Money::from_cents(div_round_half_away(numerator, MINUTES_PER_HOUR)),
    }
}

/// Integer division rounding half away from zero. `divisor` must be positive.
fn div_round_half_away(numerator: i64, divisor: i64) -> i64 {
    let quotient = numerator / divisor;
    let remainder = numerator % divisor;
    if remainder.unsigned_abs().saturating_mul(2) >= divisor.unsigned_abs() {
        quotient + numerator.signum()
    } else {
        quotient
    }
}
