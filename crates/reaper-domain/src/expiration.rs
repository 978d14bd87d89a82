//! Expiration module - the `termination_date` tag and deadline evaluation

use crate::INDEFINITE;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Error raised for a `termination_date` value that cannot be evaluated
///
/// The policy fails closed: a timestamp that cannot be parsed, or one that
/// parses but carries no UTC offset, is never treated as "not expired".
/// Callers must route these to their improperly-tagged / terminate-with-reason
/// path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The value parses as a date-time but has no timezone offset
    #[error("the termination_date '{0}' requires a UTC offset")]
    MissingUtcOffset(String),

    /// The value is not a recognizable timestamp at all
    #[error("unable to parse the termination_date '{0}'")]
    Unparsable(String),
}

/// Evaluated `termination_date` tag value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// The `indefinite` sentinel: never expires
    Indefinite,

    /// Concrete deadline, normalized to UTC
    At(DateTime<Utc>),
}

impl Expiration {
    /// Parse a `termination_date` tag value
    ///
    /// Accepts the `indefinite` sentinel or an ISO-8601 timestamp with an
    /// explicit offset. A timestamp that parses only as a naive date-time is
    /// reported as [`TimestampError::MissingUtcOffset`], distinct from
    /// [`TimestampError::Unparsable`], so callers can log the precise reason.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        if value == INDEFINITE {
            return Ok(Expiration::Indefinite);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Ok(Expiration::At(ts.with_timezone(&Utc)));
        }
        if parses_as_naive(value) {
            return Err(TimestampError::MissingUtcOffset(value.to_string()));
        }
        Err(TimestampError::Unparsable(value.to_string()))
    }

    /// Whether the deadline has passed as of `now`
    ///
    /// `Indefinite` never expires. A concrete deadline is expired at or
    /// before `now`; strictly-future deadlines are not expired. Both sides
    /// of the comparison are timezone-aware by construction.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self {
            Expiration::Indefinite => false,
            Expiration::At(deadline) => *deadline <= now,
        }
    }

    /// Time remaining until the deadline, if there is one in the future
    pub fn time_to_live(&self, now: DateTime<Utc>) -> Option<chrono::TimeDelta> {
        match self {
            Expiration::Indefinite => None,
            Expiration::At(deadline) if *deadline > now => Some(*deadline - now),
            Expiration::At(_) => None,
        }
    }
}

/// Whether the value is a date-time that merely lacks an offset
fn parses_as_naive(value: &str) -> bool {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    NAIVE_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Current timezone-aware UTC time
///
/// All comparisons in the reaper use timezone-aware timestamps; naive times
/// never enter the system.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}
