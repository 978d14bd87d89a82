//! Error types for enforcer operations

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while enforcing the expiration tag
///
/// Every variant except [`Provider`](EnforcerError::Provider) is a terminal
/// policy outcome: by the time the caller sees it, the enforcer has already
/// issued its termination side effect (subject to live mode). The error is
/// re-raised rather than swallowed so the triggering infrastructure records
/// the abnormal run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnforcerError {
    /// The `lifetime` tag failed shorthand validation
    #[error("invalid lifetime value supplied: '{0}'")]
    InvalidLifetime(String),

    /// Neither tag appeared within the wait budget
    #[error("no termination_date found within {0}s of creation")]
    WaitBudgetExceeded(u64),

    /// An existing `termination_date` parses only as a naive timestamp
    #[error("the termination_date '{0}' requires a UTC offset")]
    MissingUtcOffset(String),

    /// An existing `termination_date` is not a recognizable timestamp
    #[error("unable to parse the termination_date '{0}'")]
    UnparsableTimestamp(String),

    /// An existing `termination_date` is already in the past
    #[error("the termination_date {0} has passed")]
    DeadlinePassed(DateTime<Utc>),

    /// Provider API error (propagated uncaught, no special handling)
    #[error("Provider error: {0}")]
    Provider(String),
}
