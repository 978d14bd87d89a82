//! Lifetime module - the `lifetime` shorthand tag and deadline arithmetic

use chrono::TimeDelta;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static LIFETIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)(w|d|h|m)$").unwrap());

/// Error raised for a malformed `lifetime` tag value
///
/// A malformed shorthand is terminal: the enforcer escalates to termination
/// rather than keep polling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifetimeError {
    /// The value does not match `<integer><w|d|h|m>`
    #[error("invalid lifetime value '{0}': expected an integer followed by w, d, h, or m")]
    InvalidSyntax(String),
}

/// Unit of a lifetime shorthand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeUnit {
    /// `w` - weeks
    Weeks,
    /// `d` - days
    Days,
    /// `h` - hours
    Hours,
    /// `m` - minutes
    Minutes,
}

/// Parsed `lifetime` tag value: a length and a unit
///
/// The `indefinite` sentinel is NOT accepted here - callers must special-case
/// it before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifetimeSpec {
    /// Numeric prefix of the shorthand
    pub length: u64,
    /// Unit suffix of the shorthand
    pub unit: LifetimeUnit,
}

impl LifetimeSpec {
    /// Parse a shorthand like `"2d"` or `"42w"`
    ///
    /// Anything that is not an unsigned integer followed by exactly one of
    /// `w`, `d`, `h`, `m` is rejected: negative signs, alternate units,
    /// trailing characters, the empty string.
    pub fn parse(value: &str) -> Result<Self, LifetimeError> {
        let captures = LIFETIME_PATTERN
            .captures(value)
            .ok_or_else(|| LifetimeError::InvalidSyntax(value.to_string()))?;
        let length: u64 = captures[1]
            .parse()
            .map_err(|_| LifetimeError::InvalidSyntax(value.to_string()))?;
        let unit = match &captures[2] {
            "w" => LifetimeUnit::Weeks,
            "d" => LifetimeUnit::Days,
            "h" => LifetimeUnit::Hours,
            "m" => LifetimeUnit::Minutes,
            _ => unreachable!("pattern only admits w|d|h|m"),
        };
        Ok(Self { length, unit })
    }

    /// Convert to a fixed-size duration
    ///
    /// Pure duration arithmetic: weeks are 7*24h, days 24h. No calendar-aware
    /// month or year handling.
    pub fn duration(&self) -> TimeDelta {
        let length = self.length as i64;
        match self.unit {
            LifetimeUnit::Weeks => TimeDelta::weeks(length),
            LifetimeUnit::Days => TimeDelta::days(length),
            LifetimeUnit::Hours => TimeDelta::hours(length),
            LifetimeUnit::Minutes => TimeDelta::minutes(length),
        }
    }
}

impl std::str::FromStr for LifetimeSpec {
    type Err = LifetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_shorthands() {
        assert_eq!(
            LifetimeSpec::parse("5m").unwrap(),
            LifetimeSpec {
                length: 5,
                unit: LifetimeUnit::Minutes
            }
        );
        assert_eq!(
            LifetimeSpec::parse("2h").unwrap(),
            LifetimeSpec {
                length: 2,
                unit: LifetimeUnit::Hours
            }
        );
        assert_eq!(
            LifetimeSpec::parse("2d").unwrap(),
            LifetimeSpec {
                length: 2,
                unit: LifetimeUnit::Days
            }
        );
        assert_eq!(
            LifetimeSpec::parse("42w").unwrap(),
            LifetimeSpec {
                length: 42,
                unit: LifetimeUnit::Weeks
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_values() {
        for bad in ["", "2t", "-1d", "2dd", "d", "2 d", "2.5h", "badunit", "indefinite"] {
            assert!(
                LifetimeSpec::parse(bad).is_err(),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_duration_table() {
        assert_eq!(LifetimeSpec::parse("1m").unwrap().duration().num_seconds(), 60);
        assert_eq!(LifetimeSpec::parse("1h").unwrap().duration().num_seconds(), 3600);
        assert_eq!(LifetimeSpec::parse("1d").unwrap().duration().num_seconds(), 86400);
        assert_eq!(LifetimeSpec::parse("1w").unwrap().duration().num_seconds(), 604800);
        assert_eq!(LifetimeSpec::parse("2w").unwrap().duration().num_seconds(), 1209600);
    }
}
