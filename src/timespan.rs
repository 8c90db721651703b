//! Signed time-span parsing for activity durations
//!
//! Activity logs write durations in a compact unit-suffixed notation:
//! `30m`, `1h`, `1h30m`, `1.5h`, `-5m`, `250ms`. A span is an optional sign
//! followed by one or more `<number><unit>` groups, where the number may carry
//! a decimal fraction. The bare literal `0` is also accepted.
//!
//! Supported units: `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m`, `h`.
//!
//! Parsed spans are returned as [`chrono::TimeDelta`] with nanosecond
//! resolution. No whitespace is tolerated anywhere in the input.

use chrono::TimeDelta;
use thiserror::Error;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Time-span parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimespanError {
    #[error("empty time span {0:?}")]
    Empty(String),

    #[error("invalid number in time span {0:?}")]
    InvalidNumber(String),

    #[error("missing unit in time span {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in time span {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("time span {0:?} is out of range")]
    Overflow(String),
}

/// Nanoseconds per unit suffix
fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Parse a signed time span such as `45m`, `1h30m` or `-5m`.
pub fn parse_timespan(input: &str) -> Result<TimeDelta, TimespanError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(TimespanError::Empty(input.to_string()));
    }

    let overflow = || TimespanError::Overflow(input.to_string());
    let limit = if negative {
        i64::MAX as u64 + 1
    } else {
        i64::MAX as u64
    };
    let mut total: u64 = 0;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(TimespanError::InvalidNumber(input.to_string()));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);

        if unit.is_empty() {
            return Err(TimespanError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| TimespanError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let whole: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| overflow())?
        };
        let mut value = whole.checked_mul(scale).ok_or_else(overflow)?;

        if !frac_digits.is_empty() {
            value = value
                .checked_add(scale_fraction(frac_digits, scale))
                .ok_or_else(overflow)?;
        }

        total = total.checked_add(value).ok_or_else(overflow)?;
        if total > limit {
            return Err(overflow());
        }

        rest = tail;
    }

    // `limit` admits 2^63 only for negative spans, where it wraps to i64::MIN.
    let nanos = total as i64;
    Ok(TimeDelta::nanoseconds(if negative {
        nanos.wrapping_neg()
    } else {
        nanos
    }))
}

/// Nanoseconds contributed by the fraction digits of a `<number><unit>` group
///
/// Digits past the 18th are below nanosecond resolution for every unit and
/// are dropped.
fn scale_fraction(frac_digits: &str, scale: u64) -> u64 {
    let digits = &frac_digits[..frac_digits.len().min(18)];
    let numerator: u128 = digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u128::from(b - b'0'));
    let denominator = 10u128.pow(digits.len() as u32);

    (numerator * u128::from(scale) / denominator) as u64
}

/// Span length in seconds, fractional part included
pub fn seconds(span: &TimeDelta) -> f64 {
    span.num_seconds() as f64 + f64::from(span.subsec_nanos()) / NANOS_PER_SECOND
}

/// Span length in minutes
pub fn minutes(span: &TimeDelta) -> f64 {
    seconds(span) / SECONDS_PER_MINUTE
}

/// Span length in hours
pub fn hours(span: &TimeDelta) -> f64 {
    seconds(span) / SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_unit_spans() {
        assert_eq!(parse_timespan("30m").unwrap(), TimeDelta::minutes(30));
        assert_eq!(parse_timespan("1h").unwrap(), TimeDelta::hours(1));
        assert_eq!(parse_timespan("90s").unwrap(), TimeDelta::seconds(90));
        assert_eq!(parse_timespan("250ms").unwrap(), TimeDelta::milliseconds(250));
        assert_eq!(parse_timespan("5us").unwrap(), TimeDelta::microseconds(5));
        assert_eq!(parse_timespan("5µs").unwrap(), TimeDelta::microseconds(5));
        assert_eq!(parse_timespan("7ns").unwrap(), TimeDelta::nanoseconds(7));
    }

    #[test]
    fn test_compound_and_fractional_spans() {
        assert_eq!(parse_timespan("1h30m").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_timespan("1.5h").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_timespan(".5h").unwrap(), TimeDelta::minutes(30));
        assert_eq!(parse_timespan("2.h").unwrap(), TimeDelta::hours(2));
        assert_eq!(parse_timespan("1m30s").unwrap(), TimeDelta::seconds(90));
    }

    #[test]
    fn test_fractions_are_exact() {
        assert_eq!(parse_timespan("1.3s").unwrap(), TimeDelta::milliseconds(1300));
        assert_eq!(parse_timespan("0.3s").unwrap(), TimeDelta::milliseconds(300));
        assert_eq!(parse_timespan("0.1h").unwrap(), TimeDelta::minutes(6));
        assert_eq!(
            parse_timespan("1.0000000000000000000001s").unwrap(),
            TimeDelta::seconds(1)
        );
        assert_eq!(parse_timespan("1.5ns").unwrap(), TimeDelta::nanoseconds(1));
    }

    #[test]
    fn test_signs_and_zero() {
        assert_eq!(parse_timespan("-5m").unwrap(), TimeDelta::minutes(-5));
        assert_eq!(parse_timespan("+5m").unwrap(), TimeDelta::minutes(5));
        assert_eq!(parse_timespan("0").unwrap(), TimeDelta::zero());
        assert_eq!(parse_timespan("-0").unwrap(), TimeDelta::zero());
        assert_eq!(parse_timespan("0m").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn test_malformed_spans() {
        assert!(matches!(parse_timespan(""), Err(TimespanError::Empty(_))));
        assert!(matches!(parse_timespan("-"), Err(TimespanError::Empty(_))));
        assert!(matches!(parse_timespan("60"), Err(TimespanError::MissingUnit(_))));
        assert!(matches!(parse_timespan("h"), Err(TimespanError::InvalidNumber(_))));
        assert!(matches!(parse_timespan(".h"), Err(TimespanError::InvalidNumber(_))));
        assert!(matches!(
            parse_timespan("10d"),
            Err(TimespanError::UnknownUnit { .. })
        ));
        assert!(parse_timespan(" 60m").is_err());
        assert!(parse_timespan("60m ").is_err());
        assert!(parse_timespan("1h 30m").is_err());
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(matches!(
            parse_timespan("9999999999999h"),
            Err(TimespanError::Overflow(_))
        ));
        assert!(matches!(
            parse_timespan("99999999999999999999s"),
            Err(TimespanError::Overflow(_))
        ));
    }

    #[test]
    fn test_range_edges() {
        assert_eq!(
            parse_timespan("-9223372036854775808ns").unwrap(),
            TimeDelta::nanoseconds(i64::MIN)
        );
        assert_eq!(
            parse_timespan("9223372036854775807ns").unwrap(),
            TimeDelta::nanoseconds(i64::MAX)
        );
        assert!(matches!(
            parse_timespan("9223372036854775808ns"),
            Err(TimespanError::Overflow(_))
        ));
        assert!(matches!(
            parse_timespan("-9223372036854775809ns"),
            Err(TimespanError::Overflow(_))
        ));
    }

    #[test]
    fn test_unit_conversions() {
        let span = TimeDelta::minutes(90);
        assert_eq!(hours(&span), 1.5);
        assert_eq!(minutes(&span), 90.0);
        assert_eq!(seconds(&TimeDelta::milliseconds(1500)), 1.5);
        assert_eq!(hours(&TimeDelta::minutes(-30)), -0.5);
    }
}
