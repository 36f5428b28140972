//! Time and timestamp helpers.

use chrono::{DateTime, ParseError, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse an RFC 3339 string (as written by adapters) back into a [`Timestamp`].
///
/// # Errors
///
/// Returns [`ParseError`] when `value` is not valid RFC 3339.
pub fn parse_rfc3339(value: &str) -> Result<Timestamp, ParseError> {
    DateTime::parse_from_rfc3339(value).map(|ts| ts.to_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_what_to_rfc3339_produces() {
        let ts = now();
        assert_eq!(parse_rfc3339(&ts.to_rfc3339()).unwrap(), ts);
    }

    #[test]
    fn should_normalize_offsets_to_utc() {
        let ts = parse_rfc3339("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn should_reject_garbage() {
        assert!(parse_rfc3339("yesterday").is_err());
    }
}
