//! ISO-8601 validation for timestamps received as lookup keys.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::ValidationError;

/// Returns true if `value` is an ISO-8601 date or date-time.
///
/// Accepted forms: RFC 3339 date-times with an offset or `Z`, naive date-times
/// (`YYYY-MM-DDTHH:MM[:SS[.fff]]`) and plain dates (`YYYY-MM-DD`).
pub fn is_valid_iso_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Validates a timestamp path segment, returning it unchanged.
///
/// The timestamp is used verbatim in the sort key, so it is never normalized.
pub fn validate_timestamp(value: &str) -> Result<&str, ValidationError> {
    if is_valid_iso_timestamp(value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidTimestamp(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::records::format_timestamp;

    #[test]
    fn test_accepts_iso_forms() {
        for value in [
            "2024-05-01T10:00:00.000Z",
            "2024-05-01T10:00:00Z",
            "2024-05-01T10:00:00+02:00",
            "2024-05-01T10:00:00.123456-07:30",
            "2024-05-01T10:00:00",
            "2024-05-01T10:00:00.5",
            "2024-05-01T10:00",
            "2024-05-01",
            "2024-02-29",
        ] {
            assert!(is_valid_iso_timestamp(value), "expected {value} to be valid");
        }
    }

    #[test]
    fn test_rejects_malformed_values() {
        for value in [
            "",
            "not-a-date",
            "2024-13-01",
            "2023-02-29",
            "2024-05-01T25:00:00Z",
            "2024-05-01T10:00:00.000Zjunk",
            "1714557600000",
            "05/01/2024",
        ] {
            assert!(!is_valid_iso_timestamp(value), "expected {value} to be invalid");
        }
    }

    #[test]
    fn test_accepts_every_generated_key_timestamp() {
        let mut at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        for _ in 0..48 {
            let formatted = format_timestamp(at);
            assert!(is_valid_iso_timestamp(&formatted));
            assert_eq!(
                DateTime::parse_from_rfc3339(&formatted).unwrap(),
                at.fixed_offset()
            );
            at += chrono::Duration::minutes(37);
        }
    }

    #[test]
    fn test_validate_timestamp_returns_input_verbatim() {
        assert_eq!(validate_timestamp("2024-05-01").unwrap(), "2024-05-01");
        assert_eq!(
            validate_timestamp("yesterday"),
            Err(ValidationError::InvalidTimestamp("yesterday".to_string()))
        );
    }
}
