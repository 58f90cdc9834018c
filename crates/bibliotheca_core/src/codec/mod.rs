//! Codecs
//!
//! Two structurally parallel file formats. Both go through the same flat
//! [`records::LibraryDocument`]: [`snapshot`] flattens a [`Library`] into it and [`restore`]
//! rebuilds a [`Library`] from it, re-linking references by natural key. The format modules
//! only translate between the document and text.
use crate::errors::CodecError;
use crate::registry::Library;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub mod json;
pub mod records;
pub mod restore;
pub mod snapshot;
pub mod xml;

/// One file format.
pub trait Codec {
    /// Flattens every collection of `library` into a document.
    /// # Errors
    /// Fails if a reference inside the library cannot be flattened or serialization fails
    fn encode(&self, library: &Library) -> Result<String, CodecError>;

    /// Builds a fresh library from a document.
    /// # Errors
    /// Fails on a syntactically broken document or a malformed required record
    fn decode(&self, source: &str) -> Result<Library, CodecError>;
}

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// ISO 8601 without offset; fractional seconds only when present
pub(crate) fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Accepts a plain date or a date-time, keeping only the date.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CodecError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| parse_datetime(field, value).map(|datetime| datetime.date()))
        .map_err(|_| CodecError::malformed(field, value))
}

/// Accepts `T` or a space as separator, optional fractional seconds, and an optional UTC
/// offset that is dropped after conversion to local wall time of that offset.
pub(crate) fn parse_datetime(field: &str, value: &str) -> Result<NaiveDateTime, CodecError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|datetime| datetime.naive_local()))
        .map_err(|_| CodecError::malformed(field, value))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn datetimes_use_iso_format() {
        let datetime = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_datetime(datetime), "2025-03-14T09:05:00");
        assert_eq!(parse_datetime("at", "2025-03-14T09:05:00").unwrap(), datetime);
        assert_eq!(parse_datetime("at", "2025-03-14 09:05:00").unwrap(), datetime);
        assert_eq!(
            parse_datetime("at", "2025-03-14T09:05:00+03:00").unwrap(),
            datetime
        );

        let precise = parse_datetime("at", "2025-03-14T09:05:00.123456").unwrap();
        assert_eq!(format_datetime(precise), "2025-03-14T09:05:00.123456");
    }

    #[test]
    fn dates_accept_datetimes() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(format_date(date), "2025-01-31");
        assert_eq!(parse_date("issue_date", "2025-01-31").unwrap(), date);
        assert_eq!(parse_date("issue_date", "2025-01-31T00:00:00").unwrap(), date);
        assert!(matches!(
            parse_date("issue_date", "31.01.2025"),
            Err(CodecError::Malformed { .. })
        ));
    }
}
