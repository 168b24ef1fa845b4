//! Row conversion helpers shared by the query modules.
//!
//! SQLite stores every date, timestamp, and status as TEXT; these helpers
//! convert column text back into domain types, reporting failures as
//! `FromSqlConversionFailure` so they surface through the normal rusqlite
//! error path.

use std::str::FromStr;

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::types::Type;

/// Parse an ISO 8601 date column.
pub(crate) fn column_date(idx: usize, value: String) -> rusqlite::Result<Date> {
    value
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse an RFC 3339 timestamp column.
pub(crate) fn column_timestamp(idx: usize, value: String) -> rusqlite::Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a status-like enum column via its `FromStr` implementation.
pub(crate) fn column_enum<T>(idx: usize, value: String) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse::<T>().map_err(|reason| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, reason)),
        )
    })
}
