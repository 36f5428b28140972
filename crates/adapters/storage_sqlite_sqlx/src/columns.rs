//! Column decoding helpers shared by the repositories.

use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use spothub_domain::time::{self, Timestamp};

/// Read a text column and parse it with [`FromStr`] (typed ids).
pub(crate) fn parse<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    T::from_str(&raw).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Read an RFC 3339 text column.
pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    time::parse_rfc3339(&raw).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
