//! Column encoding shared by the repositories.
//!
//! Identifiers are stored as hyphenated UUID text. Timestamps are stored as
//! fixed-width RFC 3339 UTC text with microseconds, so that lexicographic
//! order in SQL matches chronological order.

use std::str::FromStr;

use chrono::SecondsFormat;
use questionnaire_domain::time::Timestamp;

pub(crate) fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(raw: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn decode_id<T>(raw: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(raw).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
