//! Date/time codec for API payloads
//!
//! Outgoing timestamps are written as RFC 3339 (ISO-8601) in UTC with
//! millisecond precision. Incoming timestamps are parsed as RFC 3339 with or
//! without fractional seconds; when that fails the legacy
//! `yyyy-MM-dd HH:mm:ss` format (UTC, locale-invariant) is tried before
//! giving up with an error that names the offending string.
//!
//! # Usage
//! ```rust
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//! use stickyboard_domain::utils::dates;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Example {
//!     #[serde(with = "dates")]
//!     created_at: DateTime<Utc>,
//!     #[serde(with = "dates::option", default)]
//!     due_date: Option<DateTime<Utc>>,
//! }
//! ```

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Legacy wire format still emitted by some backend endpoints
pub const LEGACY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde serialization result type
type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

/// Format a timestamp the way request bodies carry it
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp from any accepted wire format
///
/// # Errors
/// Returns a message naming `raw` when neither format matches.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, LEGACY_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("Unrecognized date: {raw}"))
}

/// Serialize a timestamp as RFC 3339
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> SerializeResult<S>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Deserialize a timestamp, falling back to the legacy format
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Same codec for optional timestamps (`null` and missing map to `None`)
pub mod option {
    use super::{
        format, parse, DateTime, Deserialize, Deserializer, SerializeResult, Serializer, Utc,
    };

    /// Serialize an optional timestamp
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&format(value)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
