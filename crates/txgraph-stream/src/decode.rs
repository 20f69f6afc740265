//! Decoding of transaction records.
//!
//! One record per line:
//!
//! ```text
//! {"created_time": "2016-04-07T03:33:19Z", "target": "Jamie-Korn", "actor": "Jordan-Gruber"}
//! ```
//!
//! Key order is free and unknown keys are ignored. Empty names decode fine
//! and are left for the engine's validity check.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use txgraph_core::{Event, Timestamp};

use crate::error::DecodeError;

/// Offset-less fallback layout, read as UTC.
const NAIVE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
struct RawRecord {
    created_time: Option<String>,
    target: Option<String>,
    actor: Option<String>,
}

/// Decode one line into an event.
pub fn decode_line(line: &str) -> Result<Event, DecodeError> {
    let record: RawRecord = serde_json::from_str(line.trim())?;

    let created_time = record
        .created_time
        .ok_or(DecodeError::MissingField("created_time"))?;
    let time = parse_timestamp(&created_time)?;
    let target = record.target.ok_or(DecodeError::MissingField("target"))?;
    let actor = record.actor.ok_or(DecodeError::MissingField("actor"))?;

    Ok(Event::new(time, actor, target))
}

/// Parse a record timestamp, e.g. `2016-04-07T03:33:19Z`.
///
/// RFC 3339 with any offset is accepted; a bare `YYYY-MM-DDTHH:MM:SS` is
/// taken as UTC. Fractional seconds are dropped.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, DecodeError> {
    let value = value.trim();
    let secs = match DateTime::parse_from_rfc3339(value) {
        Ok(instant) => instant.timestamp(),
        Err(rfc_err) => NaiveDateTime::parse_from_str(value, NAIVE_LAYOUT)
            .map(|naive| naive.and_utc().timestamp())
            .map_err(|_| DecodeError::InvalidTimestamp {
                value: value.to_string(),
                reason: rfc_err.to_string(),
            })?,
    };
    Ok(Timestamp::from_secs(secs))
}
