//! # Input Parsing
//!
//! Converts the textual forms timestamps and attendance arrays arrive in
//! (command-line arguments, REST payloads) into the core's types.
//!
//! Timestamps are kept in local wall-clock time. RFC 3339 input carrying an
//! offset is converted to the machine's local time first, matching how the
//! organizer's browser clients see event times.

use crate::AttendanceArray;
use chrono::{DateTime, Local, NaiveDateTime};
use thiserror::Error;

/// Errors produced while reading user- or API-supplied input.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Timestamp in none of the accepted formats
    #[error("unrecognized timestamp: {0}")]
    Timestamp(String),

    /// Attendance entry that is not 0 or 1
    #[error("invalid attendance entry: {0}")]
    AttendanceEntry(String),

    /// Malformed JSON attendance payload
    #[error("attendance JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Naive formats tried in order before falling back to RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an event timestamp.
///
/// # Example
/// ```
/// use attendance_lib::parse::parse_timestamp;
///
/// let ts = parse_timestamp("2024-03-01T18:00").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-01 18:00:00");
/// ```
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, ParseError> {
    let input = input.trim();

    if let Some(ts) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Ok(ts);
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|_| ParseError::Timestamp(input.to_string()))
}

/// Parse an attendance array from JSON (`[1,0,1]`) or a plain list (`1,0,1`).
///
/// Blank input is an empty array.
pub fn parse_attendance(input: &str) -> Result<AttendanceArray, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<i64> = if input.starts_with('[') {
        serde_json::from_str(input)?
    } else {
        input
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>()
                    .map_err(|_| ParseError::AttendanceEntry(part.to_string()))
            })
            .collect::<Result<_, _>>()?
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            0 => Ok(0),
            1 => Ok(1),
            other => Err(ParseError::AttendanceEntry(other.to_string())),
        })
        .collect()
}
