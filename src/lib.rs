//! # LAN Party Attendance Core Library
//!
//! This library turns an event's active window into a grid of 6-hour attendance
//! buckets and back again. It is the piece of the organizer shared by the RSVP
//! selector, the invitation tooltips and the seat reservation summaries.
//!
//! ## Design Philosophy
//!
//! ### Pure Functions
//! - **No shared state**: Every call takes its interval and selection as arguments
//!   and returns freshly allocated values, so callers may use it from any thread
//! - **Total operations**: Inverted intervals and ragged attendance arrays produce
//!   empty or zero-filled results instead of errors
//! - **Wall-clock time**: Timestamps are `NaiveDateTime` in the event's local time;
//!   no timezone conversion happens anywhere in the core
//!
//! ### Bucket Grid
//! Each calendar day spanned by an event is split into four buckets:
//! - **Morning**: 06:00 to 12:00
//! - **Afternoon**: 12:00 to 18:00
//! - **Evening**: 18:00 to 24:00
//! - **Overnight**: 00:00 to 06:00 of the *following* day
//!
//! Only buckets that overlap the event are part of its timeline, so the
//! timeline is the day grid trimmed at both ends.
//!
//! ### Data Flow
//! 1. **Timeline**: `(begin, end)` → [`timeline::generate_buckets`] → `Vec<Bucket>`
//! 2. **Selection**: attendance array ⇄ global slot indices via [`codec`]
//! 3. **Summary**: attendance array → [`describe::describe_attendance`] → English phrase
//!
//! ## Core Types
//!
//! - [`Period`]: The four named parts of a day
//! - [`Bucket`]: One slot of an event's timeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// Module declarations
pub mod codec;
pub mod config;
pub mod describe;
pub mod parse;
pub mod selector;
pub mod timeline;

pub use codec::{default_attendance, from_selection_indices, to_selection_indices};
pub use describe::{describe_attendance, NO_ATTENDANCE};
pub use timeline::{generate_buckets, Interval, IntervalError};

/// Number of buckets in one calendar day.
pub const BUCKETS_PER_DAY: usize = 4;

/// Length of a single bucket in hours.
pub const BUCKET_HOURS: i64 = 6;

/// Positional 0/1 attendance flags, one per bucket of an event's timeline.
///
/// This is the wire format persisted by the REST API for invitations and
/// seat reservations.
pub type AttendanceArray = Vec<u8>;

/// Global slot indices (`day_offset * 4 + bucket_of_day`) toggled in the selector.
pub type SelectionIndexSet = BTreeSet<usize>;

/// The named part of a day a bucket covers.
///
/// Declared in bucket-of-day order, so `Period::ALL[bucket_of_day]` is the
/// period for that bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Overnight,
}

impl Period {
    /// All periods in bucket-of-day order.
    pub const ALL: [Period; BUCKETS_PER_DAY] = [
        Period::Morning,
        Period::Afternoon,
        Period::Evening,
        Period::Overnight,
    ];

    /// Period for a bucket-of-day index, or `None` outside `0..4`.
    pub fn from_bucket(bucket_of_day: usize) -> Option<Period> {
        Self::ALL.get(bucket_of_day).copied()
    }

    /// Capitalized label, as shown on selector buttons.
    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
            Period::Evening => "Evening",
            Period::Overnight => "Overnight",
        }
    }

    /// Lowercase form used inside sentences.
    pub fn lowercase(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
            Period::Overnight => "overnight",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One 6-hour attendance slot of an event.
///
/// Buckets are value types produced by [`generate_buckets`]; they carry no
/// identity beyond their position in the timeline.
///
/// # Example
/// ```
/// use attendance_lib::{Bucket, Period};
///
/// let bucket = Bucket {
///     day_offset: 1,
///     bucket_of_day: 2,
///     day_name: "Saturday".to_string(),
///     period: Period::Evening,
/// };
///
/// assert_eq!(bucket.slot(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Calendar days since the day the event begins
    pub day_offset: usize,
    /// Position within the day (0 = morning … 3 = overnight)
    pub bucket_of_day: usize,
    /// English weekday name of the day this bucket is anchored to
    pub day_name: String,
    /// Named part of the day
    pub period: Period,
}

impl Bucket {
    /// Global slot index: `day_offset * 4 + bucket_of_day`.
    ///
    /// Continuous across day boundaries, so overnight of day N is immediately
    /// followed by morning of day N + 1.
    pub fn slot(&self) -> usize {
        self.day_offset * BUCKETS_PER_DAY + self.bucket_of_day
    }
}
