//! # Bucket Timeline Generation
//!
//! This module builds the coordinate system shared by the selector, the codec and
//! the describer: the ordered list of 6-hour buckets that overlap an event.
//!
//! ## Grid Layout
//!
//! For every calendar day touched by `[begin, end]`, four candidate buckets start
//! at 06:00, 12:00, 18:00 and 24:00 relative to that day's midnight. A candidate
//! `[start, start + 6h)` is kept when
//!
//! ```text
//! begin < start + 6h  &&  end >= start
//! ```
//!
//! The comparison is strict on the left and inclusive on the right, so an event
//! ending exactly at 12:00 still claims the afternoon bucket while an event
//! beginning exactly at 18:00 does not claim the afternoon. Changing either side
//! changes which boundary buckets appear in persisted attendance arrays.
//!
//! ## Ordering
//!
//! Buckets come out day-major, bucket-minor. Hours 00:00 to 06:00 of the first
//! day belong to the previous day's overnight bucket and are never part of the grid.

use crate::{Bucket, Period, BUCKETS_PER_DAY, BUCKET_HOURS};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use thiserror::Error;

/// Reasons an event window is rejected by [`Interval::new`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// The event ends before it begins
    #[error("event ends ({end}) before it begins ({begin})")]
    Inverted {
        begin: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// The event is longer than the configured maximum
    #[error("event lasts {days} days, longer than the {max_days} day limit")]
    TooLong { days: i64, max_days: i64 },

    /// The maximum itself is unusable (zero, negative or out of range)
    #[error("invalid maximum event duration: {max_days} days")]
    InvalidLimit { max_days: i64 },
}

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A validated event window.
///
/// The free functions in this module accept any pair of timestamps; `Interval`
/// is for callers that want the window checked once up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    begin: NaiveDateTime,
    end: NaiveDateTime,
}

impl Interval {
    /// Validate `begin <= end` and that the event lasts at most `max_days` days.
    pub fn new(
        begin: NaiveDateTime,
        end: NaiveDateTime,
        max_days: i64,
    ) -> Result<Self, IntervalError> {
        if begin > end {
            return Err(IntervalError::Inverted { begin, end });
        }
        let limit = match Duration::try_days(max_days) {
            Some(limit) if max_days > 0 => limit,
            _ => return Err(IntervalError::InvalidLimit { max_days }),
        };
        let length = end - begin;
        if length > limit {
            // Whole days, rounded up
            let days = (length.num_seconds() + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
            return Err(IntervalError::TooLong { days, max_days });
        }
        Ok(Interval { begin, end })
    }

    pub fn begin(&self) -> NaiveDateTime {
        self.begin
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Timeline of this window, see [`generate_buckets`].
    pub fn buckets(&self) -> Vec<Bucket> {
        generate_buckets(self.begin, self.end)
    }
}

/// Midnight of the calendar day containing `ts`.
pub fn start_of_day(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN)
}

/// Number of calendar days touched by `[begin, end]`, both endpoints inclusive.
///
/// Returns 0 for an inverted window.
pub fn number_of_days(begin: NaiveDateTime, end: NaiveDateTime) -> usize {
    let days = (end.date() - begin.date()).num_days() + 1;
    if begin > end || days < 1 {
        0
    } else {
        days as usize
    }
}

/// Size of the full day grid the selector addresses: `number_of_days * 4`.
pub fn global_slot_count(begin: NaiveDateTime, end: NaiveDateTime) -> usize {
    number_of_days(begin, end) * BUCKETS_PER_DAY
}

/// English name of a weekday.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Start of candidate bucket `bucket_of_day` on day `day_offset`, relative to `day_zero`.
fn bucket_start(day_zero: NaiveDateTime, day_offset: usize, bucket_of_day: usize) -> NaiveDateTime {
    day_zero
        + Duration::days(day_offset as i64)
        + Duration::hours(BUCKET_HOURS * (bucket_of_day as i64 + 1))
}

/// Generate the ordered buckets overlapping `[begin, end]`.
///
/// The result is the alignment key for attendance arrays, so it must be
/// recomputed whenever either endpoint changes.
///
/// An inverted window (`begin > end`) yields an empty timeline.
///
/// # Example
/// ```
/// use attendance_lib::{generate_buckets, Period};
/// use chrono::NaiveDate;
///
/// // Friday 18:00 until Sunday 12:00
/// let begin = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
///
/// let buckets = generate_buckets(begin, end);
/// assert_eq!(buckets.len(), 8);
/// assert_eq!(buckets[0].day_name, "Friday");
/// assert_eq!(buckets[0].period, Period::Evening);
/// assert_eq!(buckets[7].period, Period::Afternoon);
/// ```
pub fn generate_buckets(begin: NaiveDateTime, end: NaiveDateTime) -> Vec<Bucket> {
    if begin > end {
        tracing::debug!(%begin, %end, "inverted event window, no buckets");
        return Vec::new();
    }

    let day_zero = start_of_day(begin);
    let days = number_of_days(begin, end);
    let bucket_len = Duration::hours(BUCKET_HOURS);
    let mut buckets = Vec::with_capacity(days * BUCKETS_PER_DAY);

    for day_offset in 0..days {
        let day = day_zero + Duration::days(day_offset as i64);
        let name = day_name(day.weekday());

        for (bucket_of_day, period) in Period::ALL.iter().enumerate() {
            let start = bucket_start(day_zero, day_offset, bucket_of_day);
            if begin < start + bucket_len && end >= start {
                buckets.push(Bucket {
                    day_offset,
                    bucket_of_day,
                    day_name: name.to_string(),
                    period: *period,
                });
            }
        }
    }

    tracing::trace!(days, buckets = buckets.len(), "generated bucket timeline");
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// March 2024: the 1st is a Friday.
    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn labels(buckets: &[Bucket]) -> Vec<String> {
        buckets
            .iter()
            .map(|b| format!("{} {}", b.day_name, b.period))
            .collect()
    }

    #[test]
    fn test_weekend_event_timeline() {
        let buckets = generate_buckets(at(1, 18), at(3, 12));
        assert_eq!(
            labels(&buckets),
            vec![
                "Friday Evening",
                "Friday Overnight",
                "Saturday Morning",
                "Saturday Afternoon",
                "Saturday Evening",
                "Saturday Overnight",
                "Sunday Morning",
                "Sunday Afternoon",
            ]
        );
    }

    #[test]
    fn test_mid_bucket_start_includes_partial_bucket() {
        let buckets = generate_buckets(at(1, 14), at(2, 12));
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].period, Period::Afternoon);
        assert_eq!(buckets[0].day_offset, 0);
        // Ending exactly at noon still claims the afternoon
        assert_eq!(buckets[4].period, Period::Afternoon);
        assert_eq!(buckets[4].day_name, "Saturday");
    }

    #[test]
    fn test_begin_on_boundary_excludes_previous_bucket() {
        let buckets = generate_buckets(at(1, 12), at(1, 13));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].period, Period::Afternoon);
    }

    #[test]
    fn test_event_inside_one_bucket() {
        let begin = at(1, 19);
        let end = begin + Duration::minutes(30);
        let buckets = generate_buckets(begin, end);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].period, Period::Evening);
    }

    #[test]
    fn test_early_morning_event_maps_to_morning() {
        // 00:00 to 06:00 of day zero is outside the grid
        assert!(generate_buckets(at(1, 2), at(1, 4)).is_empty());
        let buckets = generate_buckets(at(1, 2), at(1, 6));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].period, Period::Morning);
    }

    #[test]
    fn test_overnight_labelled_with_previous_day() {
        let buckets = generate_buckets(at(1, 23), at(2, 3));
        assert_eq!(labels(&buckets), vec!["Friday Evening", "Friday Overnight"]);
        assert_eq!(buckets[1].slot(), 3);
    }

    #[test]
    fn test_inverted_interval_is_empty() {
        assert!(generate_buckets(at(3, 12), at(1, 18)).is_empty());
        assert_eq!(number_of_days(at(3, 12), at(1, 18)), 0);
        assert_eq!(global_slot_count(at(3, 12), at(1, 18)), 0);
    }

    #[test]
    fn test_bucket_count_bounds() {
        for begin_hour in 0..24 {
            for span_hours in 1..80 {
                let begin = at(1, begin_hour);
                let end = begin + Duration::hours(span_hours);
                let count = generate_buckets(begin, end).len();
                assert!(count <= global_slot_count(begin, end));
                if begin_hour >= 6 || span_hours >= 6 - begin_hour as i64 {
                    assert!(count >= 1, "begin {begin} end {end} produced no buckets");
                }
            }
        }
    }

    #[test]
    fn test_buckets_are_strictly_ordered() {
        let buckets = generate_buckets(at(1, 7), at(8, 22));
        for pair in buckets.windows(2) {
            assert!(pair[0].slot() < pair[1].slot());
        }
    }

    #[test]
    fn test_interval_validation() {
        assert!(Interval::new(at(1, 18), at(3, 12), 14).is_ok());
        assert_eq!(
            Interval::new(at(3, 12), at(1, 18), 14),
            Err(IntervalError::Inverted {
                begin: at(3, 12),
                end: at(1, 18)
            })
        );
        assert_eq!(
            Interval::new(at(1, 18), at(20, 12), 14),
            Err(IntervalError::TooLong {
                days: 19,
                max_days: 14
            })
        );
        assert_eq!(
            Interval::new(at(1, 18), at(3, 12), 1),
            Err(IntervalError::TooLong {
                days: 2,
                max_days: 1
            })
        );

        let interval = Interval::new(at(1, 18), at(3, 12), 14).unwrap();
        assert_eq!(interval.buckets(), generate_buckets(at(1, 18), at(3, 12)));
    }

    #[test]
    fn test_unusable_duration_limit() {
        for max_days in [0, -1, i64::MAX, i64::MIN] {
            assert_eq!(
                Interval::new(at(1, 18), at(3, 12), max_days),
                Err(IntervalError::InvalidLimit { max_days })
            );
        }
    }

    #[test]
    fn test_too_long_message_names_both_lengths() {
        let err = Interval::new(at(1, 18), at(20, 12), 14).unwrap_err();
        assert_eq!(err.to_string(), "event lasts 19 days, longer than the 14 day limit");
    }

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(Weekday::Mon), "Monday");
        assert_eq!(day_name(Weekday::Sun), "Sunday");
        assert_eq!(day_name(at(2, 0).weekday()), "Saturday");
    }
}
