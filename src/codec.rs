//! # Attendance Codec
//!
//! Translates between the two shapes an invitee's selection takes:
//!
//! - **Attendance array**: the persisted wire format, one 0/1 flag per bucket of
//!   the event's timeline, aligned position-for-position with [`generate_buckets`]
//! - **Selection set**: the global slot indices (`day_offset * 4 + bucket_of_day`)
//!   the selector uses to address buttons, including disabled ones
//!
//! Both directions take the timeline computed from the *same* interval as the
//! array. Arrays shorter than the timeline read as 0 past their end, and extra
//! trailing entries are ignored.

use crate::timeline::generate_buckets;
use crate::{AttendanceArray, Bucket, SelectionIndexSet};
use chrono::NaiveDateTime;

/// Whether position `index` of `attendance` is set. Missing entries are unset.
pub(crate) fn is_attending(attendance: &[u8], index: usize) -> bool {
    attendance.get(index) == Some(&1)
}

/// Global slot indices of every bucket marked 1 in `attendance`.
///
/// # Example
/// ```
/// use attendance_lib::{generate_buckets, to_selection_indices};
/// use chrono::NaiveDate;
///
/// let begin = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let timeline = generate_buckets(begin, end);
///
/// // Friday evening and Saturday morning
/// let selected = to_selection_indices(&[1, 0, 1], &timeline);
/// assert_eq!(selected.into_iter().collect::<Vec<_>>(), vec![2, 4]);
/// ```
pub fn to_selection_indices(attendance: &[u8], timeline: &[Bucket]) -> SelectionIndexSet {
    timeline
        .iter()
        .enumerate()
        .filter(|(index, _)| is_attending(attendance, *index))
        .map(|(_, bucket)| bucket.slot())
        .collect()
}

/// Attendance array for `timeline` with a 1 wherever the bucket's slot is selected.
///
/// Selected slots that are not part of the timeline (disabled buttons) are dropped.
pub fn from_selection_indices(selected: &SelectionIndexSet, timeline: &[Bucket]) -> AttendanceArray {
    timeline
        .iter()
        .map(|bucket| u8::from(selected.contains(&bucket.slot())))
        .collect()
}

/// Attendance for "the whole event": a 1 for every bucket of `[begin, end]`.
///
/// Used when an invitee has not chosen anything yet.
pub fn default_attendance(begin: NaiveDateTime, end: NaiveDateTime) -> AttendanceArray {
    vec![1; generate_buckets(begin, end).len()]
}
