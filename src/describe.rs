//! # Attendance Descriptions
//!
//! Renders an attendance array as a short English phrase for tooltips and
//! reservation summaries, e.g. `"Friday evening until Sunday morning"`.
//!
//! ## Algorithm
//!
//! 1. Rebuild the timeline for the event window
//! 2. Keep the buckets whose attendance flag is 1
//! 3. Group them into runs of consecutive global slots
//! 4. Phrase each run from its first and last bucket
//! 5. Join the run phrases as an English list with an Oxford comma
//!
//! Slot indices are continuous across midnight, so a run may span several days.

use crate::codec::is_attending;
use crate::timeline::generate_buckets;
use crate::Bucket;
use chrono::NaiveDateTime;

/// Text returned when nothing is selected.
pub const NO_ATTENDANCE: &str = "No attendance selected";

/// Describe which parts of `[begin, end]` the attendance array covers.
///
/// `None`, an empty array, an all-zero array and an inverted window all
/// produce [`NO_ATTENDANCE`].
///
/// # Example
/// ```
/// use attendance_lib::describe_attendance;
/// use chrono::NaiveDate;
///
/// let begin = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
///
/// let text = describe_attendance(Some(&[1, 0, 0, 0, 1, 0, 0, 1]), begin, end);
/// assert_eq!(text, "Friday evening, Saturday evening, and Sunday afternoon");
/// ```
pub fn describe_attendance(
    attendance: Option<&[u8]>,
    begin: NaiveDateTime,
    end: NaiveDateTime,
) -> String {
    let attendance = match attendance {
        Some(a) if !a.is_empty() => a,
        _ => return NO_ATTENDANCE.to_string(),
    };

    let selected: Vec<Bucket> = generate_buckets(begin, end)
        .into_iter()
        .enumerate()
        .filter(|(index, _)| is_attending(attendance, *index))
        .map(|(_, bucket)| bucket)
        .collect();

    if selected.is_empty() {
        return NO_ATTENDANCE.to_string();
    }

    let phrases: Vec<String> = runs(&selected).into_iter().map(describe_run).collect();

    tracing::trace!(runs = phrases.len(), "described attendance");
    join_list(&phrases)
}

/// Split selected buckets into maximal runs of consecutive slots.
fn runs(selected: &[Bucket]) -> Vec<&[Bucket]> {
    let mut runs = Vec::new();
    let mut run_start = 0;

    for index in 1..selected.len() {
        if selected[index].slot() != selected[index - 1].slot() + 1 {
            runs.push(&selected[run_start..index]);
            run_start = index;
        }
    }
    if run_start < selected.len() {
        runs.push(&selected[run_start..]);
    }

    runs
}

/// Phrase for one run, based on its first and last bucket.
fn describe_run(run: &[Bucket]) -> String {
    let (first, last) = match (run.first(), run.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return String::new(),
    };

    if run.len() == 1 {
        format!("{} {}", first.day_name, first.period.lowercase())
    } else if first.day_offset == last.day_offset {
        let joiner = if run.len() == 2 { "and" } else { "to" };
        format!(
            "{} {} {} {}",
            first.day_name,
            first.period.lowercase(),
            joiner,
            last.period.lowercase()
        )
    } else {
        format!(
            "{} {} until {} {}",
            first.day_name,
            first.period.lowercase(),
            last.day_name,
            last.period.lowercase()
        )
    }
}

/// `a`, `a and b`, `a, b, and c`.
fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    /// Friday 18:00 until Sunday 12:00, eight buckets
    fn weekend(attendance: &[u8]) -> String {
        describe_attendance(Some(attendance), at(1, 18), at(3, 12))
    }

    #[test]
    fn test_no_selection() {
        assert_eq!(describe_attendance(None, at(1, 18), at(3, 12)), NO_ATTENDANCE);
        assert_eq!(weekend(&[]), NO_ATTENDANCE);
        assert_eq!(weekend(&[0; 8]), NO_ATTENDANCE);
    }

    #[test]
    fn test_ones_past_the_timeline_are_ignored() {
        assert_eq!(weekend(&[0, 0, 0, 0, 0, 0, 0, 0, 1]), NO_ATTENDANCE);
    }

    #[test]
    fn test_single_bucket() {
        assert_eq!(weekend(&[1, 0, 0, 0, 0, 0, 0, 0]), "Friday evening");
    }

    #[test]
    fn test_same_day_pair() {
        assert_eq!(
            weekend(&[1, 1, 0, 0, 0, 0, 0, 0]),
            "Friday evening and overnight"
        );
    }

    #[test]
    fn test_same_day_range() {
        assert_eq!(
            weekend(&[0, 0, 1, 1, 1, 0, 0, 0]),
            "Saturday morning to evening"
        );
    }

    #[test]
    fn test_full_span_across_days() {
        assert_eq!(weekend(&[1; 8]), "Friday evening until Sunday afternoon");
    }

    #[test]
    fn test_pair_across_midnight() {
        assert_eq!(
            weekend(&[0, 1, 1, 0, 0, 0, 0, 0]),
            "Friday overnight until Saturday morning"
        );
    }

    #[test]
    fn test_two_runs() {
        assert_eq!(
            weekend(&[1, 0, 0, 0, 0, 0, 1, 1]),
            "Friday evening and Sunday morning and afternoon"
        );
    }

    #[test]
    fn test_three_runs_use_oxford_comma() {
        assert_eq!(
            weekend(&[1, 0, 0, 0, 1, 0, 0, 1]),
            "Friday evening, Saturday evening, and Sunday afternoon"
        );
    }

    #[test]
    fn test_four_runs() {
        assert_eq!(
            weekend(&[1, 0, 1, 0, 1, 0, 1, 0]),
            "Friday evening, Saturday morning, Saturday evening, and Sunday morning"
        );
    }

    #[test]
    fn test_mid_day_start_with_short_array() {
        assert_eq!(
            describe_attendance(Some(&[1, 1, 1, 1]), at(1, 14), at(2, 12)),
            "Friday afternoon until Saturday morning"
        );
    }

    #[test]
    fn test_inverted_window() {
        assert_eq!(
            describe_attendance(Some(&[1, 1]), at(3, 12), at(1, 18)),
            NO_ATTENDANCE
        );
    }

    #[test]
    fn test_join_list() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_list(&items(&[])), "");
        assert_eq!(join_list(&items(&["a"])), "a");
        assert_eq!(join_list(&items(&["a", "b"])), "a and b");
        assert_eq!(join_list(&items(&["a", "b", "c"])), "a, b, and c");
    }
}
