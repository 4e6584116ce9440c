//! # Selector Grid State
//!
//! The RSVP selector shows one row per calendar day of the event and one button
//! per bucket. Buttons outside the event window are disabled. This module holds
//! that grid and the toggling rules, independent of any UI toolkit.
//!
//! Selection lives as global slot indices; attendance arrays are produced and
//! consumed through [`crate::codec`], so the grid and the persisted array can
//! never drift out of alignment.

use crate::codec::{from_selection_indices, to_selection_indices};
use crate::describe::describe_attendance;
use crate::timeline::{day_name, generate_buckets, number_of_days, start_of_day};
use crate::{AttendanceArray, Bucket, Period, SelectionIndexSet, BUCKETS_PER_DAY};
use chrono::{Datelike, Duration, NaiveDateTime};
use serde::Serialize;

/// One button of the selector grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotState {
    /// Global slot index (`day_offset * 4 + bucket_of_day`)
    pub slot: usize,
    pub day_offset: usize,
    pub bucket_of_day: usize,
    pub day_name: &'static str,
    pub period: Period,
    /// Part of the event's timeline
    pub enabled: bool,
    /// Currently toggled on. Never true for a disabled slot.
    pub selected: bool,
}

/// Toggle state for every bucket of an event's day grid.
#[derive(Clone, Debug)]
pub struct SelectorGrid {
    begin: NaiveDateTime,
    end: NaiveDateTime,
    timeline: Vec<Bucket>,
    rows: Vec<[SlotState; BUCKETS_PER_DAY]>,
}

impl SelectorGrid {
    /// Build the grid for `[begin, end]`, preselecting the buckets set in `attendance`.
    pub fn new(begin: NaiveDateTime, end: NaiveDateTime, attendance: &[u8]) -> Self {
        let timeline = generate_buckets(begin, end);
        let enabled: SelectionIndexSet = timeline.iter().map(Bucket::slot).collect();
        let selected = to_selection_indices(attendance, &timeline);
        let day_zero = start_of_day(begin);

        let rows = (0..number_of_days(begin, end))
            .map(|day_offset| {
                let name = day_name((day_zero + Duration::days(day_offset as i64)).weekday());
                Period::ALL.map(|period| {
                    let bucket_of_day = period as usize;
                    let slot = day_offset * BUCKETS_PER_DAY + bucket_of_day;
                    SlotState {
                        slot,
                        day_offset,
                        bucket_of_day,
                        day_name: name,
                        period,
                        enabled: enabled.contains(&slot),
                        selected: selected.contains(&slot),
                    }
                })
            })
            .collect();

        SelectorGrid {
            begin,
            end,
            timeline,
            rows,
        }
    }

    /// Rows of the grid, one per calendar day.
    pub fn rows(&self) -> &[[SlotState; BUCKETS_PER_DAY]] {
        &self.rows
    }

    /// Buckets of the underlying timeline.
    pub fn timeline(&self) -> &[Bucket] {
        &self.timeline
    }

    fn slot_mut(&mut self, slot: usize) -> Option<&mut SlotState> {
        self.rows
            .get_mut(slot / BUCKETS_PER_DAY)
            .map(|row| &mut row[slot % BUCKETS_PER_DAY])
    }

    /// Flip one slot. Returns `false` when the slot is disabled or out of range.
    pub fn toggle_slot(&mut self, slot: usize) -> bool {
        match self.slot_mut(slot) {
            Some(state) if state.enabled => {
                state.selected = !state.selected;
                true
            }
            _ => {
                tracing::debug!(slot, "ignoring toggle of unavailable slot");
                false
            }
        }
    }

    /// Select every enabled slot of a day, or clear them if all are already selected.
    pub fn toggle_day(&mut self, day_offset: usize) {
        let Some(row) = self.rows.get_mut(day_offset) else {
            tracing::debug!(day_offset, "ignoring toggle of day outside the event");
            return;
        };
        let all_selected = row.iter().filter(|s| s.enabled).all(|s| s.selected);
        for state in row.iter_mut().filter(|s| s.enabled) {
            state.selected = !all_selected;
        }
    }

    pub fn select_all(&mut self) {
        for state in self.rows.iter_mut().flatten().filter(|s| s.enabled) {
            state.selected = true;
        }
    }

    pub fn clear(&mut self) {
        for state in self.rows.iter_mut().flatten() {
            state.selected = false;
        }
    }

    /// Global slot indices currently toggled on.
    pub fn selection(&self) -> SelectionIndexSet {
        self.rows
            .iter()
            .flatten()
            .filter(|s| s.selected)
            .map(|s| s.slot)
            .collect()
    }

    /// Current selection as an attendance array aligned with the timeline.
    pub fn attendance(&self) -> AttendanceArray {
        from_selection_indices(&self.selection(), &self.timeline)
    }

    /// English summary of the current selection.
    pub fn describe(&self) -> String {
        describe_attendance(Some(self.attendance().as_slice()), self.begin, self.end)
    }
}
