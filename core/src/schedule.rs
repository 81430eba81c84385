// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};

use crate::TimeSlot;

/// Start/end scheduling state for an event being edited.
///
/// While the user has not touched an end control, the end tracks the start:
/// moving the start date moves the end date with it, and moving the start
/// slot re-derives the end slot as start + 1h. The first explicit end edit
/// (or loading an already-persisted event) makes the end sticky for the
/// rest of the editing session, so later start edits never overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    start_date: NaiveDate,
    start_time: TimeSlot,
    end_date: NaiveDate,
    end_time: TimeSlot,

    /// Whether the user has explicitly chosen an end in this session.
    /// Never persisted.
    user_adjusted_end: bool,
}

impl Schedule {
    /// Default start slot for a fresh draft, 09:00.
    pub const DEFAULT_START: TimeSlot = match TimeSlot::from_index(18) {
        Some(slot) => slot,
        None => unreachable!(),
    };

    /// Default duration for a fresh draft, one hour.
    pub const DEFAULT_DURATION_SLOTS: u8 = TimeSlot::PER_HOUR;

    /// A fresh draft on the given date: 09:00 through 10:00, end not yet
    /// adjusted by the user.
    pub fn new(date: NaiveDate) -> Self {
        Self::with_defaults(date, Self::DEFAULT_START, Self::DEFAULT_DURATION_SLOTS)
    }

    /// A fresh draft with a configured start slot and duration.
    pub fn with_defaults(date: NaiveDate, start: TimeSlot, duration_slots: u8) -> Self {
        Self {
            start_date: date,
            start_time: start,
            end_date: date,
            end_time: start.saturating_add(duration_slots),
            user_adjusted_end: false,
        }
    }

    /// State for editing an already-persisted event. The stored end is
    /// authoritative, so it is sticky from the first transition on.
    pub fn from_times(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start_date: start.date(),
            start_time: TimeSlot::from_time(start.time()),
            end_date: end.date(),
            end_time: TimeSlot::from_time(end.time()),
            user_adjusted_end: true,
        }
    }

    /// Moves the start to a new date, keeping the start slot. The end date
    /// follows unless the user has already adjusted the end.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;
        if !self.user_adjusted_end {
            self.end_date = date;
        }
    }

    /// Moves the start to a new slot. The end slot is re-derived as
    /// start + 1h (saturating at 23:30) unless the user has already
    /// adjusted the end.
    pub fn set_start_time(&mut self, slot: TimeSlot) {
        self.start_time = slot;
        if !self.user_adjusted_end {
            self.end_time = slot.plus_one_hour();
        }
    }

    /// Explicitly moves the end to a new date. If the resulting end
    /// date-time would precede the start date-time, the end is clamped to
    /// equal the start exactly. The end is sticky afterwards.
    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = date;
        if self.end() < self.start() {
            self.end_date = self.start_date;
            self.end_time = self.start_time;
        }
        self.user_adjusted_end = true;
    }

    /// Explicitly moves the end to a new slot. The end is sticky afterwards.
    pub fn set_end_time(&mut self, slot: TimeSlot) {
        self.end_time = slot;
        self.user_adjusted_end = true;
    }

    /// Returns to the blank new-event state on the given date.
    pub fn reset(&mut self, date: NaiveDate) {
        *self = Self::new(date);
    }

    /// The full start date-time.
    pub fn start(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time.time())
    }

    /// The full end date-time.
    pub fn end(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time.time())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn start_time(&self) -> TimeSlot {
        self.start_time
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn end_time(&self) -> TimeSlot {
        self.end_time
    }

    pub fn user_adjusted_end(&self) -> bool {
        self.user_adjusted_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(s: &str) -> TimeSlot {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_defaults_to_nine_to_ten() {
        let s = Schedule::new(date(2026, 3, 14));
        assert_eq!(s.start_time(), slot("09:00"));
        assert_eq!(s.end_time(), slot("10:00"));
        assert_eq!(s.end_date(), s.start_date());
        assert!(!s.user_adjusted_end());
    }

    #[test]
    fn test_end_time_follows_start_until_touched() {
        let mut s = Schedule::new(date(2026, 3, 14));

        s.set_start_time(slot("11:30"));
        assert_eq!(s.end_time(), slot("12:30"));

        s.set_start_time(slot("07:00"));
        assert_eq!(s.end_time(), slot("08:00"));
    }

    #[test]
    fn test_end_time_saturates_at_last_slot() {
        let mut s = Schedule::new(date(2026, 3, 14));

        s.set_start_time(slot("23:00"));
        assert_eq!(s.end_time(), slot("23:30"));

        s.set_start_time(slot("23:30"));
        assert_eq!(s.end_time(), slot("23:30"));
    }

    #[test]
    fn test_explicit_end_time_is_sticky() {
        let mut s = Schedule::new(date(2026, 3, 14));
        s.set_start_time(slot("09:00"));
        assert_eq!(s.end_time(), slot("10:00"));

        s.set_end_time(slot("14:00"));
        s.set_start_time(slot("11:00"));
        assert_eq!(s.end_time(), slot("14:00"));
    }

    #[test]
    fn test_end_date_follows_start_until_touched() {
        let mut s = Schedule::new(date(2026, 3, 14));

        s.set_start_date(date(2026, 3, 20));
        assert_eq!(s.end_date(), date(2026, 3, 20));

        s.set_end_date(date(2026, 3, 22));
        s.set_start_date(date(2026, 3, 21));
        assert_eq!(s.end_date(), date(2026, 3, 22));
    }

    #[test]
    fn test_end_date_clamps_to_start() {
        let mut s = Schedule::new(date(2026, 3, 14));
        s.set_start_time(slot("09:00"));

        s.set_end_date(date(2026, 3, 10));
        assert_eq!(s.end_date(), s.start_date());
        assert_eq!(s.end_time(), s.start_time());
        assert_eq!(s.end(), s.start());
    }

    #[test]
    fn test_end_date_clamp_compares_full_datetime() {
        // Same calendar date but an earlier slot: moving the end date back
        // onto the start date must clamp the slot too.
        let mut s = Schedule::new(date(2026, 3, 14));
        s.set_start_time(slot("15:00"));
        s.set_end_time(slot("09:00"));
        s.set_end_date(date(2026, 3, 14));

        assert_eq!(s.end(), s.start());
    }

    #[test]
    fn test_loaded_event_is_sticky() {
        let start = date(2026, 5, 1).and_time(slot("09:00").time());
        let end = date(2026, 5, 2).and_time(slot("16:30").time());
        let mut s = Schedule::from_times(start, end);
        assert!(s.user_adjusted_end());

        s.set_start_date(date(2026, 5, 3));
        assert_eq!(s.end_date(), date(2026, 5, 2));
        assert_eq!(s.end_time(), slot("16:30"));

        s.set_start_time(slot("10:00"));
        assert_eq!(s.end_time(), slot("16:30"));
    }

    #[test]
    fn test_from_times_round_trips() {
        let start = date(2026, 5, 1).and_time(slot("09:00").time());
        let end = date(2026, 5, 1).and_time(slot("10:30").time());
        let s = Schedule::from_times(start, end);
        assert_eq!(s.start(), start);
        assert_eq!(s.end(), end);
    }

    #[test]
    fn test_reset_clears_stickiness() {
        let mut s = Schedule::new(date(2026, 3, 14));
        s.set_end_time(slot("20:00"));
        assert!(s.user_adjusted_end());

        s.reset(date(2026, 4, 1));
        assert!(!s.user_adjusted_end());
        assert_eq!(s.start_date(), date(2026, 4, 1));
        assert_eq!(s.start_time(), Schedule::DEFAULT_START);
    }
}
