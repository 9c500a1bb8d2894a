//! Bookable start times for a single day.
//!
//! The pipeline is a straight filter chain over half-hour candidates:
//!
//! 1. [`SlotGenerator`] lays out every start time from opening, in
//!    [`SLOT_STEP_MINUTES`] steps, whose service would finish by closing.
//! 2. Candidates overlapping the break window are dropped.
//! 3. Candidates overlapping any non-cancelled booking are dropped. Each
//!    booking occupies its own stored duration, not the requested service's.
//! 4. When the target date is today, candidates starting at or before `now`
//!    are dropped.
//!
//! Everything here is pure: the caller supplies `now`, already expressed in
//! the business's local time, and the same inputs always give the same
//! output in the same order.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::booking::ExistingBooking;
use crate::clock::{ClockTime, MINUTES_PER_DAY};
use crate::error::SlotError;
use crate::interval::TimeRange;
use crate::schedule::DaySchedule;

/// Distance between consecutive candidate start times.
pub const SLOT_STEP_MINUTES: u32 = 30;

// ── CandidateSlot ───────────────────────────────────────────────────────────

/// A start time that can be offered to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSlot {
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// 12-hour label, e.g. `"2:30 PM"`.
    pub display: String,
}

impl CandidateSlot {
    fn new(date: NaiveDate, start_time: ClockTime, end_time: ClockTime) -> Self {
        CandidateSlot {
            date,
            start_time,
            end_time,
            display: start_time.display_12h(),
        }
    }

    pub fn interval(&self) -> TimeRange {
        TimeRange::between(self.start_time, self.end_time)
    }
}

// ── SlotGenerator ───────────────────────────────────────────────────────────

/// The raw candidate start times for one day, before any filtering.
///
/// A generator is a plain value; [`SlotGenerator::iter`] can be called any
/// number of times and always yields the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGenerator {
    open: u32,
    close: u32,
    duration: u32,
}

impl SlotGenerator {
    /// Candidates for `schedule` and a service lasting `duration_minutes`.
    ///
    /// A closed day produces a generator that yields nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidDuration`] if `duration_minutes` is zero,
    /// or [`SlotError::InvalidSchedule`] if an open day is malformed.
    pub fn new(schedule: &DaySchedule, duration_minutes: u32) -> Result<Self, SlotError> {
        if duration_minutes == 0 {
            return Err(SlotError::InvalidDuration(
                "service duration must be at least one minute".to_string(),
            ));
        }
        if !schedule.is_open {
            return Ok(SlotGenerator {
                open: 0,
                close: 0,
                duration: duration_minutes,
            });
        }
        schedule.validate()?;
        Ok(SlotGenerator {
            open: schedule.open_time.minutes(),
            close: schedule.close_time.minutes(),
            duration: duration_minutes,
        })
    }

    pub fn iter(&self) -> SlotIter {
        SlotIter {
            next: self.open,
            close: self.close,
            duration: self.duration,
        }
    }
}

impl IntoIterator for &SlotGenerator {
    type Item = TimeRange;
    type IntoIter = SlotIter;

    fn into_iter(self) -> SlotIter {
        self.iter()
    }
}

/// Iterator over a [`SlotGenerator`]'s candidate ranges.
#[derive(Debug, Clone)]
pub struct SlotIter {
    next: u32,
    close: u32,
    duration: u32,
}

impl Iterator for SlotIter {
    type Item = TimeRange;

    fn next(&mut self) -> Option<TimeRange> {
        let start = self.next;
        let end = start.checked_add(self.duration)?;
        // Steps only move forward, so the first overrun ends the sequence.
        if end > self.close {
            self.next = self.close;
            return None;
        }
        self.next = start + SLOT_STEP_MINUTES;
        Some(TimeRange::new(start, end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.close.checked_sub(self.duration) {
            Some(last) if last >= self.next => ((last - self.next) / SLOT_STEP_MINUTES + 1) as usize,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotIter {}

// ── Filters ─────────────────────────────────────────────────────────────────

/// Ranges a candidate must not touch: the break, then every active booking.
///
/// Bookings are validated here; cancelled ones never enter the set.
fn blocked_ranges(
    schedule: &DaySchedule,
    bookings: &[ExistingBooking],
) -> Result<Vec<TimeRange>, SlotError> {
    let mut blocked = Vec::with_capacity(bookings.len() + 1);
    blocked.extend(schedule.break_window());
    for booking in bookings.iter().filter(|b| b.status.is_active()) {
        booking.validate()?;
        blocked.push(booking.interval());
    }
    Ok(blocked)
}

fn is_free(candidate: &TimeRange, blocked: &[TimeRange]) -> bool {
    !blocked.iter().any(|range| candidate.overlaps(range))
}

/// Whether a candidate on `date` has already started as of `now`.
fn has_started(date: NaiveDate, start: u32, now: NaiveDateTime) -> bool {
    if date != now.date() {
        return false;
    }
    // Compare at minute precision: 14:10:30 counts as 14:10, so a 14:10
    // candidate is "at" now and excluded either way.
    let now_minute = ClockTime::from_naive_time(now.time()).minutes();
    start <= now_minute
}

// ── compute_available_slots ─────────────────────────────────────────────────

/// Every start time on `target_date` that can take a service of
/// `duration_minutes`, in ascending order.
///
/// `now` must be the current wall-clock time in the business's time zone.
/// Past-time filtering only applies when `target_date` is `now`'s date.
///
/// An empty result is a valid outcome meaning "fully booked or closed".
///
/// # Errors
///
/// - [`SlotError::InvalidDuration`] if `duration_minutes` is zero.
/// - [`SlotError::InvalidSchedule`] if the schedule is open but malformed.
/// - [`SlotError::InvalidBooking`] if an active booking has zero duration or
///   runs past midnight.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::schedule::DaySchedule;
/// use slot_engine::slots::compute_available_slots;
///
/// let day = DaySchedule::open("09:00".parse().unwrap(), "12:00".parse().unwrap());
/// let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
/// let now = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
///
/// let slots = compute_available_slots(&day, &[], 60, date, now).unwrap();
/// let starts: Vec<String> = slots.iter().map(|s| s.start_time.to_string()).collect();
/// assert_eq!(starts, ["09:00", "09:30", "10:00", "10:30", "11:00"]);
/// ```
pub fn compute_available_slots(
    schedule: &DaySchedule,
    bookings: &[ExistingBooking],
    duration_minutes: u32,
    target_date: NaiveDate,
    now: NaiveDateTime,
) -> Result<Vec<CandidateSlot>, SlotError> {
    let generator = SlotGenerator::new(schedule, duration_minutes)?;
    if !schedule.is_open {
        return Ok(Vec::new());
    }
    let blocked = blocked_ranges(schedule, bookings)?;

    generator
        .iter()
        .filter(|candidate| is_free(candidate, &blocked))
        .filter(|candidate| !has_started(target_date, candidate.start, now))
        .map(|candidate| to_slot(target_date, candidate))
        .collect()
}

fn to_slot(date: NaiveDate, range: TimeRange) -> Result<CandidateSlot, SlotError> {
    debug_assert!(range.end < MINUTES_PER_DAY);
    Ok(CandidateSlot::new(
        date,
        ClockTime::from_minutes(range.start)?,
        ClockTime::from_minutes(range.end)?,
    ))
}
