//! Half-open minute ranges and the one overlap rule shared by every conflict
//! check (break windows and existing bookings alike).

use crate::clock::ClockTime;

/// A half-open range `[start, end)` in minutes since midnight.
///
/// `end` may equal [`MINUTES_PER_DAY`](crate::clock::MINUTES_PER_DAY) at most;
/// it is a bound, not a clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    pub fn new(start: u32, end: u32) -> Self {
        TimeRange { start, end }
    }

    /// The range covering `duration` minutes from `start`.
    ///
    /// `end` saturates at `u32::MAX` rather than wrapping, so an oversized
    /// duration still covers everything after `start`.
    pub fn starting_at(start: ClockTime, duration: u32) -> Self {
        let start = start.minutes();
        TimeRange {
            start,
            end: start.saturating_add(duration),
        }
    }

    pub fn between(start: ClockTime, end: ClockTime) -> Self {
        TimeRange {
            start: start.minutes(),
            end: end.minutes(),
        }
    }

    /// Whether two half-open ranges share at least one minute.
    ///
    /// Ranges that merely touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}
