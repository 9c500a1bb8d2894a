//! Minute-precision wall-clock values.
//!
//! Business hours, break windows and appointment start times are all stored as
//! `"HH:MM"` strings by the booking front end. [`ClockTime`] parses them once
//! into integer minutes since midnight so every comparison downstream is plain
//! integer arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision, in `00:00..=23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from hour and minute components.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTime`] if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, SlotError> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::InvalidTime(format!(
                "{hour:02}:{minute:02} is outside 00:00-23:59"
            )));
        }
        Ok(ClockTime((hour * 60 + minute) as u16))
    }

    /// Build from minutes since midnight.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTime`] if `minutes` is not within one day.
    pub fn from_minutes(minutes: u32) -> Result<Self, SlotError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SlotError::InvalidTime(format!(
                "{minutes} minutes is past the end of the day"
            )));
        }
        Ok(ClockTime(minutes as u16))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Add `minutes`, or `None` if the result would fall past 23:59.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<ClockTime> {
        let total = self.minutes().checked_add(minutes)?;
        ClockTime::from_minutes(total).ok()
    }

    /// Truncate a `NaiveTime` to the minute.
    pub fn from_naive_time(time: NaiveTime) -> ClockTime {
        ClockTime((time.hour() * 60 + time.minute()) as u16)
    }

    /// 12-hour label for display, e.g. `"9:00 AM"`, `"12:30 PM"`.
    pub fn display_12h(self) -> String {
        let (hour12, suffix) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        format!("{hour12}:{:02} {suffix}", self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    /// Accepts `"H:MM"`, `"HH:MM"` and `"HH:MM:00"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidTime(format!("'{s}': expected HH:MM"));

        let mut parts = s.trim().split(':');
        let hour = parts.next().ok_or_else(invalid)?;
        let minute = parts.next().ok_or_else(invalid)?;
        let second = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if let Some(sec) = second {
            if sec != "00" {
                return Err(SlotError::InvalidTime(format!(
                    "'{s}': seconds are not supported"
                )));
            }
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        ClockTime::from_hm(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
