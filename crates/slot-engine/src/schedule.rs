//! Business hours: one [`DaySchedule`] per weekday, with an optional break.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};

use crate::clock::ClockTime;
use crate::error::SlotError;
use crate::interval::TimeRange;

// ── DaySchedule ─────────────────────────────────────────────────────────────

/// Opening hours for a single weekday.
///
/// Field names match the business-hours records written by the settings
/// screen. A break field stored as an empty string means "no break".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub is_open: bool,
    pub open_time: ClockTime,
    pub close_time: ClockTime,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub break_start: Option<ClockTime>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub break_end: Option<ClockTime>,
}

impl DaySchedule {
    /// An open day without a break.
    pub fn open(open_time: ClockTime, close_time: ClockTime) -> Self {
        DaySchedule {
            is_open: true,
            open_time,
            close_time,
            break_start: None,
            break_end: None,
        }
    }

    /// A closed day. The times are placeholders the settings screen shows
    /// when the owner reopens the day.
    pub fn closed() -> Self {
        DaySchedule {
            is_open: false,
            ..DaySchedule::open(hm(9, 0), hm(17, 0))
        }
    }

    pub fn with_break(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.break_start = Some(start);
        self.break_end = Some(end);
        self
    }

    /// Check the schedule is well formed.
    ///
    /// Closed days are always accepted: their times are never read.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidSchedule`] if `close_time <= open_time`,
    /// if only one end of the break is set, or if `break_end <= break_start`.
    pub fn validate(&self) -> Result<(), SlotError> {
        if !self.is_open {
            return Ok(());
        }
        if self.close_time <= self.open_time {
            return Err(SlotError::InvalidSchedule(format!(
                "close time {} is not after open time {}",
                self.close_time, self.open_time
            )));
        }
        match (self.break_start, self.break_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) if start < end => Ok(()),
            (Some(start), Some(end)) => Err(SlotError::InvalidSchedule(format!(
                "break end {end} is not after break start {start}"
            ))),
            (Some(_), None) => Err(SlotError::InvalidSchedule(
                "break start is set without a break end".to_string(),
            )),
            (None, Some(_)) => Err(SlotError::InvalidSchedule(
                "break end is set without a break start".to_string(),
            )),
        }
    }

    /// The break as a half-open range, if both ends are set.
    pub fn break_window(&self) -> Option<TimeRange> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => Some(TimeRange::between(start, end)),
            _ => None,
        }
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        DaySchedule::closed()
    }
}

fn hm(hour: u32, minute: u32) -> ClockTime {
    // Only called with literal in-range components.
    ClockTime::from_hm(hour, minute).unwrap_or(ClockTime::MIDNIGHT)
}

/// Deserialize `null`, a missing field, or a blank string as `None`.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<ClockTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

// ── WeeklyHours ─────────────────────────────────────────────────────────────

/// A business's hours for every day of the week.
///
/// Days missing from the serialized form are closed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(default)]
    pub monday: DaySchedule,
    #[serde(default)]
    pub tuesday: DaySchedule,
    #[serde(default)]
    pub wednesday: DaySchedule,
    #[serde(default)]
    pub thursday: DaySchedule,
    #[serde(default)]
    pub friday: DaySchedule,
    #[serde(default)]
    pub saturday: DaySchedule,
    #[serde(default)]
    pub sunday: DaySchedule,
}

impl WeeklyHours {
    /// Build by evaluating `f` for each weekday.
    pub fn from_fn(mut f: impl FnMut(Weekday) -> DaySchedule) -> Self {
        WeeklyHours {
            monday: f(Weekday::Mon),
            tuesday: f(Weekday::Tue),
            wednesday: f(Weekday::Wed),
            thursday: f(Weekday::Thu),
            friday: f(Weekday::Fri),
            saturday: f(Weekday::Sat),
            sunday: f(Weekday::Sun),
        }
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Validate every day, reporting the first failure with its weekday.
    pub fn validate(&self) -> Result<(), SlotError> {
        for weekday in WEEK {
            self.day(weekday).validate().map_err(|e| match e {
                SlotError::InvalidSchedule(msg) => {
                    SlotError::InvalidSchedule(format!("{}: {msg}", weekday_name(weekday)))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase weekday name as used in stored business hours.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

// ── Presets ─────────────────────────────────────────────────────────────────

/// Ready-made weekly hours offered during business setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoursPreset {
    /// Mon-Sat 09:00-17:00 with a 12:00-13:00 lunch break.
    #[default]
    Default,
    /// Mon-Fri 09:00-17:00, no break.
    Standard,
    /// Mon-Sat 10:00-18:00, no break.
    Retail,
    /// Mon-Sat 09:00-19:00 with a 12:00-13:00 lunch break.
    Salon,
}

impl HoursPreset {
    pub fn hours(self) -> WeeklyHours {
        let lunch = |day: DaySchedule| day.with_break(hm(12, 0), hm(13, 0));
        WeeklyHours::from_fn(|weekday| {
            let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
            match self {
                HoursPreset::Default if weekday != Weekday::Sun => {
                    lunch(DaySchedule::open(hm(9, 0), hm(17, 0)))
                }
                HoursPreset::Standard if !weekend => DaySchedule::open(hm(9, 0), hm(17, 0)),
                HoursPreset::Retail if weekday != Weekday::Sun => {
                    DaySchedule::open(hm(10, 0), hm(18, 0))
                }
                HoursPreset::Salon if weekday != Weekday::Sun => {
                    lunch(DaySchedule::open(hm(9, 0), hm(19, 0)))
                }
                _ => DaySchedule::closed(),
            }
        })
    }
}

impl fmt::Display for HoursPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HoursPreset::Default => "default",
            HoursPreset::Standard => "standard",
            HoursPreset::Retail => "retail",
            HoursPreset::Salon => "salon",
        };
        f.write_str(name)
    }
}

impl FromStr for HoursPreset {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(HoursPreset::Default),
            "standard" => Ok(HoursPreset::Standard),
            "retail" => Ok(HoursPreset::Retail),
            "salon" => Ok(HoursPreset::Salon),
            other => Err(SlotError::InvalidSchedule(format!(
                "unknown hours preset '{other}'"
            ))),
        }
    }
}
