//! Services offered by a business and the appointments already on its books.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, MINUTES_PER_DAY};
use crate::error::SlotError;
use crate::interval::TimeRange;

/// Service length assumed when a service omits it or cannot be found.
pub const DEFAULT_SERVICE_DURATION_MINUTES: u32 = 60;

// ── BookingStatus ───────────────────────────────────────────────────────────

/// Where an appointment is in its lifecycle.
///
/// ```text
/// pending ──► confirmed ──► completed
///    │            │
///    └──► cancelled ◄──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Whether the appointment still holds its time. Only cancelled
    /// appointments release their slot.
    pub fn is_active(self) -> bool {
        self != BookingStatus::Cancelled
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    /// Move to `next`, or fail if the lifecycle does not allow it.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTransition`] for any move not drawn in the
    /// diagram above, including staying in the same state.
    pub fn transition(self, next: BookingStatus) -> Result<BookingStatus, SlotError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(SlotError::InvalidTransition(format!("{self} -> {next}")))
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

// ── ExistingBooking ─────────────────────────────────────────────────────────

/// An appointment already recorded for the day being queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    pub start_time: ClockTime,
    pub duration_minutes: u32,
    #[serde(default)]
    pub status: BookingStatus,
}

impl ExistingBooking {
    pub fn new(start_time: ClockTime, duration_minutes: u32, status: BookingStatus) -> Self {
        ExistingBooking {
            start_time,
            duration_minutes,
            status,
        }
    }

    /// The time this booking occupies, using its own stored duration.
    pub fn interval(&self) -> TimeRange {
        TimeRange::starting_at(self.start_time, self.duration_minutes)
    }

    /// # Errors
    ///
    /// Returns [`SlotError::InvalidBooking`] if the duration is zero or the
    /// booking runs past midnight.
    pub fn validate(&self) -> Result<(), SlotError> {
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidBooking(format!(
                "booking at {} has zero duration",
                self.start_time
            )));
        }
        let end = self
            .start_time
            .minutes()
            .checked_add(self.duration_minutes)
            .ok_or_else(|| {
                SlotError::InvalidBooking(format!(
                    "booking at {} for {} minutes overflows the day",
                    self.start_time, self.duration_minutes
                ))
            })?;
        if end > MINUTES_PER_DAY {
            return Err(SlotError::InvalidBooking(format!(
                "booking at {} for {} minutes runs past midnight",
                self.start_time, self.duration_minutes
            )));
        }
        Ok(())
    }

    pub fn transition(&mut self, next: BookingStatus) -> Result<(), SlotError> {
        self.status = self.status.transition(next)?;
        Ok(())
    }
}

// ── Services ────────────────────────────────────────────────────────────────

/// Something a business sells by the appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub name: String,
    #[serde(default = "default_duration", alias = "duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub price: Decimal,
}

fn default_duration() -> u32 {
    DEFAULT_SERVICE_DURATION_MINUTES
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>, duration_minutes: u32, price: Decimal) -> Self {
        ServiceDefinition {
            name: name.into(),
            duration_minutes,
            price,
        }
    }
}

/// A business's list of services.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog(Vec<ServiceDefinition>);

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceDefinition>) -> Self {
        ServiceCatalog(services)
    }

    /// Look up a service by exact name.
    pub fn find(&self, name: &str) -> Option<&ServiceDefinition> {
        self.0.iter().find(|s| s.name == name)
    }

    /// The named service's duration, or [`DEFAULT_SERVICE_DURATION_MINUTES`]
    /// if no service has that name.
    pub fn duration_for(&self, name: &str) -> u32 {
        self.find(name)
            .map(|s| s.duration_minutes)
            .unwrap_or(DEFAULT_SERVICE_DURATION_MINUTES)
    }

    /// The named service's price, or zero if no service has that name.
    pub fn price_for(&self, name: &str) -> Decimal {
        self.find(name).map(|s| s.price).unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ServiceDefinition> for ServiceCatalog {
    fn from_iter<I: IntoIterator<Item = ServiceDefinition>>(iter: I) -> Self {
        ServiceCatalog(iter.into_iter().collect())
    }
}
