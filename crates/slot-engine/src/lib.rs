//! # slot-engine
//!
//! Deterministic appointment availability for small businesses.
//!
//! Given a business's weekly hours, an optional break window, a service
//! length and the appointments already booked, the engine produces the
//! half-hour start times a customer can still choose, and turns a chosen
//! slot into a pending appointment record.
//!
//! No I/O happens here. Hours and bookings come from the caller's stores and
//! the current time is always passed in explicitly.
//!
//! ## Modules
//!
//! - [`clock`] — `HH:MM` wall-clock values as integer minutes
//! - [`interval`] — Half-open minute ranges and the shared overlap rule
//! - [`schedule`] — Per-weekday business hours, break windows, presets
//! - [`booking`] — Services, existing appointments, status lifecycle
//! - [`slots`] — Slot generation and conflict / past-time filtering
//! - [`availability`] — Business-level queries with time-zone handling
//! - [`reservation`] — Re-check a chosen slot and build the appointment
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod clock;
pub mod error;
pub mod interval;
pub mod reservation;
pub mod schedule;
pub mod slots;

pub use availability::{Availability, AvailabilityQuery, Business};
pub use booking::{
    BookingStatus, ExistingBooking, ServiceCatalog, ServiceDefinition,
    DEFAULT_SERVICE_DURATION_MINUTES,
};
pub use clock::ClockTime;
pub use error::{Result, SlotError};
pub use interval::TimeRange;
pub use reservation::{BookingRequest, NewAppointment};
pub use schedule::{DaySchedule, HoursPreset, WeeklyHours};
pub use slots::{compute_available_slots, CandidateSlot, SlotGenerator, SLOT_STEP_MINUTES};
