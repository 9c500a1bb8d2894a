//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
