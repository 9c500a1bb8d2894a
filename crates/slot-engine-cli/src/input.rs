//! Loading business and appointment JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use slot_engine::{
    BookingRequest, BookingStatus, Business, ClockTime, ExistingBooking, HoursPreset,
    ServiceCatalog, WeeklyHours, DEFAULT_SERVICE_DURATION_MINUTES,
};
use tracing::debug;

/// A business as written on disk: either explicit `hours` or a `preset`.
///
/// With neither, the default hours (Mon-Sat 9-5 with lunch) apply.
#[derive(Debug, Deserialize)]
struct BusinessFile {
    id: String,
    name: String,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    services: ServiceCatalog,
    #[serde(default)]
    hours: Option<WeeklyHours>,
    #[serde(default)]
    preset: Option<HoursPreset>,
}

impl BusinessFile {
    fn into_business(self) -> Business {
        let hours = self
            .hours
            .unwrap_or_else(|| self.preset.unwrap_or_default().hours());
        let mut business = Business::new(self.id, self.name);
        if let Some(tz) = self.timezone {
            business.timezone = tz;
        }
        business.services = self.services;
        business.hours = hours;
        business
    }
}

/// An appointment record as exported from the appointment store.
#[derive(Debug, Deserialize)]
struct StoredAppointment {
    #[serde(default)]
    business_id: Option<String>,
    appointment_date: NaiveDate,
    appointment_time: ClockTime,
    #[serde(default = "default_duration")]
    duration: u32,
    #[serde(default)]
    status: BookingStatus,
}

fn default_duration() -> u32 {
    DEFAULT_SERVICE_DURATION_MINUTES
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {what} file {}", path.display()))
}

pub fn load_business(path: &Path) -> Result<Business> {
    let file: BusinessFile = read_json(path, "business")?;
    let business = file.into_business();
    business
        .hours
        .validate()
        .with_context(|| format!("business '{}' has invalid hours", business.id))?;
    business
        .tz()
        .with_context(|| format!("business '{}' has an invalid timezone", business.id))?;
    debug!(business = %business.id, services = business.services.len(), "loaded business");
    Ok(business)
}

/// Bookings for `business` on `date`. Records for other businesses or days
/// are skipped; records without a business id are assumed to belong to it.
pub fn load_bookings(
    path: Option<&Path>,
    business: &Business,
    date: NaiveDate,
) -> Result<Vec<ExistingBooking>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let records: Vec<StoredAppointment> = read_json(path, "bookings")?;
    let total = records.len();
    let bookings: Vec<ExistingBooking> = records
        .into_iter()
        .filter(|r| r.appointment_date == date)
        .filter(|r| r.business_id.as_deref().is_none_or(|id| id == business.id))
        .map(|r| ExistingBooking::new(r.appointment_time, r.duration, r.status))
        .collect();
    debug!(total, matching = bookings.len(), %date, "loaded bookings");
    Ok(bookings)
}

pub fn load_request(path: &Path) -> Result<BookingRequest> {
    read_json(path, "booking request")
}
