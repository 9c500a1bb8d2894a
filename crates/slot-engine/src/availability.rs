//! Availability queries against a business.
//!
//! This is the layer a booking flow talks to. It picks the weekday's hours,
//! resolves the service length, turns the caller's UTC "now" into the
//! business's local wall clock, and hands everything to
//! [`compute_available_slots`].
//!
//! # Time zones
//!
//! "Today" is decided in the business's configured IANA time zone, never the
//! caller's. A customer in Tokyo browsing a salon in New York sees the
//! salon's today.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::booking::{ExistingBooking, ServiceCatalog};
use crate::error::SlotError;
use crate::schedule::{weekday_name, DaySchedule, WeeklyHours};
use crate::slots::{compute_available_slots, CandidateSlot};

// ── Business ────────────────────────────────────────────────────────────────

/// A business taking appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    /// IANA time zone name, e.g. `"America/New_York"`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub services: ServiceCatalog,
    #[serde(default)]
    pub hours: WeeklyHours,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Business {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Business {
            id: id.into(),
            name: name.into(),
            timezone: default_timezone(),
            services: ServiceCatalog::default(),
            hours: WeeklyHours::default(),
        }
    }

    /// The hours that apply on `date`.
    pub fn schedule_for(&self, date: NaiveDate) -> &DaySchedule {
        self.hours.day(date.weekday())
    }

    /// The business's time zone.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTimezone`] if the name is not a known IANA zone.
    pub fn tz(&self) -> Result<Tz, SlotError> {
        parse_timezone(&self.timezone)
    }

    /// Wall-clock time at the business for the instant `now`.
    pub fn local_now(&self, now: DateTime<Utc>) -> Result<NaiveDateTime, SlotError> {
        Ok(now.with_timezone(&self.tz()?).naive_local())
    }

    /// Bookable slots for `service_name` on `date`.
    ///
    /// `bookings` are the appointments already recorded for this business on
    /// `date`; the caller is responsible for handing over a consistent
    /// snapshot. An unknown service name falls back to a 60-minute service.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidTimezone`] for a bad time zone, and any
    /// error from [`compute_available_slots`].
    pub fn availability(
        &self,
        date: NaiveDate,
        service_name: &str,
        bookings: &[ExistingBooking],
        now: DateTime<Utc>,
    ) -> Result<Availability, SlotError> {
        let local_now = self.local_now(now)?;
        let schedule = self.schedule_for(date);
        let duration = self.services.duration_for(service_name);

        debug!(
            business = %self.id,
            %date,
            day = weekday_name(date.weekday()),
            service = service_name,
            duration,
            bookings = bookings.len(),
            %local_now,
            "computing availability"
        );

        let slots = compute_available_slots(schedule, bookings, duration, date, local_now)?;

        debug!(business = %self.id, %date, slots = slots.len(), "availability computed");
        Ok(Availability::from(slots))
    }
}

/// Parse an IANA time zone name into `Tz`.
fn parse_timezone(s: &str) -> Result<Tz, SlotError> {
    s.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(format!("'{s}'")))
}

// ── AvailabilityQuery ───────────────────────────────────────────────────────

/// One "what times are free?" question from a booking flow.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery<'a> {
    pub business: &'a Business,
    pub date: NaiveDate,
    pub service_name: &'a str,
}

impl<'a> AvailabilityQuery<'a> {
    pub fn new(business: &'a Business, date: NaiveDate, service_name: &'a str) -> Self {
        AvailabilityQuery {
            business,
            date,
            service_name,
        }
    }

    pub fn run(
        &self,
        bookings: &[ExistingBooking],
        now: DateTime<Utc>,
    ) -> Result<Availability, SlotError> {
        self.business
            .availability(self.date, self.service_name, bookings, now)
    }
}

// ── Availability ────────────────────────────────────────────────────────────

/// The answer to an availability query.
///
/// `NoAvailability` is a normal outcome, not a failure: the day is closed or
/// fully booked and the customer should try another date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "slots", rename_all = "snake_case")]
pub enum Availability {
    Open(Vec<CandidateSlot>),
    NoAvailability,
}

impl Availability {
    pub fn slots(&self) -> &[CandidateSlot] {
        match self {
            Availability::Open(slots) => slots,
            Availability::NoAvailability => &[],
        }
    }

    pub fn into_slots(self) -> Vec<CandidateSlot> {
        match self {
            Availability::Open(slots) => slots,
            Availability::NoAvailability => Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Open(_))
    }
}

impl From<Vec<CandidateSlot>> for Availability {
    fn from(slots: Vec<CandidateSlot>) -> Self {
        if slots.is_empty() {
            Availability::NoAvailability
        } else {
            Availability::Open(slots)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingStatus, ServiceDefinition};
    use crate::clock::ClockTime;
    use crate::schedule::HoursPreset;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn salon() -> Business {
        let mut business = Business::new("biz-1", "Shear Joy");
        business.timezone = "America/New_York".to_string();
        business.hours = HoursPreset::Salon.hours();
        business.services = ServiceCatalog::new(vec![
            ServiceDefinition::new("Haircut", 30, Decimal::from(25)),
            ServiceDefinition::new("Color", 90, Decimal::from(80)),
        ]);
        business
    }

    /// Monday, March 16 2026.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    fn long_before() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_availability_uses_weekday_hours() {
        let result = salon()
            .availability(monday(), "Haircut", &[], long_before())
            .unwrap();
        let slots = result.slots();
        assert_eq!(slots.first().unwrap().start_time, t("09:00"));
        assert_eq!(slots.last().unwrap().start_time, t("18:30"));
        // 12:00 and 12:30 fall in the lunch break.
        assert!(!slots.iter().any(|s| s.start_time == t("12:00")));
        assert!(!slots.iter().any(|s| s.start_time == t("12:30")));
    }

    #[test]
    fn test_availability_closed_sunday_is_no_availability() {
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let result = salon()
            .availability(sunday, "Haircut", &[], long_before())
            .unwrap();
        assert_eq!(result, Availability::NoAvailability);
        assert!(!result.is_available());
    }

    #[test]
    fn test_availability_uses_service_duration() {
        let result = salon()
            .availability(monday(), "Color", &[], long_before())
            .unwrap();
        // Last 90-minute start that ends by 19:00.
        assert_eq!(result.slots().last().unwrap().start_time, t("17:30"));
        assert_eq!(result.slots().last().unwrap().end_time, t("19:00"));
    }

    #[test]
    fn test_unknown_service_defaults_to_sixty_minutes() {
        let result = salon()
            .availability(monday(), "Massage", &[], long_before())
            .unwrap();
        assert_eq!(result.slots().last().unwrap().start_time, t("18:00"));
    }

    #[test]
    fn test_today_is_decided_in_business_timezone() {
        // 2026-03-16 18:10 UTC is 14:10 EDT in New York.
        let now = Utc.with_ymd_and_hms(2026, 3, 16, 18, 10, 0).unwrap();
        let result = salon().availability(monday(), "Haircut", &[], now).unwrap();
        assert_eq!(result.slots().first().unwrap().start_time, t("14:30"));
    }

    #[test]
    fn test_utc_date_ahead_of_business_date() {
        // 2026-03-17 02:00 UTC is still Monday 22:00 in New York, so Monday
        // is "today" there and every Monday slot has passed.
        let now = Utc.with_ymd_and_hms(2026, 3, 17, 2, 0, 0).unwrap();
        let result = salon().availability(monday(), "Haircut", &[], now).unwrap();
        assert_eq!(result, Availability::NoAvailability);

        // Tuesday is not yet today for the business, so nothing is filtered.
        let tuesday = monday().succ_opt().unwrap();
        let result = salon().availability(tuesday, "Haircut", &[], now).unwrap();
        assert_eq!(result.slots().first().unwrap().start_time, t("09:00"));
    }

    #[test]
    fn test_bookings_are_respected() {
        let bookings = [ExistingBooking::new(t("09:00"), 90, BookingStatus::Confirmed)];
        let result = salon()
            .availability(monday(), "Haircut", &bookings, long_before())
            .unwrap();
        assert_eq!(result.slots().first().unwrap().start_time, t("10:30"));
    }

    #[test]
    fn test_invalid_timezone() {
        let mut business = salon();
        business.timezone = "Mars/Olympus_Mons".to_string();
        let err = business
            .availability(monday(), "Haircut", &[], long_before())
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_query_runs_against_business() {
        let business = salon();
        let query = AvailabilityQuery::new(&business, monday(), "Haircut");
        let direct = business
            .availability(monday(), "Haircut", &[], long_before())
            .unwrap();
        assert_eq!(query.run(&[], long_before()).unwrap(), direct);
    }

    #[test]
    fn test_business_deserializes_with_defaults() {
        let business: Business =
            serde_json::from_str(r#"{"id":"b","name":"Corner Shop"}"#).unwrap();
        assert_eq!(business.timezone, "UTC");
        assert!(business.services.is_empty());
        assert!(!business.schedule_for(monday()).is_open);
    }

    #[test]
    fn test_availability_serializes_tagged() {
        let json = serde_json::to_value(Availability::NoAvailability).unwrap();
        assert_eq!(json["status"], "no_availability");

        let open = salon()
            .availability(monday(), "Haircut", &[], long_before())
            .unwrap();
        let json = serde_json::to_value(&open).unwrap();
        assert_eq!(json["status"], "open");
        assert_eq!(json["slots"][0]["start_time"], "09:00");
        assert_eq!(json["slots"][0]["date"], "2026-03-16");
    }
}
