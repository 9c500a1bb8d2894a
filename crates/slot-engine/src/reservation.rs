//! Turning a chosen slot into a new appointment record.
//!
//! The booking flow collects a service, the customer's details, a date and a
//! time, then asks [`Business::reserve`] to turn them into a
//! [`NewAppointment`]. The slot is re-checked against fresh bookings first:
//! slots shown to the customer a minute ago may be gone by the time they
//! confirm. Persisting the returned record is the caller's job.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::availability::Business;
use crate::booking::{BookingStatus, ExistingBooking};
use crate::clock::ClockTime;
use crate::error::SlotError;

/// What the customer asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service_name: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(rename = "appointment_date")]
    pub date: NaiveDate,
    #[serde(rename = "appointment_time")]
    pub time: ClockTime,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidRequest`] naming the first blank required
    /// field (service, customer name, customer email).
    pub fn validate(&self) -> Result<(), SlotError> {
        for (field, value) in [
            ("service_name", &self.service_name),
            ("customer_name", &self.customer_name),
            ("customer_email", &self.customer_email),
        ] {
            if value.trim().is_empty() {
                return Err(SlotError::InvalidRequest(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

/// An appointment ready to be written to the appointment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub business_id: String,
    pub service_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub appointment_date: NaiveDate,
    pub appointment_time: ClockTime,
    pub notes: String,
    pub duration: u32,
    pub price: Decimal,
    pub status: BookingStatus,
}

impl NewAppointment {
    /// The booking this appointment becomes once stored, as seen by later
    /// availability queries for the same day.
    pub fn as_existing(&self) -> ExistingBooking {
        ExistingBooking::new(self.appointment_time, self.duration, self.status)
    }

    /// Human-readable confirmation shown to the customer.
    pub fn confirmation_message(&self, business_name: &str) -> String {
        let mut lines = vec![
            "Your appointment has been booked successfully!".to_string(),
            String::new(),
            format!("Service: {}", self.service_name),
            format!("Name: {}", self.customer_name),
            format!("Email: {}", self.customer_email),
        ];
        if let Some(phone) = self.customer_phone.as_deref().filter(|p| !p.trim().is_empty()) {
            lines.push(format!("Phone: {phone}"));
        }
        lines.push(format!(
            "Date: {}",
            self.appointment_date.format("%A, %B %-d, %Y")
        ));
        lines.push(format!("Time: {}", self.appointment_time.display_12h()));
        lines.push(String::new());
        lines.push(format!(
            "You'll receive a confirmation email shortly. {business_name} will contact you if any changes are needed."
        ));
        lines.join("\n")
    }
}

impl Business {
    /// Accept `request` if its time is still bookable and build the pending
    /// appointment record for it.
    ///
    /// Duration and price come from the named service, falling back to 60
    /// minutes and zero when the service is unknown.
    ///
    /// # Errors
    ///
    /// - [`SlotError::InvalidRequest`] if a required field is blank.
    /// - [`SlotError::SlotUnavailable`] if the requested time is not among the
    ///   slots currently offered for that date and service.
    /// - Any error from [`Business::availability`].
    pub fn reserve(
        &self,
        request: &BookingRequest,
        bookings: &[ExistingBooking],
        now: DateTime<Utc>,
    ) -> Result<NewAppointment, SlotError> {
        request.validate()?;

        let availability = self.availability(request.date, &request.service_name, bookings, now)?;
        let offered = availability
            .slots()
            .iter()
            .any(|slot| slot.start_time == request.time);
        if !offered {
            warn!(
                business = %self.id,
                date = %request.date,
                time = %request.time,
                service = %request.service_name,
                "requested slot is not available"
            );
            return Err(SlotError::SlotUnavailable(format!(
                "{} at {} is not available for {}",
                request.date, request.time, request.service_name
            )));
        }

        let appointment = NewAppointment {
            business_id: self.id.clone(),
            service_name: request.service_name.clone(),
            customer_name: request.customer_name.trim().to_string(),
            customer_email: request.customer_email.trim().to_string(),
            customer_phone: request
                .customer_phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            appointment_date: request.date,
            appointment_time: request.time,
            notes: request.notes.clone().unwrap_or_default(),
            duration: self.services.duration_for(&request.service_name),
            price: self.services.price_for(&request.service_name),
            status: BookingStatus::Pending,
        };

        info!(
            business = %self.id,
            date = %appointment.appointment_date,
            time = %appointment.appointment_time,
            service = %appointment.service_name,
            "appointment reserved"
        );
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{ServiceCatalog, ServiceDefinition};
    use crate::schedule::HoursPreset;
    use chrono::TimeZone;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn business() -> Business {
        let mut business = Business::new("biz-7", "Fresh Cuts");
        business.hours = HoursPreset::Default.hours();
        business.services = ServiceCatalog::new(vec![ServiceDefinition::new(
            "Haircut",
            45,
            Decimal::from(30),
        )]);
        business
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    fn long_before() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn request(time: &str) -> BookingRequest {
        BookingRequest {
            service_name: "Haircut".to_string(),
            customer_name: "Sam Rivera".to_string(),
            customer_email: "sam@example.com".to_string(),
            customer_phone: None,
            date: monday(),
            time: t(time),
            notes: None,
        }
    }

    #[test]
    fn test_reserve_builds_pending_appointment() {
        let appt = business().reserve(&request("10:00"), &[], long_before()).unwrap();
        assert_eq!(appt.business_id, "biz-7");
        assert_eq!(appt.status, BookingStatus::Pending);
        assert_eq!(appt.duration, 45);
        assert_eq!(appt.price, Decimal::from(30));
        assert_eq!(appt.notes, "");
        assert_eq!(appt.appointment_time, t("10:00"));
    }

    #[test]
    fn test_reserve_unknown_service_uses_fallbacks() {
        let mut req = request("10:00");
        req.service_name = "Beard Trim".to_string();
        let appt = business().reserve(&req, &[], long_before()).unwrap();
        assert_eq!(appt.duration, 60);
        assert_eq!(appt.price, Decimal::ZERO);
    }

    #[test]
    fn test_reserve_rejects_taken_slot() {
        let bookings = [ExistingBooking::new(t("10:00"), 60, BookingStatus::Confirmed)];
        let err = business()
            .reserve(&request("10:30"), &bookings, long_before())
            .unwrap_err()
            .to_string();
        assert!(err.contains("Slot unavailable"), "got: {err}");
    }

    #[test]
    fn test_reserve_rejects_off_grid_time() {
        assert!(matches!(
            business().reserve(&request("10:15"), &[], long_before()),
            Err(SlotError::SlotUnavailable(_))
        ));
    }

    #[test]
    fn test_reserve_rejects_break_time() {
        assert!(business().reserve(&request("12:00"), &[], long_before()).is_err());
    }

    #[test]
    fn test_reserve_rejects_blank_email() {
        let mut req = request("10:00");
        req.customer_email = "  ".to_string();
        let err = business()
            .reserve(&req, &[], long_before())
            .unwrap_err()
            .to_string();
        assert!(err.contains("customer_email is required"), "got: {err}");
    }

    #[test]
    fn test_reserved_appointment_blocks_next_query() {
        let biz = business();
        let appt = biz.reserve(&request("10:00"), &[], long_before()).unwrap();
        let bookings = [appt.as_existing()];
        assert!(biz.reserve(&request("10:00"), &bookings, long_before()).is_err());
        assert!(biz.reserve(&request("10:30"), &bookings, long_before()).is_err());
        // 45 minutes from 10:00 ends at 10:45, so 11:00 is free.
        assert!(biz.reserve(&request("11:00"), &bookings, long_before()).is_ok());
    }

    #[test]
    fn test_confirmation_message() {
        let mut req = request("14:30");
        req.customer_phone = Some("555-0100".to_string());
        let appt = business().reserve(&req, &[], long_before()).unwrap();
        let msg = appt.confirmation_message("Fresh Cuts");
        assert!(msg.contains("Service: Haircut"));
        assert!(msg.contains("Phone: 555-0100"));
        assert!(msg.contains("Date: Monday, March 16, 2026"));
        assert!(msg.contains("Time: 2:30 PM"));
        assert!(msg.contains("Fresh Cuts will contact you"));
    }

    #[test]
    fn test_reserve_normalises_phone() {
        let mut req = request("10:00");
        req.customer_phone = Some("   ".to_string());
        let appt = business().reserve(&req, &[], long_before()).unwrap();
        assert_eq!(appt.customer_phone, None);

        req.customer_phone = Some(" 555-0100 ".to_string());
        let appt = business().reserve(&req, &[], long_before()).unwrap();
        assert_eq!(appt.customer_phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_confirmation_omits_missing_phone() {
        let appt = business().reserve(&request("09:00"), &[], long_before()).unwrap();
        assert!(!appt.confirmation_message("Fresh Cuts").contains("Phone:"));
    }

    #[test]
    fn test_request_deserializes_from_widget_fields() {
        let req: BookingRequest = serde_json::from_str(
            r#"{
                "service_name": "Haircut",
                "customer_name": "Sam",
                "customer_email": "sam@example.com",
                "appointment_date": "2026-03-16",
                "appointment_time": "10:00"
            }"#,
        )
        .unwrap();
        assert_eq!(req.date, monday());
        assert_eq!(req.time, t("10:00"));
        assert_eq!(req.customer_phone, None);
    }
}
