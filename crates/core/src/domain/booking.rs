use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::package::{PackageId, Residency};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn generate() -> Self {
        Self(format!("BKG-{}", Uuid::new_v4().simple()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "confirmed" => Self::Confirmed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl ContactDetails {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.full_name.trim().is_empty() {
            return Err(DomainError::invalid("full_name", "must not be empty"));
        }
        validate_email(&self.email)
    }
}

pub(crate) fn validate_email(email: &str) -> Result<(), DomainError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(DomainError::invalid("email", format!("`{email}` is not a valid address"))),
    }
}

/// Booking input as submitted by a traveler, before an id is assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub package_id: Option<PackageId>,
    pub contact: ContactDetails,
    pub travel_date: NaiveDate,
    pub guests: u32,
    pub residency: Residency,
    pub message: Option<String>,
    pub total_price: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub package_id: Option<PackageId>,
    pub contact: ContactDetails,
    pub travel_date: NaiveDate,
    pub guests: u32,
    pub residency: Residency,
    pub message: Option<String>,
    pub total_price: Option<Decimal>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn submit(input: NewBooking, now: DateTime<Utc>) -> Result<Self, DomainError> {
        input.contact.validate()?;
        if input.guests == 0 {
            return Err(DomainError::invalid("guests", "at least one guest is required"));
        }
        if input.total_price.is_some_and(|total| total < Decimal::ZERO) {
            return Err(DomainError::invalid("total_price", "must not be negative"));
        }

        Ok(Self {
            id: BookingId::generate(),
            package_id: input.package_id,
            contact: input.contact,
            travel_date: input.travel_date,
            guests: input.guests,
            residency: input.residency,
            message: input.message.filter(|message| !message.trim().is_empty()),
            total_price: input.total_price,
            status: BookingStatus::Pending,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use super::{Booking, BookingStatus, ContactDetails, NewBooking};
    use crate::domain::package::{PackageId, Residency};
    use crate::errors::DomainError;

    fn new_booking() -> NewBooking {
        NewBooking {
            package_id: Some(PackageId("pkg-mara".to_string())),
            contact: ContactDetails {
                full_name: "Amani Otieno".to_string(),
                email: "amani@example.com".to_string(),
                phone: None,
            },
            travel_date: NaiveDate::from_ymd_opt(2026, 8, 14).expect("valid date"),
            guests: 2,
            residency: Residency::Resident,
            message: Some("   ".to_string()),
            total_price: Some(Decimal::from(60_000)),
        }
    }

    #[test]
    fn submitted_bookings_start_pending_with_generated_id() {
        let booking = Booking::submit(new_booking(), Utc::now()).expect("valid booking");

        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.id.0.starts_with("BKG-"));
        assert_eq!(booking.message, None, "blank messages are dropped");
    }

    #[test]
    fn rejects_zero_guests_and_bad_email() {
        let mut input = new_booking();
        input.guests = 0;
        let error = Booking::submit(input, Utc::now()).expect_err("zero guests");
        assert!(matches!(error, DomainError::InvalidInput { field: "guests", .. }));

        let mut input = new_booking();
        input.contact.email = "not-an-email".to_string();
        let error = Booking::submit(input, Utc::now()).expect_err("bad email");
        assert!(matches!(error, DomainError::InvalidInput { field: "email", .. }));
    }

    #[test]
    fn status_round_trips_through_storage_names() {
        for status in [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Cancelled] {
            assert_eq!(BookingStatus::parse(status.as_str()), status);
        }
    }
}
