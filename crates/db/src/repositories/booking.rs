use chrono::NaiveDate;
use sqlx::Row;

use safari_core::domain::booking::{Booking, BookingId, BookingStatus, ContactDetails};
use safari_core::domain::package::{PackageId, Residency};

use super::{decode_error, parse_decimal, parse_timestamp, BookingRepository, RepositoryError};
use crate::DbPool;

pub struct SqlBookingRepository {
    pool: DbPool,
}

impl SqlBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn residency_as_str(residency: Residency) -> &'static str {
    match residency {
        Residency::Resident => "resident",
        Residency::NonResident => "non_resident",
    }
}

fn parse_residency(value: &str) -> Result<Residency, RepositoryError> {
    match value {
        "resident" => Ok(Residency::Resident),
        "non_resident" => Ok(Residency::NonResident),
        other => Err(RepositoryError::Decode(format!("unknown residency `{other}`"))),
    }
}

fn row_to_booking(row: &sqlx::sqlite::SqliteRow) -> Result<Booking, RepositoryError> {
    let id: String = row.try_get("id").map_err(decode_error)?;
    let package_id: Option<String> = row.try_get("package_id").map_err(decode_error)?;
    let full_name: String = row.try_get("full_name").map_err(decode_error)?;
    let email: String = row.try_get("email").map_err(decode_error)?;
    let phone: Option<String> = row.try_get("phone").map_err(decode_error)?;
    let travel_date_str: String = row.try_get("travel_date").map_err(decode_error)?;
    let guests: i64 = row.try_get("guests").map_err(decode_error)?;
    let residency_str: String = row.try_get("residency").map_err(decode_error)?;
    let message: Option<String> = row.try_get("message").map_err(decode_error)?;
    let total_price_str: Option<String> = row.try_get("total_price").map_err(decode_error)?;
    let status_str: String = row.try_get("status").map_err(decode_error)?;
    let created_at_str: String = row.try_get("created_at").map_err(decode_error)?;

    let travel_date = NaiveDate::parse_from_str(&travel_date_str, "%Y-%m-%d")
        .map_err(|error| RepositoryError::Decode(format!("travel_date `{travel_date_str}`: {error}")))?;
    let guests = u32::try_from(guests)
        .map_err(|_| RepositoryError::Decode(format!("guests out of range: {guests}")))?;

    Ok(Booking {
        id: BookingId(id),
        package_id: package_id.map(PackageId),
        contact: ContactDetails { full_name, email, phone },
        travel_date,
        guests,
        residency: parse_residency(&residency_str)?,
        message,
        total_price: total_price_str
            .as_deref()
            .map(|raw| parse_decimal("total_price", raw))
            .transpose()?,
        status: BookingStatus::parse(&status_str),
        created_at: parse_timestamp("created_at", &created_at_str)?,
    })
}

#[async_trait::async_trait]
impl BookingRepository for SqlBookingRepository {
    async fn create(&self, booking: Booking) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO bookings (id, package_id, full_name, email, phone, travel_date, guests,
                                   residency, message, total_price, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&booking.id.0)
        .bind(booking.package_id.as_ref().map(|id| id.0.as_str()))
        .bind(&booking.contact.full_name)
        .bind(&booking.contact.email)
        .bind(&booking.contact.phone)
        .bind(booking.travel_date.format("%Y-%m-%d").to_string())
        .bind(i64::from(booking.guests))
        .bind(residency_as_str(booking.residency))
        .bind(&booking.message)
        .bind(booking.total_price.map(|total| total.to_string()))
        .bind(booking.status.as_str())
        .bind(booking.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, package_id, full_name, email, phone, travel_date, guests, residency,
                    message, total_price, status, created_at
             FROM bookings WHERE id = ?",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_booking).transpose()
    }
}
