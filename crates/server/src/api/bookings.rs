use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use safari_core::domain::booking::{Booking, BookingStatus, ContactDetails, NewBooking};
use safari_core::domain::package::Residency;
use safari_core::errors::ApplicationError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{active_package, api_error, correlation_id, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct BookingInput {
    pub package_slug: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub travel_date: NaiveDate,
    pub guests: u32,
    pub residency: Residency,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub status: BookingStatus,
    pub created_at: String,
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<BookingInput>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let correlation_id = correlation_id();

    let package_id = match input.package_slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => Some(
            active_package(&state, slug)
                .await
                .map_err(|error| api_error(error, &correlation_id))?
                .id,
        ),
        _ => None,
    };

    let booking = Booking::submit(
        NewBooking {
            package_id,
            contact: ContactDetails {
                full_name: input.full_name,
                email: input.email,
                phone: input.phone.filter(|phone| !phone.trim().is_empty()),
            },
            travel_date: input.travel_date,
            guests: input.guests,
            residency: input.residency,
            message: input.message,
            total_price: None,
        },
        Utc::now(),
    )
    .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    state
        .bookings
        .create(booking.clone())
        .await
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    info!(
        event_name = "booking.created",
        correlation_id = %correlation_id,
        booking_id = %booking.id.0,
        guests = booking.guests,
        "booking request stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booking_id: booking.id.0,
            status: booking.status,
            created_at: booking.created_at.to_rfc3339(),
        }),
    ))
}
