use std::collections::BTreeSet;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use safari_core::domain::add_on::AddOnId;
use safari_core::domain::booking::{Booking, BookingStatus, ContactDetails, NewBooking};
use safari_core::domain::package::{Package, Residency};
use safari_core::errors::{ApplicationError, DomainError};
use safari_core::quote::{available_add_ons, format_amount, QuoteBreakdown, QuoteRequest};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{active_package, api_error, correlation_id, ApiResult, AppState};
use crate::messages::QuoteMessageView;

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteInput {
    pub package_slug: String,
    pub residency: Residency,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub add_on_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequestInput {
    #[serde(flatten)]
    pub quote: QuoteInput,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub travel_date: NaiveDate,
    pub notes: Option<String>,
}

/// Amounts rounded to whole units with the tier's currency code.
#[derive(Debug, Serialize)]
pub struct QuoteDisplay {
    pub base_price: String,
    pub child_unit_price: String,
    pub adult_total: String,
    pub child_total: String,
    pub add_ons_total: String,
    pub grand_total: String,
    pub per_person: String,
}

impl QuoteDisplay {
    fn new(breakdown: &QuoteBreakdown, currency: &str) -> Self {
        Self {
            base_price: format_amount(breakdown.base_price, currency),
            child_unit_price: format_amount(breakdown.child_unit_price, currency),
            adult_total: format_amount(breakdown.adult_total, currency),
            child_total: format_amount(breakdown.child_total, currency),
            add_ons_total: format_amount(breakdown.add_ons_total, currency),
            grand_total: format_amount(breakdown.grand_total, currency),
            per_person: format_amount(breakdown.per_person, currency),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub package_slug: String,
    pub package_name: String,
    pub currency: String,
    pub travelers: u32,
    pub breakdown: QuoteBreakdown,
    pub display: QuoteDisplay,
}

#[derive(Debug, Serialize)]
pub struct QuoteRequestResponse {
    pub booking_id: String,
    pub status: BookingStatus,
    pub quote: QuoteResponse,
    pub message: String,
}

fn validate_party(input: &QuoteInput) -> Result<(), DomainError> {
    if input.adults == 0 {
        return Err(DomainError::invalid("adults", "at least one adult is required"));
    }
    Ok(())
}

/// Selections are resolved only against add-ons offered at the package's
/// location; anything else is dropped like an unknown id.
fn price(state: &AppState, package: &Package, input: &QuoteInput) -> QuoteBreakdown {
    let offered =
        available_add_ons(package, &state.add_ons).into_iter().cloned().collect::<Vec<_>>();
    let request = QuoteRequest {
        package,
        residency: input.residency,
        adults: input.adults,
        children: input.children,
        selected_add_on_ids: input
            .add_on_ids
            .iter()
            .map(|id| AddOnId(id.clone()))
            .collect::<BTreeSet<_>>(),
    };
    state.quote_engine.quote(&request, &offered)
}

fn quote_response(state: &AppState, package: &Package, breakdown: QuoteBreakdown) -> QuoteResponse {
    let currency = state.pricing.currency_for(breakdown.residency).to_string();
    QuoteResponse {
        package_slug: package.slug.clone(),
        package_name: package.name.clone(),
        travelers: breakdown.travelers(),
        display: QuoteDisplay::new(&breakdown, &currency),
        currency,
        breakdown,
    }
}

pub async fn create_quote(
    State(state): State<AppState>,
    Json(input): Json<QuoteInput>,
) -> ApiResult<Json<QuoteResponse>> {
    let correlation_id = correlation_id();
    validate_party(&input)
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;
    let package = active_package(&state, &input.package_slug)
        .await
        .map_err(|error| api_error(error, &correlation_id))?;

    let breakdown = price(&state, &package, &input);
    info!(
        event_name = "quote.computed",
        correlation_id = %correlation_id,
        package_id = %package.id.0,
        residency = breakdown.residency.label(),
        travelers = breakdown.travelers(),
        grand_total = %breakdown.grand_total,
        "quote computed"
    );

    Ok(Json(quote_response(&state, &package, breakdown)))
}

/// Prices the party, renders the itemized message and files it as a pending
/// booking whose total is the quoted grand total.
pub async fn create_quote_request(
    State(state): State<AppState>,
    Json(input): Json<QuoteRequestInput>,
) -> ApiResult<(StatusCode, Json<QuoteRequestResponse>)> {
    let correlation_id = correlation_id();
    validate_party(&input.quote)
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;
    let package = active_package(&state, &input.quote.package_slug)
        .await
        .map_err(|error| api_error(error, &correlation_id))?;

    let breakdown = price(&state, &package, &input.quote);
    let currency = state.pricing.currency_for(breakdown.residency);
    let message = state
        .messages
        .render(&QuoteMessageView::new(
            &package,
            &breakdown,
            currency,
            input.travel_date,
            input.notes.as_deref(),
        ))
        .map_err(|error| {
            api_error(
                ApplicationError::Configuration(format!("quote message template: {error}")),
                &correlation_id,
            )
        })?;

    let booking = Booking::submit(
        NewBooking {
            package_id: Some(package.id.clone()),
            contact: ContactDetails {
                full_name: input.full_name,
                email: input.email,
                phone: input.phone.filter(|phone| !phone.trim().is_empty()),
            },
            travel_date: input.travel_date,
            guests: breakdown.travelers(),
            residency: breakdown.residency,
            message: Some(message.clone()),
            total_price: Some(breakdown.grand_total),
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
        event_name = "quote.request.submitted",
        correlation_id = %correlation_id,
        booking_id = %booking.id.0,
        package_id = %package.id.0,
        grand_total = %breakdown.grand_total,
        "quote request stored as pending booking"
    );

    Ok((
        StatusCode::CREATED,
        Json(QuoteRequestResponse {
            booking_id: booking.id.0,
            status: booking.status,
            quote: quote_response(&state, &package, breakdown),
            message,
        }),
    ))
}
