use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use safari_core::domain::review::{NewReview, Review};
use safari_core::errors::ApplicationError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{active_package, api_error, correlation_id, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub package_slug: String,
    pub review_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<Decimal>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewCreatedResponse {
    pub review_id: String,
    pub approved: bool,
    pub message: &'static str,
}

/// Mean rating to one decimal place, `None` when there is nothing to average.
fn average_rating(reviews: &[Review]) -> Option<Decimal> {
    if reviews.is_empty() {
        return None;
    }
    let sum = reviews.iter().map(|review| Decimal::from(review.rating)).sum::<Decimal>();
    Some((sum / Decimal::from(reviews.len())).round_dp(1))
}

pub async fn list_reviews(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<ReviewListResponse>> {
    let correlation_id = correlation_id();
    let package =
        active_package(&state, &slug).await.map_err(|error| api_error(error, &correlation_id))?;

    let reviews = state
        .reviews
        .list_approved(&package.id)
        .await
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    Ok(Json(ReviewListResponse {
        package_slug: package.slug,
        review_count: reviews.len(),
        average_rating: average_rating(&reviews),
        reviews,
    }))
}

pub async fn create_review(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> ApiResult<(StatusCode, Json<ReviewCreatedResponse>)> {
    let correlation_id = correlation_id();
    let package =
        active_package(&state, &slug).await.map_err(|error| api_error(error, &correlation_id))?;

    let review = Review::submit(
        NewReview {
            package_id: package.id.clone(),
            author_name: input.author_name,
            rating: input.rating,
            comment: input.comment,
        },
        Utc::now(),
    )
    .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    state
        .reviews
        .create(review.clone())
        .await
        .map_err(|error| api_error(ApplicationError::from(error), &correlation_id))?;

    info!(
        event_name = "review.submitted",
        correlation_id = %correlation_id,
        review_id = %review.id.0,
        package_id = %package.id.0,
        rating = review.rating,
        "review queued for moderation"
    );

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            review_id: review.id.0,
            approved: review.approved,
            message: "Thanks! Your review will appear once it has been approved.",
        }),
    ))
}
